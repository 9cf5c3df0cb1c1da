//! PNG rendering of a partitioned graph
//!
//! White canvas, one disc per node (red for label 0, blue for label 1), edges
//! as line segments. Cut edges are drawn thicker and darker than uncut ones.
//! Node indices and the cut value are drawn with a built-in 3x5 pixel font, so
//! no font file is needed.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use maxcut_core::{Graph, Solution};

use crate::layout::Point;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const PARTITION_ZERO: Rgb<u8> = Rgb([220, 50, 47]);
pub const PARTITION_ONE: Rgb<u8> = Rgb([38, 110, 210]);
pub const CUT_EDGE: Rgb<u8> = Rgb([30, 30, 30]);
pub const UNCUT_EDGE: Rgb<u8> = Rgb([170, 170, 170]);
pub const NODE_OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);
pub const NODE_TEXT: Rgb<u8> = Rgb([255, 255, 255]);
pub const TITLE_TEXT: Rgb<u8> = Rgb([30, 30, 30]);

/// Canvas geometry
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Width and height in pixels
    pub size: u32,
    /// Blank border around the layout
    pub margin: u32,
    pub node_radius: i32,
    /// Pixels per font cell
    pub text_scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 600,
            margin: 60,
            node_radius: 18,
            text_scale: 3,
        }
    }
}

/// Color for a partition label
pub fn label_color(label: u8) -> Rgb<u8> {
    if label == 0 {
        PARTITION_ZERO
    } else {
        PARTITION_ONE
    }
}

/// 3x5 bitmap for the characters a cut value or node index needs
///
/// Each row holds three bits, most significant bit leftmost.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => return None,
    };
    Some(rows)
}

/// Draw `text` centred on `center`; characters without a glyph are skipped
fn draw_text(
    canvas: &mut RgbImage,
    text: &str,
    center: (i32, i32),
    scale: u32,
    color: Rgb<u8>,
) {
    let glyphs: Vec<[u8; 5]> = text.chars().filter_map(glyph).collect();
    if glyphs.is_empty() || scale == 0 {
        return;
    }

    let cell = scale as i32;
    let width = glyphs.len() as i32 * 4 * cell - cell;
    let left = center.0 - width / 2;
    let top = center.1 - 5 * cell / 2;

    for (i, rows) in glyphs.iter().enumerate() {
        let x0 = left + i as i32 * 4 * cell;
        for (r, bits) in rows.iter().enumerate() {
            for c in 0..3 {
                if bits & (0b100 >> c) != 0 {
                    let rect =
                        Rect::at(x0 + c * cell, top + r as i32 * cell).of_size(scale, scale);
                    draw_filled_rect_mut(canvas, rect, color);
                }
            }
        }
    }
}

/// Draw the graph with nodes colored by `solution` and the cut value on top
pub fn render(
    graph: &Graph,
    solution: &Solution,
    positions: &[Point],
    cut_value: f64,
    options: &RenderOptions,
) -> Result<RgbImage> {
    ensure!(
        positions.len() == graph.num_nodes() && solution.num_nodes() == graph.num_nodes(),
        "layout has {} positions and solution {} labels for {} nodes",
        positions.len(),
        solution.num_nodes(),
        graph.num_nodes()
    );

    let mut canvas = RgbImage::from_pixel(options.size, options.size, BACKGROUND);
    let inner = options.size.saturating_sub(2 * options.margin) as f32;
    let to_pixel = |(x, y): Point| {
        (
            options.margin as f32 + x as f32 * inner,
            options.margin as f32 + y as f32 * inner,
        )
    };

    // Uncut edges first so cut edges stay on top
    let mut edges: Vec<_> = graph.edges().iter().collect();
    edges.sort_by_key(|e| e.is_cut(solution.labels()));

    for edge in edges {
        let start = to_pixel(positions[edge.u]);
        let end = to_pixel(positions[edge.v]);

        if edge.is_cut(solution.labels()) {
            for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
                draw_line_segment_mut(
                    &mut canvas,
                    (start.0 + dx, start.1 + dy),
                    (end.0 + dx, end.1 + dy),
                    CUT_EDGE,
                );
            }
        } else {
            draw_line_segment_mut(&mut canvas, start, end, UNCUT_EDGE);
        }
    }

    for (node, &pos) in positions.iter().enumerate() {
        let (x, y) = to_pixel(pos);
        let center = (x.round() as i32, y.round() as i32);
        draw_filled_circle_mut(&mut canvas, center, options.node_radius + 2, NODE_OUTLINE);
        draw_filled_circle_mut(
            &mut canvas,
            center,
            options.node_radius,
            label_color(solution.label(node)),
        );
        draw_text(&mut canvas, &node.to_string(), center, options.text_scale, NODE_TEXT);
    }

    let title_center = ((options.size / 2) as i32, (options.margin / 2) as i32);
    draw_text(
        &mut canvas,
        &format!("{cut_value:.2}"),
        title_center,
        options.text_scale,
        TITLE_TEXT,
    );

    Ok(canvas)
}

/// Render and write a PNG, overwriting `path`
pub fn save_png(
    graph: &Graph,
    solution: &Solution,
    positions: &[Point],
    cut_value: f64,
    options: &RenderOptions,
    path: &Path,
) -> Result<()> {
    let canvas = render(graph, solution, positions, cut_value, options)?;
    canvas
        .save(path)
        .with_context(|| format!("writing image {}", path.display()))
}
