//! Fruchterman–Reingold spring layout
//!
//! Edges attract with f_a = d²/k, every pair repels with f_r = k²/d, and the
//! displacement per step is capped by a temperature that cools linearly.
//! Positions start from a seeded RNG and are scaled into the unit square.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use maxcut_core::Graph;

/// Default number of relaxation steps
pub const DEFAULT_ITERATIONS: usize = 50;

/// Node position in [0, 1]²
pub type Point = (f64, f64);

/// Smallest distance used in force computations
const MIN_DISTANCE: f64 = 1e-6;

/// Compute node positions for `graph`
///
/// Deterministic for a given seed. Edge weights are ignored.
pub fn spring_layout(graph: &Graph, seed: u64, iterations: usize) -> Vec<Point> {
    let n = graph.num_nodes();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.5, 0.5)],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<Point> = (0..n).map(|_| (rng.gen::<f64>(), rng.gen::<f64>())).collect();

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut disp = vec![(0.0, 0.0); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (pos[i].0 - pos[j].0, pos[i].1 - pos[j].1);
                let d = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let f = k * k / d;
                disp[i].0 += dx / d * f;
                disp[i].1 += dy / d * f;
                disp[j].0 -= dx / d * f;
                disp[j].1 -= dy / d * f;
            }
        }

        for edge in graph.edges() {
            let (u, v) = (edge.u, edge.v);
            if u >= n || v >= n || u == v {
                continue;
            }
            let (dx, dy) = (pos[u].0 - pos[v].0, pos[u].1 - pos[v].1);
            let d = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let f = d * d / k;
            disp[u].0 -= dx / d * f;
            disp[u].1 -= dy / d * f;
            disp[v].0 += dx / d * f;
            disp[v].1 += dy / d * f;
        }

        for (p, (dx, dy)) in pos.iter_mut().zip(disp) {
            let len = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let step = len.min(temperature);
            p.0 += dx / len * step;
            p.1 += dy / len * step;
        }

        temperature -= cooling;
    }

    normalize(pos)
}

/// Rescale into [0, 1]² preserving aspect ratio, centred
fn normalize(pos: Vec<Point>) -> Vec<Point> {
    let (min_x, max_x) = bounds(pos.iter().map(|p| p.0));
    let (min_y, max_y) = bounds(pos.iter().map(|p| p.1));
    let span = (max_x - min_x).max(max_y - min_y);

    if span < MIN_DISTANCE {
        return vec![(0.5, 0.5); pos.len()];
    }

    let off_x = (span - (max_x - min_x)) / 2.0;
    let off_y = (span - (max_y - min_y)) / 2.0;
    pos.into_iter()
        .map(|(x, y)| ((x - min_x + off_x) / span, (y - min_y + off_y) / span))
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
