//! Max-Cut CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use maxcut_cli::layout::{spring_layout, DEFAULT_ITERATIONS};
use maxcut_cli::render::{save_png, RenderOptions};
use maxcut_cli::report::{console_lines, RunReport};
use maxcut_cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the result lines
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.run_config()?;
    let solver = cli.eigensolver();

    let outcome = maxcut_core::run(&config, solver.as_ref()).context("Max-Cut run failed")?;

    for line in console_lines(&outcome) {
        println!("{line}");
    }

    let positions = spring_layout(&outcome.graph, config.solver.seed, DEFAULT_ITERATIONS);
    save_png(
        &outcome.graph,
        &outcome.solution,
        &positions,
        outcome.cut_value,
        &RenderOptions::default(),
        &cli.output,
    )
    .context("render stage failed")?;
    info!(path = %cli.output.display(), "partition image written");

    if let Some(path) = &cli.json {
        RunReport::from_outcome(&outcome)
            .write_json(path)
            .context("report stage failed")?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}
