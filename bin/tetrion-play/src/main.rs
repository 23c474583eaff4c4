#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use arcade::{Config, Script, Session, Summary, Supply};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

/// Runs a headless game, optionally driven by a script, and prints the final board.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input script, one character per frame.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Seed for random pieces.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Frames to run. Defaults to the length of the script, or one minute of play.
    #[arg(long)]
    frames: Option<u64>,
    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("arcade=info,tetrion_play=info")
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?
            .parse::<Config>()
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => Config::default(),
    };

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?
            .parse::<Script>()
            .with_context(|| format!("invalid script {}", path.display()))?,
        None => Script::new(),
    };

    let frames = args.frames.unwrap_or(match script.actions.len() {
        0 => 60 * 60,
        n => n as u64,
    });
    info!("config {config}, {frames} frames, seed {}", args.seed);

    let supply = Supply::with_queue(args.seed, script.pieces.iter().copied());
    let mut session = Session::new(config, supply).context("invalid config")?;

    let time = Instant::now();
    session.play(script.actions.iter().copied(), frames);
    info!("ran in {:.3}s", time.elapsed().as_secs_f64());

    let summary = session.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    let frames = summary.frames;
    let pcs = summary.pieces;
    let over = if summary.over { ", game over" } else { "" };
    println!("frames: {frames}, pcs: {pcs}{over}");

    for row in &summary.board {
        println!("|{row}|");
    }
    println!("+{}+", "-".repeat(tetrion::matrix::COLS as usize));
    println!();
}
