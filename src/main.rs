//! Plinko Board entry point
//!
//! Runs a headless session: drops balls, steps the board in real frame-sized
//! slices, and prints what landed where.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use plinko_board::overlay::TextLabel;
use plinko_board::sim::Strike;
use plinko_board::ui::UiCommand;
use plinko_board::{GameSession, Settings};

#[derive(Parser, Debug)]
#[command(name = "plinko-board", about = "Headless peg-board drop game")]
struct Cli {
    /// JSON settings file (missing keys use defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Peg rows
    #[arg(long)]
    rows: Option<i32>,
    /// Extra balls to drop after the initial stock (1-10)
    #[arg(long)]
    balls: Option<u8>,
    /// Drop one ball at this pointer position, e.g. --click 300,40
    #[arg(long, value_parser = parse_point)]
    click: Vec<Vec2>,
    /// Seconds of play to simulate
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,
    /// Frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// RNG seed for spawn heights
    #[arg(long)]
    seed: Option<u64>,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Vec2::new(x, y))
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(rows) = cli.rows {
        settings.rows = rows;
    }
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    if cli.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    log::info!("Plinko Board (headless) starting...");
    let mut session = GameSession::new(settings).context("starting session")?;

    if let Some(balls) = cli.balls {
        session.apply(UiCommand::SliderReleased(balls));
    }
    for point in &cli.click {
        session.apply(UiCommand::MouseDown(*point));
    }

    let frame = Duration::from_millis(cli.frame_ms.max(1));
    let frames = (cli.seconds.max(0.0) * 1000.0 / frame.as_millis() as f32).ceil() as u64;
    let mut hits = Vec::new();
    for _ in 0..frames {
        for strike in session.update(frame) {
            if let Strike::PartitionHit {
                annotation: Some(text),
                ..
            } = strike
            {
                println!("[{:>6.2}s] hit {}", session.now().as_secs_f32(), text);
                hits.push(text);
            }
        }
    }

    let mut labels: Vec<TextLabel> = Vec::new();
    session.draw_overlay(&mut labels);

    println!();
    println!("Hits:        {}", hits.len());
    println!("Balls left:  {}", session.world().count(plinko_board::sim::Label::Ball));
    println!("Scoreboard:  {}", session.scoreboard().join(", "));
    println!("Overlay:     {} labels", labels.len());
    for label in &labels {
        println!(
            "  {:>5} {:>5} at ({:.0}, {:.0})",
            label.body.to_string(),
            label.text,
            label.position.x,
            label.position.y
        );
    }

    session.teardown();
    Ok(())
}
