//! driftdock CLI
//!
//! Replays a floating menu drag release on a headless view and prints where
//! the menu came to rest, plus every callback the view received.

mod simulate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use driftdock_core::{Point, Rect};
use driftdock_menu::MotionConfig;
use simulate::Release;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Floating menu motion simulator
#[derive(Parser, Debug)]
#[command(name = "driftdock")]
#[command(about = "Simulate floating menu fling, settle, dock and fade")]
#[command(version)]
struct Args {
    /// Motion config file (motion.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Release the menu and run until it comes to rest
    Release {
        /// Draggable region as LEFT,TOP,RIGHT,BOTTOM
        #[arg(long, value_parser = parse_rect, default_value = "0,0,500,1000")]
        bounds: Rect,

        /// Menu width in pixels
        #[arg(long, default_value = "80")]
        width: f32,

        /// Menu translation at release as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Point,

        /// Release velocity in px/s as VX,VY
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        velocity: Point,

        /// Enable the idle fade with this target opacity
        #[arg(long)]
        fade: Option<f32>,

        /// Simulated time limit in milliseconds
        #[arg(long, default_value = "10000")]
        max_ms: u64,
    },

    /// Print the effective motion config as TOML
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => MotionConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => MotionConfig::default(),
    };

    match args.command {
        Command::Release {
            bounds,
            width,
            at,
            velocity,
            fade,
            max_ms,
        } => {
            let release = Release {
                bounds,
                width,
                at,
                velocity,
                fade,
                max_duration: Duration::from_millis(max_ms),
            };
            tracing::info!(
                x = at.x,
                y = at.y,
                vx = velocity.x,
                vy = velocity.y,
                "simulating release"
            );

            let report = simulate::run(&release, config)?;
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_floats<const N: usize>(s: &str) -> std::result::Result<[f32; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {} comma-separated numbers, got '{}'", N, s));
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
    }
    Ok(values)
}

fn parse_rect(s: &str) -> std::result::Result<Rect, String> {
    let [left, top, right, bottom] = parse_floats::<4>(s)?;
    Ok(Rect::new(left, top, right, bottom))
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let [x, y] = parse_floats::<2>(s)?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rect() {
        assert_eq!(parse_rect("0, 0,500,1000").unwrap(), Rect::new(0.0, 0.0, 500.0, 1000.0));
        assert!(parse_rect("0,0,500").is_err());
        assert!(parse_rect("0,0,wide,1000").is_err());
    }

    #[test]
    fn test_parse_point_accepts_negatives() {
        assert_eq!(parse_point("-30,1200").unwrap(), Point::new(-30.0, 1200.0));
    }

    #[test]
    fn test_release_args() {
        let args = Args::try_parse_from([
            "driftdock",
            "release",
            "--at",
            "400,300",
            "--velocity",
            "-2000,0",
            "--fade",
            "0.4",
        ])
        .unwrap();

        match args.command {
            Command::Release {
                bounds,
                at,
                velocity,
                fade,
                ..
            } => {
                assert_eq!(bounds, Rect::new(0.0, 0.0, 500.0, 1000.0));
                assert_eq!(at, Point::new(400.0, 300.0));
                assert_eq!(velocity, Point::new(-2000.0, 0.0));
                assert_eq!(fade, Some(0.4));
            }
            Command::Config => panic!("expected release"),
        }
    }
}
