//! Developer tooling over the simulation core: floor previews and headless runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use basement_core::{GameConfig, generate_dungeon};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod render;
mod simulate;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML game config; defaults apply to every omitted field
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one floor and print it
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 0)]
        floor: u32,
        /// Print the generated floor as JSON instead of ASCII
        #[arg(long)]
        json: bool,
    },
    /// Run a scripted player against the engine and print a summary
    Simulate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 2000)]
        ticks: u64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { seed, floor, json } => {
            let dungeon = generate_dungeon(&config.dungeon, &config.interactables, seed, floor);
            if json {
                let text = serde_json::to_string_pretty(&dungeon)
                    .context("failed to serialize generated floor")?;
                println!("{text}");
            } else {
                print!("{}", render::ascii(&dungeon));
            }
        }
        Commands::Simulate { seed, ticks } => {
            let summary = simulate::run(seed, config, ticks)?;
            println!("{summary}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: GameConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}
