use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use torus_snake::game::{CollisionReset, GameConfig};
use torus_snake::modes::{HeadlessMode, HumanMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// How to run the game
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    columns: Option<usize>,

    /// Grid height
    #[arg(long)]
    rows: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// What a tick does after a self-collision resets the round
    #[arg(long)]
    collision_reset: Option<ResetArg>,

    /// Ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Do not ring the terminal bell when an apple is eaten
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (human mode logs nowhere else)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run scripted ticks without a terminal and log a summary
    Headless,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResetArg {
    Clean,
    Compatible,
}

impl From<ResetArg> for CollisionReset {
    fn from(arg: ResetArg) -> Self {
        match arg {
            ResetArg::Clean => CollisionReset::Clean,
            ResetArg::Compatible => CollisionReset::Compatible,
        }
    }
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(reset) = self.collision_reset {
            config.collision_reset = reset.into();
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over the `info` default.
fn init_logging(log_file: Option<&Path>, fallback_to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if fallback_to_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so human mode only logs to a file
    let headless = matches!(cli.mode, Mode::Headless);
    init_logging(cli.log_file.as_deref(), headless)?;

    let config = cli.game_config()?;
    tracing::info!(?config, "configuration loaded");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.mute);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let report = HeadlessMode::new(config).run(cli.ticks);
            println!(
                "ticks={} score={} length={} best={} apples={} restarts={}{}",
                report.ticks_run,
                report.final_score,
                report.final_length,
                report.high_score,
                report.apples_eaten,
                report.restarts,
                if report.stopped { " (board full)" } else { "" }
            );
        }
    }

    Ok(())
}
