use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{Config, Overrides};

mod app;
mod config;
mod logging;
mod page;
mod utils;

/// Typewriter text animations for your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory containing `settings.toml`
    #[arg(short, long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Name of the banner to play first
    #[arg(short, long)]
    banner: Option<String>,

    /// Play these texts instead of a configured banner. Can be repeated.
    #[arg(short = 't', long = "text", value_name = "TEXT")]
    texts: Vec<String>,

    /// Milliseconds between two typed characters
    #[arg(short, long, value_name = "MS")]
    speed: Option<u64>,

    /// Milliseconds before the first character
    #[arg(long, value_name = "MS")]
    initial_delay: Option<u64>,

    /// Milliseconds to pause before deleting a typed text
    #[arg(long, value_name = "MS")]
    loop_delay: Option<u64>,

    /// Delete and cycle through the texts
    #[arg(short, long = "loop", conflicts_with = "no_loop")]
    looping: bool,

    /// Type the texts once and stop
    #[arg(long)]
    no_loop: bool,

    /// Don't draw a cursor
    #[arg(long)]
    no_cursor: bool,

    /// Where to write logs
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log more. Can be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let looping = if self.looping {
            Some(true)
        } else if self.no_loop {
            Some(false)
        } else {
            None
        };

        Overrides {
            texts: self.texts.clone(),
            speed: self.speed,
            initial_delay: self.initial_delay,
            loop_delay: self.loop_delay,
            looping,
            show_cursor: self.no_cursor.then_some(false),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(log_file) = cli.log_file.clone().or_else(logging::default_log_file) {
        logging::configure_logging(cli.verbose, &log_file)?;
    }

    let config = Config::get(cli.config.clone(), cli.overrides())?;
    let selected = match &cli.banner {
        Some(name) => config.banner_index(name)?,
        None => 0,
    };

    tracing::info!(directory = %config.directory.display(), selected, "Starting typecast");
    app::App::new(config, selected).run()?;

    Ok(())
}
