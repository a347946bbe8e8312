#![warn(clippy::pedantic)]

mod apply;
mod config;
mod render;
mod shell;

use std::{io, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::LevelFilter;

use crate::{config::ShellConfig, shell::Session};

/// Turn the faces and slices of an N×N×N cube
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The shell configuration file to use, in TOML format. Defaults to
    /// `ncube/config.toml` in the platform config directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Side length of the cube, overriding the configuration file
    #[arg(long, short = 's', value_name = "N")]
    size: Option<usize>,

    /// Print stickers as plain letters
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn the cube interactively (the default).
    Play,
    /// Apply a sequence of moves to a solved cube and print the result.
    Apply {
        /// The moves to apply, e.g. "F R U R' U' F'".
        #[arg(required = true, num_args = 1..)]
        sequence: Vec<String>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = ShellConfig::load(cli.config.as_deref())?;
    if let Some(size) = cli.size {
        config.side_length = size;
    }
    if cli.no_color {
        config.color = false;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let mut session = Session::new(config);
            session.run(io::stdin().lock(), io::stdout().lock())?;
        }
        Commands::Apply { sequence } => apply::run(&sequence, &config, io::stdout().lock())?,
    }

    Ok(())
}
