//! wordbpe CLI - Command-line interface for the word-level BPE tokenizer.
//!
//! This is the main entry point for the `wordbpe` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{DecodeCommand, EncodeCommand, TrainCommand};
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "wordbpe")]
#[command(about = "A word-level BPE tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new tokenizer from a text file
    Train(TrainCommand),
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode token IDs back to text
    Decode(DecodeCommand),
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    let _ = builder.try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
    }

    Ok(())
}
