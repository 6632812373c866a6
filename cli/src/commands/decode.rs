//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Path to the trained `.model` file
    #[arg(short, long)]
    pub model: String,

    /// Token IDs to decode (comma or space separated)
    #[arg(short, long)]
    pub tokens: String,
}

use anyhow::{Context, Result as AnyhowResult};
use wordbpe::Tokenizer;

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.model)
        .with_context(|| format!("unable to load model {}", cmd.model))?;

    let ids = parse_ids(&cmd.tokens)?;
    println!("{}", tokenizer.decode(&ids));

    Ok(())
}

fn parse_ids(tokens: &str) -> AnyhowResult<Vec<u32>> {
    tokens
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token ID {:?}", s))
        })
        .collect()
}
