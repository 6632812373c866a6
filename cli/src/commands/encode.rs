//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Path to the trained `.model` file
    #[arg(short, long)]
    pub model: String,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Apply merges strictly in rank order
    #[arg(short, long, default_value_t = false)]
    pub ranked: bool,

    /// Print token strings instead of IDs
    #[arg(short, long, default_value_t = false)]
    pub tokens: bool,
}

use anyhow::{Context, Result as AnyhowResult};
use std::io::Read;
use wordbpe::{MergePolicy, Tokenizer};

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let mut tokenizer = Tokenizer::load(&cmd.model)
        .with_context(|| format!("unable to load model {}", cmd.model))?;
    if cmd.ranked {
        tokenizer = tokenizer.with_merge_policy(MergePolicy::Ranked);
    }

    // Read input text (from stdin if "-")
    let input_text = if cmd.input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.input
    };

    let output = if cmd.tokens {
        tokenizer
            .tokenize(&input_text)
            .iter()
            .map(|token| format!("{:?}", token))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        tokenizer
            .encode(&input_text)
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    println!("{}", output);

    Ok(())
}
