//! Train command implementation.

use clap::{ArgGroup, Parser};

/// Train command arguments.
#[derive(Parser)]
#[command(group(ArgGroup::new("target").required(true).args(["vocab_size", "num_merges"])))]
pub struct TrainCommand {
    /// Path to the training corpus, one text per line
    #[arg(short, long)]
    pub input: String,

    /// Output path prefix; writes <prefix>.model and <prefix>.vocab
    #[arg(short, long)]
    pub output: String,

    /// Target vocabulary size
    #[arg(long)]
    pub vocab_size: Option<usize>,

    /// Target number of merges
    #[arg(short, long)]
    pub num_merges: Option<usize>,

    /// Minimum frequency for merges
    #[arg(short, long, default_value_t = DEFAULT_MIN_FREQUENCY)]
    pub min_frequency: u64,
}

use anyhow::{Context, Result as AnyhowResult};
use std::time::Instant;
use wordbpe::{load_corpus, Tokenizer, TokenizerConfig, TrainingConfig, DEFAULT_MIN_FREQUENCY};

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let start = Instant::now();
    let corpus = load_corpus(&cmd.input)
        .with_context(|| format!("unable to read corpus {}", cmd.input))?;

    let config = TokenizerConfig {
        training: TrainingConfig {
            vocab_size: cmd.vocab_size,
            num_merges: cmd.num_merges,
            min_frequency: cmd.min_frequency,
        },
        ..Default::default()
    };

    let (tokenizer, stop_reason) = Tokenizer::train_with_report(corpus, &config)?;
    log::info!(
        "trained {} tokens with {} merges in {:.2}s ({})",
        tokenizer.vocab_size(),
        tokenizer.merge_count(),
        start.elapsed().as_secs_f64(),
        stop_reason
    );

    let paths = tokenizer
        .save(&cmd.output)
        .with_context(|| format!("unable to save model to {}", cmd.output))?;

    println!("Model saved to {}", paths.model.display());
    println!("Vocabulary saved to {}", paths.vocab.display());

    Ok(())
}
