//! Sample command implementation.

use crate::cli::SampleArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use dimlab_corpus::{checked_sample_size, load_corpus, sample, write_sampled_rows};
use dimlab_domain::flatten;

/// Execute the sample command: draw a deterministic sample of flattened
/// hypothesis rows into a file for later sessions.
pub fn execute_sample(args: SampleArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());
    let size = checked_sample_size(args.size.unwrap_or(config.review.sample_size))?;
    let seed = args.seed.unwrap_or(config.review.seed);

    let topics = load_corpus(&corpus_path)?;
    let rows = flatten(&topics);
    let drawn = sample(&rows, size, seed);
    write_sampled_rows(&args.output, &drawn)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Sampled {} of {} hypotheses (seed {}) into {}",
            drawn.len(),
            rows.len(),
            seed,
            args.output.display()
        ))
    );
    Ok(())
}
