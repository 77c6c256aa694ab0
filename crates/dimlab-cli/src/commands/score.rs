//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use dimlab_corpus::{load_corpus, read_dimension_selections, write_metrics};
use dimlab_domain::{gold_dimensions, score};

/// Execute the score command: evaluate a previously exported
/// dimension-selection file against the corpus gold set.
pub fn execute_score(args: ScoreArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let corpus_path = args.corpus.unwrap_or_else(|| config.paths.corpus.clone());

    let topics = load_corpus(&corpus_path)?;
    let gold = gold_dimensions(&topics);
    let predicted = read_dimension_selections(&args.labels)?;
    let snapshot = score(&gold, &predicted);

    match formatter.format() {
        OutputFormat::Json => {
            let object = serde_json::json!({
                "precision": snapshot.precision,
                "recall": snapshot.recall,
                "f1": snapshot.f1,
            });
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        OutputFormat::Quiet => {
            println!(
                "{:.6} {:.6} {:.6}",
                snapshot.precision, snapshot.recall, snapshot.f1
            );
        }
        OutputFormat::Table => {
            println!("{}", formatter.metrics_table(&snapshot));
        }
    }

    if let Some(output) = args.output {
        write_metrics(&output, &snapshot)?;
        println!(
            "{}",
            formatter.success(&format!("Saved metrics to {}", output.display()))
        );
    }

    Ok(())
}
