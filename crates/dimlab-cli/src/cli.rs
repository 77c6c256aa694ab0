//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dimlab - label generated political hypotheses and topics from the terminal.
#[derive(Debug, Parser)]
#[command(name = "dimlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format for listings
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Explore the hypothesis corpus without labeling
    Browse(BrowseArgs),

    /// Draw a deterministic sample of hypotheses into a file
    Sample(SampleArgs),

    /// Review sampled hypotheses interactively for clarity and relevance
    LabelHypotheses(LabelHypothesesArgs),

    /// Select relevant ideological dimensions per topic interactively
    LabelTopics(LabelTopicsArgs),

    /// Score a dimension-selection export against the corpus gold set
    Score(ScoreArgs),
}

/// Category filter for browsing.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CategoryFilter {
    /// Easy topics only
    NonTechnical,
    /// Intermediate and technical topics
    Technical,
}

/// Arguments for the browse command.
#[derive(Debug, Parser)]
pub struct BrowseArgs {
    /// Hypothesis corpus file (newline-delimited JSON)
    #[arg(short = 'i', long)]
    pub corpus: Option<PathBuf>,

    /// Filter by topic category
    #[arg(long, value_enum)]
    pub category: Option<CategoryFilter>,

    /// Show only topics whose text contains this substring
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Print the ideological dimension reference and exit
    #[arg(long)]
    pub dims: bool,

    /// Print dataset statistics only
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the sample command.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Hypothesis corpus file (newline-delimited JSON)
    #[arg(short = 'i', long)]
    pub corpus: Option<PathBuf>,

    /// Output file for the sampled rows
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of hypotheses to draw
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Sampling seed
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the label-hypotheses command.
#[derive(Debug, Parser)]
pub struct LabelHypothesesArgs {
    /// Hypothesis corpus file (newline-delimited JSON)
    #[arg(short = 'i', long)]
    pub corpus: Option<PathBuf>,

    /// Number of units to sample: hypotheses, or topics with --by-topic
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Sampling seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Walk whole topics hypothesis-by-hypothesis instead of a flat
    /// sample of individual hypotheses
    #[arg(long)]
    pub by_topic: bool,

    /// Export file for committed labels
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the label-topics command.
#[derive(Debug, Parser)]
pub struct LabelTopicsArgs {
    /// Hypothesis corpus file (newline-delimited JSON)
    #[arg(short = 'i', long)]
    pub corpus: Option<PathBuf>,

    /// Restrict to topic ids appearing in this sampled-rows file
    #[arg(long)]
    pub sampled: Option<PathBuf>,

    /// Export file for dimension selections
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export file for the metrics snapshot
    #[arg(short, long)]
    pub metrics_output: Option<PathBuf>,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// Hypothesis corpus file (newline-delimited JSON)
    #[arg(short = 'i', long)]
    pub corpus: Option<PathBuf>,

    /// Dimension-selection export to score
    #[arg(short, long)]
    pub labels: PathBuf,

    /// Write the metrics snapshot to this file as well
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_parsing() {
        let cli = Cli::parse_from(["dimlab", "browse", "--category", "technical"]);
        match cli.command {
            Command::Browse(args) => {
                assert!(matches!(args.category, Some(CategoryFilter::Technical)));
            }
            _ => panic!("Expected Browse command"),
        }
    }

    #[test]
    fn test_label_hypotheses_parsing() {
        let cli = Cli::parse_from([
            "dimlab",
            "label-hypotheses",
            "-i",
            "corpus.jsonl",
            "-n",
            "50",
            "--seed",
            "7",
            "--by-topic",
        ]);
        match cli.command {
            Command::LabelHypotheses(args) => {
                assert_eq!(args.corpus, Some(PathBuf::from("corpus.jsonl")));
                assert_eq!(args.size, Some(50));
                assert_eq!(args.seed, Some(7));
                assert!(args.by_topic);
            }
            _ => panic!("Expected LabelHypotheses command"),
        }
    }

    #[test]
    fn test_negative_size_reaches_validation() {
        // Clap accepts the value; the corpus layer rejects it
        let cli = Cli::parse_from(["dimlab", "sample", "-o", "out.jsonl", "-n", "-3"]);
        match cli.command {
            Command::Sample(args) => assert_eq!(args.size, Some(-3)),
            _ => panic!("Expected Sample command"),
        }
    }

    #[test]
    fn test_score_requires_labels() {
        assert!(Cli::try_parse_from(["dimlab", "score"]).is_err());
    }
}
