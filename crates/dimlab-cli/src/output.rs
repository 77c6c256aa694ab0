//! Output formatting for the CLI.

use crate::config::OutputFormat;
use colored::*;
use dimlab_domain::{Dimension, Hypothesis, MetricsSnapshot, QualityDraft, Topic, Verdict};
use std::collections::BTreeSet;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active listing format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the ideological dimension reference as a table.
    pub fn dimension_reference(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Dimension", "Description"]);
        for dim in Dimension::ALL {
            builder.push_record([dim.as_str(), dim.describe()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format dataset statistics for the original corpus and the drawn
    /// sample.
    pub fn dataset_stats(
        &self,
        corpus: (usize, usize),
        sampled: Option<(usize, usize)>,
    ) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Dataset", "Topics", "Hypotheses"]);
        builder.push_record([
            "Original".to_string(),
            corpus.0.to_string(),
            corpus.1.to_string(),
        ]);
        if let Some((topics, hypotheses)) = sampled {
            builder.push_record([
                "Sampled".to_string(),
                topics.to_string(),
                hypotheses.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a metrics snapshot as a table.
    pub fn metrics_table(&self, metrics: &MetricsSnapshot) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Precision", "Recall", "F1"]);
        builder.push_record([
            format!("{:.2}", metrics.precision),
            format!("{:.2}", metrics.recall),
            format!("{:.2}", metrics.f1),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a topic header line.
    pub fn topic_header(&self, topic: &Topic) -> String {
        let mut line = format!("Topic: {} (ID: {})", topic.title, topic.id);
        if let Some(top_term) = &topic.top_term {
            line.push_str(&format!("  |  General concept: {}", top_term));
        }
        self.colorize(&line, "magenta")
    }

    /// Format the header line for a hypothesis under review.
    pub fn review_header(&self, title: &str, top_term: Option<&str>) -> String {
        let mut line = format!("Topic: {}", title);
        if let Some(top_term) = top_term {
            line.push_str(&format!("  |  General concept: {}", top_term));
        }
        self.colorize(&line, "magenta")
    }

    /// Format one hypothesis card: the statement, its dimension, and the
    /// generated explanation.
    pub fn hypothesis_card(&self, hypothesis: &Hypothesis) -> String {
        let mut out = String::new();
        out.push_str(&self.colorize(
            &format!("  \u{201c}{}\u{201d}", hypothesis.text),
            "cyan",
        ));
        out.push('\n');
        out.push_str(&format!(
            "  Dimension: {}",
            self.colorize(hypothesis.dimension.as_str(), "green")
        ));
        if let Some(side) = &hypothesis.ideological_side {
            out.push_str(&format!("  ({})", side));
        }
        out.push('\n');
        out.push_str(&format!("  Explanation: {}", hypothesis.explanation));
        out
    }

    /// Format the current draft state of a quality review.
    pub fn draft_status(&self, draft: &QualityDraft) -> String {
        format!(
            "  Clarity: {}   Relevance: {}",
            self.verdict_slot(draft.clarity),
            self.verdict_slot(draft.relevance)
        )
    }

    fn verdict_slot(&self, verdict: Option<Verdict>) -> String {
        match verdict {
            Some(Verdict::Yes) => self.colorize("YES", "green"),
            Some(Verdict::No) => self.colorize("NO", "red"),
            None => self.colorize("not selected yet", "yellow"),
        }
    }

    /// Format a dimension selection as a compact line.
    pub fn selection_line(&self, selection: &BTreeSet<Dimension>) -> String {
        if selection.is_empty() {
            self.colorize("  (no dimensions selected)", "yellow")
        } else {
            let names: Vec<&str> = selection.iter().map(|d| d.as_str()).collect();
            format!("  Selected: {}", self.colorize(&names.join(", "), "green"))
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("\u{2713} {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("\u{2717} {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("\u{2139} {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("\u{26a0} {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
