//! dimlab Corpus Layer
//!
//! File formats and sampling for the annotation workbench: loading the
//! newline-delimited JSON hypothesis corpus into domain types, drawing
//! deterministic seeded samples for review, and writing the flat export
//! files (labeled hypotheses, topic dimension selections, metrics).
//!
//! Loading is a pure function of file contents: repeated loads of an
//! unchanged file return structurally equal corpora. A malformed line
//! aborts the whole load - scoring against a silently truncated gold set
//! is worse than failing loudly.

#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod loader;
pub mod sampler;

pub use error::CorpusError;
pub use export::{
    quality_records, read_dimension_selections, read_quality_export, read_sampled_topic_ids,
    rebuild_label_store, write_dimension_selections, write_metrics, write_quality_export,
    write_sampled_rows, QualityRecord, QualityVerdicts,
};
pub use loader::load_corpus;
pub use sampler::{checked_sample_size, sample};

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
