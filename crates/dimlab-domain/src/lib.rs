//! dimlab Domain Layer
//!
//! This crate contains the core business logic and domain model for dimlab.
//! It has ZERO external dependencies and defines the fundamental concepts,
//! value objects, and state machines that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Dimension**: one of 20 fixed ideological axes used to tag hypotheses
//! - **Topic**: a subject under review, owning zero or more hypotheses
//! - **Quality label**: a clarity/relevance verdict pair for one hypothesis
//! - **Label store**: committed labels only; drafts live outside it
//! - **Navigator**: bounded cursor over the review sequence with an explicit
//!   exhausted state
//! - **Metrics**: micro-averaged precision/recall/F1 of selected dimensions
//!   against the gold set derived from a topic's hypotheses
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No external crate dependencies
//! - Pure business logic only
//! - File formats, sampling, and terminal rendering live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dimension;
pub mod label;
pub mod metrics;
pub mod navigate;
pub mod topic;

// Re-exports for convenience
pub use dimension::Dimension;
pub use label::{HypothesisKey, LabelStore, QualityDraft, QualityLabel, Verdict};
pub use metrics::{gold_dimensions, score, MetricsSnapshot};
pub use navigate::{Cursor, Position, TopicWalker, WalkerPosition};
pub use topic::{flatten, Category, FlatRow, Hypothesis, Topic, TopicId};
