//! Topic module - the records under review

use crate::dimension::Dimension;
use std::fmt;

/// Unique identifier for a topic.
///
/// Ids come from the corpus file and are opaque strings; numeric ids are
/// normalized to their decimal string form at load time. The id is never
/// parsed back into components, so ids containing separator characters are
/// safe.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicId(String);

impl TopicId {
    /// Create a topic id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty category assigned to a topic by the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Everyday topics requiring no specialist knowledge
    Easy,
    /// Topics requiring some background knowledge
    Intermediate,
    /// Specialist topics
    Technical,
}

impl Category {
    /// Get the category name as it appears in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Easy => "easy",
            Category::Intermediate => "intermediate",
            Category::Technical => "technical",
        }
    }

    /// Parse a category from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Category::Easy),
            "intermediate" => Some(Category::Intermediate),
            "technical" => Some(Category::Technical),
            _ => None,
        }
    }

    /// Display grouping: intermediate topics are presented alongside
    /// technical ones.
    pub fn is_technical(&self) -> bool {
        !matches!(self, Category::Easy)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A generated claim linking a topic to a stance on one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    /// The hypothesis statement
    pub text: String,

    /// The dimension the hypothesis takes a stance on
    pub dimension: Dimension,

    /// Generated justification for the dimension assignment
    pub explanation: String,

    /// Which side of the dimension the hypothesis takes, when stated
    pub ideological_side: Option<String>,
}

/// A subject under review, owning zero or more hypotheses.
///
/// Topics are immutable once loaded; a hypothesis is identified by its
/// position in the owning sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    /// Unique identifier
    pub id: TopicId,

    /// Topic text
    pub title: String,

    /// More general concept for the topic, when known
    pub top_term: Option<String>,

    /// Difficulty category, when known
    pub category: Option<Category>,

    /// Generated hypotheses, in generation order
    pub hypotheses: Vec<Hypothesis>,
}

/// One (topic, hypothesis) pair produced by [`flatten`].
///
/// Carries the owning topic's fields so a row is self-contained once the
/// source sequence is sampled or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    /// Owning topic id
    pub topic_id: TopicId,

    /// Owning topic text
    pub title: String,

    /// Owning topic's general concept, when known
    pub top_term: Option<String>,

    /// Owning topic's category, when known
    pub category: Option<Category>,

    /// Position of the hypothesis within the owning topic
    pub index: usize,

    /// The hypothesis itself
    pub hypothesis: Hypothesis,
}

/// Expand nested per-topic hypothesis lists into a flat sequence of
/// (topic, hypothesis) rows.
///
/// Topics with no hypotheses are dropped. Topics keep source order and
/// hypotheses keep their order within each topic. Pure and stateless.
pub fn flatten(topics: &[Topic]) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    for topic in topics {
        for (index, hypothesis) in topic.hypotheses.iter().enumerate() {
            rows.push(FlatRow {
                topic_id: topic.id.clone(),
                title: topic.title.clone(),
                top_term: topic.top_term.clone(),
                category: topic.category,
                index,
                hypothesis: hypothesis.clone(),
            });
        }
    }
    rows
}
