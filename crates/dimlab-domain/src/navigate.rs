//! Navigate module - bounded cursors over the review sequence
//!
//! Review position is an explicit finite state rather than a bare index:
//! either some unit is on screen ([`Position::Reviewing`]) or the sequence
//! is exhausted and the completion screen shows. The exhausted state is one
//! past the last unit, reachable only by advancing off the end.

use std::fmt;

/// Where a flat review sequence currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The unit at this index is under review
    Reviewing(usize),
    /// Every unit has been advanced past; the sequence is complete
    Exhausted,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Reviewing(i) => write!(f, "{}", i + 1),
            Position::Exhausted => write!(f, "done"),
        }
    }
}

/// Linear cursor over `[0, len)` with an explicit exhausted sentinel.
///
/// `previous` clamps at the first unit; `next` walks forward and promotes
/// the advance off the last unit to [`Position::Exhausted`], where further
/// `next` calls are no-ops. An empty sequence starts exhausted.
#[derive(Debug, Clone)]
pub struct Cursor {
    len: usize,
    pos: Position,
}

impl Cursor {
    /// Cursor over a sequence of `len` units, starting at the first.
    pub fn new(len: usize) -> Self {
        let pos = if len == 0 {
            Position::Exhausted
        } else {
            Position::Reviewing(0)
        };
        Self { len, pos }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Current index, when a unit is under review.
    pub fn index(&self) -> Option<usize> {
        match self.pos {
            Position::Reviewing(i) => Some(i),
            Position::Exhausted => None,
        }
    }

    /// Number of units in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the sequence has no units.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once the cursor has advanced past the last unit.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.pos, Position::Exhausted)
    }

    /// Step back one unit. No-op at the first unit; from exhausted,
    /// returns to the last unit.
    pub fn previous(&mut self) -> Position {
        self.pos = match self.pos {
            Position::Reviewing(0) => Position::Reviewing(0),
            Position::Reviewing(i) => Position::Reviewing(i - 1),
            Position::Exhausted if self.len > 0 => Position::Reviewing(self.len - 1),
            Position::Exhausted => Position::Exhausted,
        };
        self.pos
    }

    /// Step forward one unit; advancing off the last unit exhausts the
    /// cursor, and further calls stay exhausted.
    pub fn next(&mut self) -> Position {
        self.pos = match self.pos {
            Position::Reviewing(i) if i + 1 < self.len => Position::Reviewing(i + 1),
            _ => Position::Exhausted,
        };
        self.pos
    }
}

/// Where a two-level (topic, hypothesis-within-topic) walk currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerPosition {
    /// The given hypothesis of the given topic is under review
    Reviewing {
        /// Topic index in the walked sequence
        topic: usize,
        /// Hypothesis index within that topic
        hypothesis: usize,
    },
    /// Every hypothesis of every topic has been advanced past
    Exhausted,
}

/// Two-level cursor over topics and their hypotheses.
///
/// Moving backward from the first hypothesis of a topic lands on the last
/// hypothesis of the previous topic; moving forward from the last hypothesis
/// of a topic lands on the first hypothesis of the next. Advancing past the
/// last hypothesis of the last topic exhausts the walker.
///
/// Every walked topic must have at least one hypothesis: callers drop empty
/// topics first (the flattener does the same), and a zero count here is a
/// programming error, not an input condition.
#[derive(Debug, Clone)]
pub struct TopicWalker {
    counts: Vec<usize>,
    pos: WalkerPosition,
}

impl TopicWalker {
    /// Walker over topics with the given per-topic hypothesis counts.
    ///
    /// # Panics
    /// Panics if any count is zero.
    pub fn new(counts: Vec<usize>) -> Self {
        assert!(
            counts.iter().all(|&c| c > 0),
            "TopicWalker requires every topic to have at least one hypothesis"
        );
        let pos = if counts.is_empty() {
            WalkerPosition::Exhausted
        } else {
            WalkerPosition::Reviewing {
                topic: 0,
                hypothesis: 0,
            }
        };
        Self { counts, pos }
    }

    /// Current position.
    pub fn position(&self) -> WalkerPosition {
        self.pos
    }

    /// Current (topic, hypothesis) indices, when a unit is under review.
    pub fn indices(&self) -> Option<(usize, usize)> {
        match self.pos {
            WalkerPosition::Reviewing { topic, hypothesis } => Some((topic, hypothesis)),
            WalkerPosition::Exhausted => None,
        }
    }

    /// Number of walked topics.
    pub fn topic_count(&self) -> usize {
        self.counts.len()
    }

    /// Total number of hypotheses across all walked topics.
    pub fn unit_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// True once the walker has advanced past the final hypothesis.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.pos, WalkerPosition::Exhausted)
    }

    /// Step back one hypothesis, crossing into the previous topic's last
    /// hypothesis at a topic boundary. No-op at the very first unit; from
    /// exhausted, returns to the last unit.
    pub fn previous(&mut self) -> WalkerPosition {
        self.pos = match self.pos {
            WalkerPosition::Reviewing {
                topic,
                hypothesis: 0,
            } if topic == 0 => self.pos,
            WalkerPosition::Reviewing {
                topic,
                hypothesis: 0,
            } => WalkerPosition::Reviewing {
                topic: topic - 1,
                hypothesis: self.counts[topic - 1] - 1,
            },
            WalkerPosition::Reviewing { topic, hypothesis } => WalkerPosition::Reviewing {
                topic,
                hypothesis: hypothesis - 1,
            },
            WalkerPosition::Exhausted if !self.counts.is_empty() => {
                let topic = self.counts.len() - 1;
                WalkerPosition::Reviewing {
                    topic,
                    hypothesis: self.counts[topic] - 1,
                }
            }
            WalkerPosition::Exhausted => WalkerPosition::Exhausted,
        };
        self.pos
    }

    /// Step forward one hypothesis, crossing into the next topic's first
    /// hypothesis at a topic boundary; advancing past the final hypothesis
    /// of the final topic exhausts the walker.
    pub fn next(&mut self) -> WalkerPosition {
        self.pos = match self.pos {
            WalkerPosition::Reviewing { topic, hypothesis }
                if hypothesis + 1 < self.counts[topic] =>
            {
                WalkerPosition::Reviewing {
                    topic,
                    hypothesis: hypothesis + 1,
                }
            }
            WalkerPosition::Reviewing { topic, .. } if topic + 1 < self.counts.len() => {
                WalkerPosition::Reviewing {
                    topic: topic + 1,
                    hypothesis: 0,
                }
            }
            _ => WalkerPosition::Exhausted,
        };
        self.pos
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a cursor index never escapes [0, len) under any
        /// sequence of moves
        #[test]
        fn test_cursor_stays_in_bounds(len in 0usize..20, moves in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut cursor = Cursor::new(len);
            for forward in moves {
                if forward { cursor.next(); } else { cursor.previous(); }
                if let Some(i) = cursor.index() {
                    prop_assert!(i < len);
                }
            }
        }

        /// Property: walker indices always address a real hypothesis
        #[test]
        fn test_walker_stays_in_bounds(counts in prop::collection::vec(1usize..5, 0..8), moves in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut walker = TopicWalker::new(counts.clone());
            for forward in moves {
                if forward { walker.next(); } else { walker.previous(); }
                if let Some((t, h)) = walker.indices() {
                    prop_assert!(t < counts.len());
                    prop_assert!(h < counts[t]);
                }
            }
        }
    }
}
