use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user-frozen paragraph pinned to a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedParagraph {
    /// 0-based position in the paragraph sequence at lock time
    pub index: usize,
    /// Paragraph text as it was when locked
    pub text: String,
    pub locked_at: DateTime<Utc>,
}

impl LockedParagraph {
    pub fn new(index: usize, text: impl Into<String>, locked_at: DateTime<Utc>) -> Self {
        Self {
            index,
            text: text.into(),
            locked_at,
        }
    }

    /// `(index, text)` pair as consumed by [`super::merge_with_locks`]
    pub fn as_pair(&self) -> (usize, &str) {
        (self.index, self.text.as_str())
    }
}

/// Result of a lock request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Full lock set after the request, ordered by index
    pub locked: Vec<LockedParagraph>,
    /// Requested indices with no paragraph, in request order
    pub rejected: Vec<usize>,
}

/// Lock paragraphs by index, freezing their current text.
///
/// Valid indices are applied even when others are rejected. A new lock
/// replaces any existing lock at the same index.
pub fn lock_paragraphs<S: AsRef<str>>(
    paragraphs: &[S],
    indices: &[usize],
    existing: &[LockedParagraph],
    now: DateTime<Utc>,
) -> LockOutcome {
    let mut by_index: BTreeMap<usize, LockedParagraph> = existing
        .iter()
        .map(|lock| (lock.index, lock.clone()))
        .collect();
    let mut rejected = Vec::new();

    for &index in indices {
        match paragraphs.get(index) {
            Some(text) => {
                by_index.insert(index, LockedParagraph::new(index, text.as_ref(), now));
            }
            None => {
                if !rejected.contains(&index) {
                    rejected.push(index);
                }
            }
        }
    }

    if !rejected.is_empty() {
        debug!(
            ?rejected,
            paragraphs = paragraphs.len(),
            "ignoring out-of-range lock indices"
        );
    }

    LockOutcome {
        locked: by_index.into_values().collect(),
        rejected,
    }
}

/// Remove the locks at `indices`; unknown indices are ignored
pub fn unlock_paragraphs(existing: &[LockedParagraph], indices: &[usize]) -> Vec<LockedParagraph> {
    existing
        .iter()
        .filter(|lock| !indices.contains(&lock.index))
        .cloned()
        .collect()
}
