//! Section model
//!
//! A section is created by the first generation and then evolves through user
//! edits, locks and regenerations. Regeneration never mutates the previous
//! value: it derives a new section from the old one plus the model output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::citation::Citation;
use crate::paragraph::{self, count_words, merge_with_locks, split_paragraphs};

pub use crate::paragraph::LockedParagraph;

/// Word-limit state used to colour a section in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordLimitStatus {
    Ok,
    Warning,
    Exceeded,
}

impl WordLimitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordLimitStatus::Ok => "ok",
            WordLimitStatus::Warning => "warning",
            WordLimitStatus::Exceeded => "exceeded",
        }
    }
}

impl std::fmt::Display for WordLimitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Generated text with inline citation markers
    pub text: String,
    pub word_count: usize,
    /// Citations used by `text`, in first-occurrence order
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// Locks ordered by index
    #[serde(default)]
    pub locked_paragraphs: Vec<LockedParagraph>,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub regeneration_count: u32,
}

impl Section {
    /// Section produced by a first generation
    pub fn generated(
        name: impl Into<String>,
        text: impl Into<String>,
        citations: Vec<Citation>,
        now: DateTime<Utc>,
    ) -> Self {
        let text = text.into();
        Self {
            name: name.into(),
            word_count: count_words(&text),
            text,
            citations,
            locked_paragraphs: Vec::new(),
            generated_at: now,
            regeneration_count: 0,
        }
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        split_paragraphs(&self.text)
    }

    /// Replace the text with a user edit. Locks are kept as they are.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.word_count = count_words(&self.text);
    }

    /// Lock paragraphs of the current text, returning the rejected indices
    pub fn lock(&mut self, indices: &[usize], now: DateTime<Utc>) -> Vec<usize> {
        let outcome = paragraph::lock_paragraphs(
            &self.paragraphs(),
            indices,
            &self.locked_paragraphs,
            now,
        );
        self.locked_paragraphs = outcome.locked;
        outcome.rejected
    }

    pub fn unlock(&mut self, indices: &[usize]) {
        self.locked_paragraphs = paragraph::unlock_paragraphs(&self.locked_paragraphs, indices);
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locked_paragraphs.iter().any(|lock| lock.index == index)
    }

    /// Derive the next section from fresh model output.
    ///
    /// Locked paragraphs are merged back at their indices and carried over;
    /// citations are replaced by the ones attributed to the new output.
    pub fn regenerate(
        &self,
        new_text: &str,
        citations: Vec<Citation>,
        now: DateTime<Utc>,
    ) -> Section {
        let text = merge_with_locks(
            new_text,
            self.locked_paragraphs.iter().map(LockedParagraph::as_pair),
        );
        debug!(
            section = %self.name,
            locks = self.locked_paragraphs.len(),
            regeneration = self.regeneration_count + 1,
            "regenerated section"
        );
        Section {
            name: self.name.clone(),
            word_count: count_words(&text),
            text,
            citations,
            locked_paragraphs: self.locked_paragraphs.clone(),
            generated_at: now,
            regeneration_count: self.regeneration_count + 1,
        }
    }

    /// Classify the word count against `limit`.
    ///
    /// `Warning` starts at `limit * (1 - warning_percent / 100)` words and
    /// `Exceeded` means strictly more than `limit`.
    pub fn limit_status(&self, limit: Option<usize>, warning_percent: f64) -> WordLimitStatus {
        let Some(limit) = limit else {
            return WordLimitStatus::Ok;
        };
        if self.word_count > limit {
            return WordLimitStatus::Exceeded;
        }
        let threshold = limit as f64 * (1.0 - warning_percent / 100.0);
        if self.word_count as f64 >= threshold {
            WordLimitStatus::Warning
        } else {
            WordLimitStatus::Ok
        }
    }

    /// User-facing warning for `limit_status`, if any
    pub fn limit_warning(&self, limit: Option<usize>, warning_percent: f64) -> Option<String> {
        let limit_value = limit?;
        match self.limit_status(limit, warning_percent) {
            WordLimitStatus::Ok => None,
            WordLimitStatus::Exceeded => Some(format!(
                "Section exceeds word limit by {} words",
                self.word_count - limit_value
            )),
            WordLimitStatus::Warning => Some(format!(
                "Section is close to word limit ({}/{} words)",
                self.word_count, limit_value
            )),
        }
    }
}
