//! Data models for saved words and their review history

use serde::{Deserialize, Serialize};

use super::algorithm::ReviewResult;
use crate::dictionary::LookupResult;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 2.5;
/// Interval in days given to words without history
pub const DEFAULT_INTERVAL: f64 = 1.0;

/// A word the reader chose to keep for review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWord {
    /// The text that was looked up, used as the key
    pub word: String,
    pub simplified: String,
    pub traditional: String,
    /// Tone-marked pinyin
    pub pinyin: String,
    /// Newline-joined definitions
    pub definitions: String,
    /// Creation time in epoch seconds
    pub timestamp: f64,
}

impl SavedWord {
    pub fn from_lookup(word: impl Into<String>, result: &LookupResult, timestamp: f64) -> Self {
        Self {
            word: word.into(),
            simplified: result.simplified.clone(),
            traditional: result.traditional.clone(),
            pinyin: result.pinyin.clone(),
            definitions: result.joined_definitions(),
            timestamp,
        }
    }

    pub fn definition_lines(&self) -> impl Iterator<Item = &str> {
        self.definitions.split('\n')
    }
}

/// Spaced repetition state for a saved word. Only exists once the word
/// has been answered at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub word: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Epoch seconds of the last answer
    pub last_reviewed: f64,
    /// Epoch seconds when the word is due again
    pub next_review: f64,
    /// SM-2 ease factor, kept within [1.3, 2.5]
    pub ease_factor: f64,
    /// Current interval in days
    pub interval: f64,
}

impl ReviewStats {
    /// Stats after recording an answer on top of `prior` (None for the first answer)
    pub fn after_answer(
        word: impl Into<String>,
        prior: Option<&ReviewStats>,
        correct: bool,
        result: &ReviewResult,
        now: f64,
    ) -> Self {
        let (correct_count, incorrect_count) = prior
            .map(|s| (s.correct_count, s.incorrect_count))
            .unwrap_or((0, 0));

        Self {
            word: word.into(),
            correct_count: correct_count + u32::from(correct),
            incorrect_count: incorrect_count + u32::from(!correct),
            last_reviewed: now,
            next_review: result.next_review,
            ease_factor: result.ease_factor.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR),
            interval: result.interval,
        }
    }

    /// Check if the word is due for review
    pub fn is_due(&self, now: f64) -> bool {
        self.next_review <= now
    }

    pub fn review_count(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }
}

/// Ordering for listing saved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordOrder {
    /// The order words were saved in, as the review selector expects
    #[default]
    Insertion,
    NewestFirst,
    OldestFirst,
}

/// Where a saved word stands for the next review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewCategory {
    /// Never answered
    New,
    /// Scheduled time has passed
    Due,
    /// Scheduled for later
    Future,
}

/// Counts per category across all saved words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub total_words: usize,
    pub new_words: usize,
    pub due_words: usize,
    pub future_words: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(interval: f64, ease_factor: f64) -> ReviewResult {
        ReviewResult {
            next_review: 1000.0 + interval * 86_400.0,
            interval,
            ease_factor,
        }
    }

    #[test]
    fn test_first_answer_counts() {
        let stats = ReviewStats::after_answer("你好", None, true, &result(1.0, 2.5), 1000.0);
        assert_eq!(stats.correct_count, 1);
        assert_eq!(stats.incorrect_count, 0);
        assert_eq!(stats.last_reviewed, 1000.0);
        assert_eq!(stats.next_review, 1000.0 + 86_400.0);
        assert_eq!(stats.review_count(), 1);
    }

    #[test]
    fn test_counts_accumulate() {
        let first = ReviewStats::after_answer("你好", None, false, &result(1.0, 2.3), 1000.0);
        let second =
            ReviewStats::after_answer("你好", Some(&first), false, &result(1.0, 2.1), 2000.0);
        assert_eq!(second.incorrect_count, 2);
        assert_eq!(second.correct_count, 0);
        assert_eq!(second.last_reviewed, 2000.0);
    }

    #[test]
    fn test_ease_factor_clamped() {
        let stats = ReviewStats::after_answer("好", None, false, &result(1.0, 0.4), 0.0);
        assert_eq!(stats.ease_factor, MIN_EASE_FACTOR);
        let stats = ReviewStats::after_answer("好", None, true, &result(1.0, 3.0), 0.0);
        assert_eq!(stats.ease_factor, MAX_EASE_FACTOR);
    }

    #[test]
    fn test_saved_word_from_lookup() {
        let lookup = LookupResult {
            traditional: "學生".to_string(),
            simplified: "学生".to_string(),
            pinyin: "xué shēng".to_string(),
            definitions: vec!["student".to_string(), "schoolchild".to_string()],
            is_composite: false,
        };
        let word = SavedWord::from_lookup("學生", &lookup, 42.0);
        assert_eq!(word.word, "學生");
        assert_eq!(word.simplified, "学生");
        assert_eq!(word.definitions, "student\nschoolchild");
        assert_eq!(
            word.definition_lines().collect::<Vec<_>>(),
            vec!["student", "schoolchild"]
        );
    }
}
