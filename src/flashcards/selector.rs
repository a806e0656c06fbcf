//! Choosing which saved words to review next
//!
//! Words fall into three groups:
//! - New words (never answered) always come first, in save order
//! - Due words, most urgent first: days overdue plus incorrect answers
//! - Future words, highest first: incorrect answers minus days until due
//!
//! The combined list is cut to the session limit.

use std::collections::HashMap;

use crate::clock::SECONDS_PER_DAY;

use super::models::{ReviewCategory, ReviewStats, ReviewSummary, SavedWord};

/// Categorize a word by its stats at time `now`
pub fn categorize(stats: Option<&ReviewStats>, now: f64) -> ReviewCategory {
    match stats {
        None => ReviewCategory::New,
        Some(s) if s.is_due(now) => ReviewCategory::Due,
        Some(_) => ReviewCategory::Future,
    }
}

/// Urgency of a due word; larger is more urgent
pub fn due_priority(stats: &ReviewStats, now: f64) -> f64 {
    (now - stats.next_review) / SECONDS_PER_DAY + f64::from(stats.incorrect_count)
}

/// Priority of a word not yet due; may be negative
pub fn future_priority(stats: &ReviewStats, now: f64) -> f64 {
    f64::from(stats.incorrect_count) - (stats.next_review - now) / SECONDS_PER_DAY
}

/// Select up to `limit` words for a review session.
///
/// `saved` must be in save order; new words keep that order.
pub fn select_for_review(
    saved: &[SavedWord],
    stats: &HashMap<String, ReviewStats>,
    limit: usize,
    now: f64,
) -> Vec<SavedWord> {
    let mut new_words = Vec::new();
    let mut due_words = Vec::new();
    let mut future_words = Vec::new();

    for word in saved {
        match stats.get(&word.word) {
            None => new_words.push(word),
            Some(s) if s.is_due(now) => due_words.push((due_priority(s, now), word)),
            Some(s) => future_words.push((future_priority(s, now), word)),
        }
    }

    // Stable sorts, so equal priorities keep save order
    due_words.sort_by(|a, b| b.0.total_cmp(&a.0));
    future_words.sort_by(|a, b| b.0.total_cmp(&a.0));

    new_words
        .into_iter()
        .chain(due_words.into_iter().map(|(_, w)| w))
        .chain(future_words.into_iter().map(|(_, w)| w))
        .take(limit)
        .cloned()
        .collect()
}

/// Count saved words per review category
pub fn summarize(
    saved: &[SavedWord],
    stats: &HashMap<String, ReviewStats>,
    now: f64,
) -> ReviewSummary {
    let mut summary = ReviewSummary {
        total_words: saved.len(),
        ..Default::default()
    };

    for word in saved {
        match categorize(stats.get(&word.word), now) {
            ReviewCategory::New => summary.new_words += 1,
            ReviewCategory::Due => summary.due_words += 1,
            ReviewCategory::Future => summary.future_words += 1,
        }
    }

    summary
}
