//! Modified SM-2 Spaced Repetition Algorithm
//!
//! Answers are binary (correct / incorrect) rather than graded 0-5:
//! - Correct: the interval is multiplied by the ease factor, and the
//!   ease factor grows by 0.1 up to 2.5
//! - Incorrect: the interval resets to one day, and the ease factor
//!   drops by 0.2 down to 1.3
//!
//! An interval of exactly one day is treated as a first review and
//! stays at one day when answered correctly. That covers brand new
//! words and words that were just failed alike.

use crate::clock::SECONDS_PER_DAY;

use super::models::{
    ReviewStats, DEFAULT_EASE_FACTOR, DEFAULT_INTERVAL, MAX_EASE_FACTOR, MIN_EASE_FACTOR,
};

const EASE_BONUS: f64 = 0.1;
const EASE_PENALTY: f64 = 0.2;

/// Result of calculating the next review
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewResult {
    /// Epoch seconds when the word is due again
    pub next_review: f64,
    /// New interval in days
    pub interval: f64,
    pub ease_factor: f64,
}

/// Calculate the next review time, interval and ease factor.
///
/// # Arguments
/// * `correct` - Whether the word was recalled
/// * `stats` - Prior stats, or None for a word never answered
/// * `now` - Current time in epoch seconds
pub fn calculate_next_review(correct: bool, stats: Option<&ReviewStats>, now: f64) -> ReviewResult {
    let mut ease_factor = stats.map_or(DEFAULT_EASE_FACTOR, |s| s.ease_factor);
    let mut interval = stats.map_or(DEFAULT_INTERVAL, |s| s.interval);

    if correct {
        if interval != DEFAULT_INTERVAL {
            interval *= ease_factor;
        }
        ease_factor = (ease_factor + EASE_BONUS).min(MAX_EASE_FACTOR);
    } else {
        interval = DEFAULT_INTERVAL;
        ease_factor = (ease_factor - EASE_PENALTY).max(MIN_EASE_FACTOR);
    }

    log::debug!(
        "next review: correct={} interval={} ease_factor={}",
        correct,
        interval,
        ease_factor
    );

    ReviewResult {
        next_review: now + interval * SECONDS_PER_DAY,
        interval,
        ease_factor,
    }
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: f64) -> String {
    let days = days.round() as i64;
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

/// Format the gap between `now` and a due time, e.g. "in 3d" or "2d overdue"
pub fn format_due(next_review: f64, now: f64) -> String {
    let days = (next_review - now) / SECONDS_PER_DAY;
    if days >= 0.0 {
        match format_interval(days).as_str() {
            "now" => "due now".to_string(),
            span => format!("in {}", span),
        }
    } else {
        match format_interval(-days).as_str() {
            "now" => "due now".to_string(),
            span => format!("{} overdue", span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    fn stats(interval: f64, ease_factor: f64) -> ReviewStats {
        ReviewStats {
            word: "你好".to_string(),
            correct_count: 3,
            incorrect_count: 1,
            last_reviewed: NOW - SECONDS_PER_DAY,
            next_review: NOW,
            ease_factor,
            interval,
        }
    }

    fn answer(prior: Option<&ReviewStats>, correct: bool) -> ReviewStats {
        let result = calculate_next_review(correct, prior, NOW);
        ReviewStats::after_answer("你好", prior, correct, &result, NOW)
    }

    #[test]
    fn test_first_review_correct() {
        let result = calculate_next_review(true, None, NOW);
        assert_eq!(result.interval, 1.0);
        assert_eq!(result.ease_factor, 2.5);
        assert_eq!(result.next_review, NOW + SECONDS_PER_DAY);
    }

    #[test]
    fn test_first_review_incorrect() {
        let result = calculate_next_review(false, None, NOW);
        assert_eq!(result.interval, 1.0);
        assert!((result.ease_factor - 2.3).abs() < 1e-9);
        assert_eq!(result.next_review, NOW + SECONDS_PER_DAY);
    }

    #[test]
    fn test_subsequent_review_correct() {
        let prior = stats(6.0, 2.0);
        let result = calculate_next_review(true, Some(&prior), NOW);

        // 6 * 2.0 = 12
        assert_eq!(result.interval, 12.0);
        assert!((result.ease_factor - 2.1).abs() < 1e-9);
        assert_eq!(result.next_review, NOW + 12.0 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_review_incorrect_resets() {
        let prior = stats(30.0, 2.5);
        let result = calculate_next_review(false, Some(&prior), NOW);
        assert_eq!(result.interval, 1.0);
        assert!((result.ease_factor - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_one_day_interval_stays_after_failure() {
        // A failed word answered correctly repeats at one day
        let failed = answer(Some(&stats(12.0, 2.0)), false);
        assert_eq!(failed.interval, 1.0);

        let recovered = answer(Some(&failed), true);
        assert_eq!(recovered.interval, 1.0);
        assert!(recovered.ease_factor > failed.ease_factor);
    }

    #[test]
    fn test_repeated_correct_answers() {
        let mut current = answer(None, true);
        for _ in 0..10 {
            let next = answer(Some(&current), true);
            assert!(next.ease_factor >= current.ease_factor);
            assert!(next.ease_factor <= MAX_EASE_FACTOR);
            current = next;
        }
        assert_eq!(current.ease_factor, MAX_EASE_FACTOR);
        assert_eq!(current.interval, 1.0);
        assert_eq!(current.correct_count, 11);
    }

    #[test]
    fn test_repeated_correct_answers_grow_interval() {
        let mut current = stats(2.0, 1.5);
        for _ in 0..5 {
            let next = answer(Some(&current), true);
            assert!(next.interval > current.interval);
            assert!(next.ease_factor >= current.ease_factor);
            current = next;
        }
    }

    #[test]
    fn test_repeated_incorrect_answers() {
        let mut current = stats(20.0, 2.5);
        for _ in 0..10 {
            let next = answer(Some(&current), false);
            assert!(next.ease_factor <= current.ease_factor);
            assert!(next.ease_factor >= MIN_EASE_FACTOR);
            assert_eq!(next.interval, 1.0);
            current = next;
        }
        assert_eq!(current.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0.0), "now");
        assert_eq!(format_interval(1.0), "1d");
        assert_eq!(format_interval(5.0), "5d");
        assert_eq!(format_interval(7.0), "1w");
        assert_eq!(format_interval(14.0), "2w");
        assert_eq!(format_interval(30.0), "1mo");
        assert_eq!(format_interval(90.0), "3mo");
        assert_eq!(format_interval(365.0), "1y");
        assert_eq!(format_interval(730.0), "2y");
    }

    #[test]
    fn test_format_due() {
        assert_eq!(format_due(NOW + 3.0 * SECONDS_PER_DAY, NOW), "in 3d");
        assert_eq!(format_due(NOW - 2.0 * SECONDS_PER_DAY, NOW), "2d overdue");
        assert_eq!(format_due(NOW + 60.0, NOW), "due now");
    }
}
