//! Saved words and spaced repetition review
//!
//! This module provides:
//! - Saved word and review stats storage (SQLite)
//! - Modified SM-2 scheduling for binary answers
//! - Review selection across new, due and future words
//! - Review session state

pub mod algorithm;
pub mod models;
pub mod selector;
pub mod session;
pub mod storage;

pub use algorithm::{calculate_next_review, format_due, format_interval, ReviewResult};
pub use models::*;
pub use selector::{select_for_review, summarize};
pub use session::{ReviewSession, ReviewSessions, SessionError, SessionState};
pub use storage::{SavedWordStore, StatsStore, WordStorage, WordStorageError};
