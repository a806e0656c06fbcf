//! Review session state
//!
//! A session walks through a fixed list of selected words. It is owned
//! by the caller; `ReviewSessions` keeps one session per owner key for
//! callers serving several users.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::models::SavedWord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Review session expired")]
    SessionExpired,

    #[error("Word mismatch: current card is {expected}, got {actual}")]
    WordMismatch { expected: String, actual: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No session
    Inactive,
    /// Showing the card at `index`
    Active { index: usize },
    /// Every card answered
    Complete,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    id: Uuid,
    words: Vec<SavedWord>,
    current_index: usize,
    total_words: usize,
}

impl ReviewSession {
    pub fn new(words: Vec<SavedWord>) -> Self {
        let total_words = words.len();
        Self {
            id: Uuid::new_v4(),
            words,
            current_index: 0,
            total_words,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn words(&self) -> &[SavedWord] {
        &self.words
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    /// The card being shown, None once complete
    pub fn current_word(&self) -> Option<&SavedWord> {
        self.words.get(self.current_index)
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.words.len()
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::Active {
                index: self.current_index,
            }
        }
    }

    /// One-based card number and total, for "Card 2 of 10"
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.is_complete() {
            None
        } else {
            Some((self.current_index + 1, self.total_words))
        }
    }

    /// The current card, checked against the word the caller thinks is current
    pub fn check_current(&self, word: &str) -> Result<&SavedWord, SessionError> {
        let current = self.current_word().ok_or(SessionError::SessionExpired)?;
        if current.word != word {
            return Err(SessionError::WordMismatch {
                expected: current.word.clone(),
                actual: word.to_string(),
            });
        }
        Ok(current)
    }

    /// Move to the next card. Returns true while cards remain.
    pub fn advance(&mut self) -> bool {
        if !self.is_complete() {
            self.current_index += 1;
        }
        !self.is_complete()
    }
}

/// Sessions keyed by owner (user or client identifier)
#[derive(Debug, Default)]
pub struct ReviewSessions {
    sessions: HashMap<String, ReviewSession>,
}

impl ReviewSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `owner`, discarding any previous one
    pub fn start(
        &mut self,
        owner: impl Into<String>,
        session: ReviewSession,
    ) -> &mut ReviewSession {
        let owner = owner.into();
        if let Some(previous) = self.sessions.remove(&owner) {
            log::debug!(
                "Replacing review session {} for {} at card {}",
                previous.id,
                owner,
                previous.current_index
            );
        }
        self.sessions.entry(owner).or_insert(session)
    }

    pub fn get(&self, owner: &str) -> Option<&ReviewSession> {
        self.sessions.get(owner)
    }

    pub fn get_mut(&mut self, owner: &str) -> Option<&mut ReviewSession> {
        self.sessions.get_mut(owner)
    }

    pub fn state(&self, owner: &str) -> SessionState {
        self.get(owner)
            .map_or(SessionState::Inactive, ReviewSession::state)
    }

    /// End the session for `owner`, returning it if there was one
    pub fn end(&mut self, owner: &str) -> Option<ReviewSession> {
        self.sessions.remove(owner)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
