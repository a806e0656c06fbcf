//! The reader: dictionary lookups, saved words and review sessions
//!
//! Presentation layers (CLI, web handlers) talk to this type only.
//! Review sessions are handed to the caller, which decides who owns them
//! (see `ReviewSessions` for keyed ownership).

use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::config::ReaderConfig;
use crate::dictionary::{Dictionary, DictionaryError, LexiconStore, LookupResult, SqliteLexicon};
use crate::flashcards::{
    calculate_next_review, select_for_review, summarize, ReviewSession, ReviewStats,
    ReviewSummary, SavedWord, SavedWordStore, SessionError, StatsStore, WordOrder, WordStorage,
    WordStorageError,
};

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Word not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Storage(#[from] WordStorageError),
}

pub type Result<T> = std::result::Result<T, ReaderError>;

/// Splits raw text into candidate words for lookup
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Splits on whitespace and punctuation, keeping each punctuation mark
/// as its own segment. Runs of Chinese characters stay together.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c,
            '\u{3000}'..='\u{303F}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}'
            | '\u{2018}'..='\u{201F}'
            | '\u{2026}')
}

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = String::new();

        for c in text.chars() {
            if c.is_whitespace() || is_punctuation(c) {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                if !c.is_whitespace() {
                    segments.push(c.to_string());
                }
            } else {
                current.push(c);
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Outcome of toggling a word's saved state
#[derive(Debug, Clone, PartialEq)]
pub enum SaveToggle {
    Saved(SavedWord),
    Removed(String),
}

/// A segment of annotated text
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub result: Option<LookupResult>,
    pub saved: bool,
}

pub struct Reader<L, S> {
    dictionary: Dictionary<L>,
    words: S,
    clock: Box<dyn Clock>,
    segmenter: Box<dyn Segmenter>,
}

impl Reader<SqliteLexicon, WordStorage> {
    /// Open the dictionary index and word database named by `config`.
    ///
    /// Fails if the dictionary index does not exist and the CEDICT source
    /// is missing.
    pub fn open(config: &ReaderConfig) -> Result<Self> {
        let dictionary = Dictionary::open(&config.dictionary_db(), &config.cedict_path())?;
        let words = WordStorage::open(&config.words_db())?;
        Ok(Self::new(dictionary, words))
    }
}

impl<L, S> Reader<L, S>
where
    L: LexiconStore,
    S: SavedWordStore + StatsStore,
{
    pub fn new(dictionary: Dictionary<L>, words: S) -> Self {
        Self {
            dictionary,
            words,
            clock: Box::new(SystemClock),
            segmenter: Box::new(WhitespaceSegmenter),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    pub fn dictionary(&self) -> &Dictionary<L> {
        &self.dictionary
    }

    pub fn words(&self) -> &S {
        &self.words
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    // ==================== Lookup ====================

    pub fn lookup(&self, word: &str) -> Result<Option<LookupResult>> {
        Ok(self.dictionary.lookup(word)?)
    }

    /// Segment `text` and look up every segment
    pub fn annotate(&self, text: &str) -> Result<Vec<Annotation>> {
        self.segmenter
            .segment(text)
            .into_iter()
            .map(|segment| -> Result<Annotation> {
                let result = self.dictionary.lookup(&segment)?;
                let saved = self.words.word_exists(&segment)?;
                Ok(Annotation {
                    text: segment,
                    result,
                    saved,
                })
            })
            .collect()
    }

    // ==================== Saved Words ====================

    /// Save `word` if it is not saved yet, otherwise remove it with its stats
    pub fn toggle_save(&self, word: &str) -> Result<SaveToggle> {
        let result = self
            .dictionary
            .lookup(word)?
            .ok_or_else(|| ReaderError::NotFound(word.to_string()))?;

        if self.words.word_exists(word)? {
            self.words.delete_word(word)?;
            log::info!("Removed saved word {}", word);
            return Ok(SaveToggle::Removed(word.to_string()));
        }

        let saved = SavedWord::from_lookup(word, &result, self.now());
        self.words.insert_word(&saved)?;
        log::info!("Saved word {}", word);
        Ok(SaveToggle::Saved(saved))
    }

    pub fn is_saved(&self, word: &str) -> Result<bool> {
        Ok(self.words.word_exists(word)?)
    }

    pub fn saved_words(&self, order: WordOrder) -> Result<Vec<SavedWord>> {
        Ok(self.words.list_words(order)?)
    }

    // ==================== Review ====================

    /// Select words and start a session. None when nothing is saved.
    pub fn start_review(&self, limit: usize) -> Result<Option<ReviewSession>> {
        let saved = self.words.list_words(WordOrder::Insertion)?;
        if saved.is_empty() {
            return Ok(None);
        }

        let stats = self.words.all_stats()?;
        let selected = select_for_review(&saved, &stats, limit, self.now());
        if selected.is_empty() {
            return Ok(None);
        }

        let session = ReviewSession::new(selected);
        log::info!(
            "Started review session {} with {} words",
            session.id(),
            session.total_words()
        );
        Ok(Some(session))
    }

    /// The current card of `session`, checked against `word`
    pub fn reveal_current<'s>(
        &self,
        session: Option<&'s ReviewSession>,
        word: &str,
    ) -> Result<&'s SavedWord> {
        let session = session.ok_or(SessionError::SessionExpired)?;
        Ok(session.check_current(word)?)
    }

    /// Record the answer for the current card and move on.
    /// Returns true while cards remain.
    pub fn answer_current(
        &self,
        session: Option<&mut ReviewSession>,
        word: &str,
        correct: bool,
    ) -> Result<bool> {
        let session = session.ok_or(SessionError::SessionExpired)?;
        let current = session.check_current(word)?.word.clone();

        if self.words.word_exists(&current)? {
            self.record_answer(&current, correct)?;
        } else {
            log::warn!("{} was removed during review, answer not recorded", current);
        }
        Ok(session.advance())
    }

    /// Update a word's review stats for one answer. The word must be saved.
    pub fn record_answer(&self, word: &str, correct: bool) -> Result<ReviewStats> {
        if !self.words.word_exists(word)? {
            return Err(ReaderError::NotFound(word.to_string()));
        }

        let now = self.now();
        let prior = self.words.get_stats(word)?;
        let result = calculate_next_review(correct, prior.as_ref(), now);
        let stats = ReviewStats::after_answer(word, prior.as_ref(), correct, &result, now);
        self.words.upsert_stats(&stats)?;
        Ok(stats)
    }

    /// End a session. Answers already given stay recorded.
    pub fn end_review(&self, session: ReviewSession) {
        log::info!(
            "Ended review session {} at card {} of {}",
            session.id(),
            session.current_index(),
            session.total_words()
        );
    }

    pub fn review_summary(&self) -> Result<ReviewSummary> {
        let saved = self.words.list_words(WordOrder::Insertion)?;
        let stats = self.words.all_stats()?;
        Ok(summarize(&saved, &stats, self.now()))
    }

    pub fn stats_for(&self, word: &str) -> Result<Option<ReviewStats>> {
        Ok(self.words.get_stats(word)?)
    }
}
