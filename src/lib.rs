//! Chinese reading assistant
//!
//! Looks words up in CC-CEDICT, renders pinyin with tone marks, breaks
//! unknown compounds into known parts, and schedules saved words for
//! spaced-repetition review.

pub mod clock;
pub mod config;
pub mod dictionary;
pub mod flashcards;
pub mod reader;

pub use config::ReaderConfig;
pub use dictionary::{Dictionary, LookupResult};
pub use reader::{Reader, ReaderError, SaveToggle, Segmenter};
