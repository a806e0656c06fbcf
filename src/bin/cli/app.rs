use anyhow::{Context, Result};

use hanzi_reader::dictionary::SqliteLexicon;
use hanzi_reader::flashcards::WordStorage;
use hanzi_reader::{Reader, ReaderConfig};

/// Shared application state for CLI commands
pub struct App {
    pub config: ReaderConfig,
    pub reader: Reader<SqliteLexicon, WordStorage>,
}

impl App {
    /// Open the dictionary index and saved words named by `config`
    pub fn new(config: ReaderConfig) -> Result<Self> {
        let reader = Reader::open(&config).with_context(|| {
            format!(
                "Failed to open dictionary (index {}, source {})",
                config.dictionary_db().display(),
                config.cedict_path().display()
            )
        })?;

        Ok(Self { config, reader })
    }
}
