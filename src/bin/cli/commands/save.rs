use anyhow::Result;

use hanzi_reader::{ReaderError, SaveToggle};

use crate::app::App;
use crate::render::terminal::{paint, render_saved_word, Color};
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = word.trim();
    let outcome = match app.reader.toggle_save(word) {
        Ok(outcome) => outcome,
        Err(ReaderError::NotFound(_)) => {
            anyhow::bail!("'{}' is not in the dictionary and cannot be saved", word)
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Json => {
            let output = match &outcome {
                SaveToggle::Saved(saved) => serde_json::json!({
                    "action": "saved",
                    "word": saved,
                }),
                SaveToggle::Removed(word) => serde_json::json!({
                    "action": "removed",
                    "word": word,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match &outcome {
            SaveToggle::Saved(saved) => {
                println!("{}", paint("Saved", Color::GREEN, use_color));
                println!("{}", render_saved_word(saved, use_color));
            }
            SaveToggle::Removed(word) => {
                println!("{} {}", paint("Removed", Color::YELLOW, use_color), word);
            }
        },
    }

    Ok(())
}
