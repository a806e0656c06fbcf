use anyhow::Result;

use hanzi_reader::clock::to_datetime;
use hanzi_reader::flashcards::WordOrder;

use crate::app::App;
use crate::render::terminal::{headword, paint, review_status, Color};
use crate::OutputFormat;

pub fn run(app: &App, oldest_first: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let order = if oldest_first {
        WordOrder::OldestFirst
    } else {
        WordOrder::NewestFirst
    };
    let words = app.reader.saved_words(order)?;
    let now = app.reader.now();

    match format {
        OutputFormat::Json => {
            let mut output = Vec::new();
            for word in &words {
                let stats = app.reader.stats_for(&word.word)?;
                output.push(serde_json::json!({
                    "word": word,
                    "stats": stats,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No saved words. Use 'hanzi save <word>' to add one.");
                return Ok(());
            }

            for word in &words {
                let saved_on = to_datetime(word.timestamp)
                    .map(|dt| dt.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let stats = app.reader.stats_for(&word.word)?;
                let due = review_status(stats.as_ref(), now);
                println!(
                    "{}  {}",
                    headword(&word.traditional, &word.simplified, &word.pinyin, use_color),
                    paint(&format!("[{}, {}]", saved_on, due), Color::DIM, use_color)
                );
            }
            println!("\n{} words", words.len());
        }
    }

    Ok(())
}
