use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_lookup;
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = word.trim();
    let result = app.reader.lookup(word)?;
    let saved = app.reader.is_saved(word)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": word,
                "result": result,
                "saved": saved,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match result {
            Some(result) => {
                println!("{}", render_lookup(&result, use_color));
                if saved {
                    println!("\n(saved for review)");
                }
            }
            None => println!("No entry for '{}'", word),
        },
    }

    Ok(())
}
