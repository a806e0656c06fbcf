use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let summary = app.reader.review_summary()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!("Saved words: {}", summary.total_words);
            println!("  New:       {}", summary.new_words);
            println!("  Due:       {}", summary.due_words);
            println!("  Scheduled: {}", summary.future_words);
        }
    }

    Ok(())
}
