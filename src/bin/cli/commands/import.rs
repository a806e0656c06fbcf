use anyhow::{Context, Result};

use hanzi_reader::dictionary::SqliteLexicon;
use hanzi_reader::ReaderConfig;

use crate::OutputFormat;

pub fn run(config: &ReaderConfig, force: bool, format: &OutputFormat) -> Result<()> {
    let db_path = config.dictionary_db();
    let cedict_path = config.cedict_path();

    if db_path.exists() && !force {
        let lexicon = SqliteLexicon::open(&db_path, &cedict_path)
            .context("Failed to open dictionary index")?;
        let entries = lexicon.len()?;
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "rebuilt": false,
                    "database": db_path.to_string_lossy(),
                    "entries": entries,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Plain => {
                println!(
                    "Dictionary index already exists at {} ({} entries). Use --force to rebuild.",
                    db_path.display(),
                    entries
                );
            }
        }
        return Ok(());
    }

    let (lexicon, report) = SqliteLexicon::rebuild(&db_path, &cedict_path)
        .with_context(|| format!("Failed to import {}", cedict_path.display()))?;
    let entries = lexicon.len()?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "rebuilt": true,
                "database": db_path.to_string_lossy(),
                "source": cedict_path.to_string_lossy(),
                "report": report,
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} entries from {}", report.loaded, cedict_path.display());
            if report.skipped > 0 {
                println!("Skipped {} malformed lines", report.skipped);
            }
            println!("Index: {} ({} unique entries)", db_path.display(), entries);
        }
    }

    Ok(())
}
