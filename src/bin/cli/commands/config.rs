use std::path::Path;

use anyhow::Result;

use hanzi_reader::ReaderConfig;

use crate::OutputFormat;

pub fn run(
    config: &ReaderConfig,
    path: Option<&Path>,
    init: bool,
    format: &OutputFormat,
) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => ReaderConfig::default_path()?,
    };

    let created = if init && !path.exists() {
        config.save(&path)?;
        log::info!("Wrote default config to {}", path.display());
        true
    } else {
        false
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path.to_string_lossy(),
                "exists": path.exists(),
                "created": created,
                "config": config,
                "resolved": {
                    "cedictPath": config.cedict_path().to_string_lossy(),
                    "dictionaryDb": config.dictionary_db().to_string_lossy(),
                    "wordsDb": config.words_db().to_string_lossy(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if created {
                println!("Created {}", path.display());
            } else if init {
                println!("{} already exists, left unchanged", path.display());
            }
            println!("Config file:    {}", path.display());
            println!("Data directory: {}", config.data_dir.display());
            println!("CEDICT source:  {}", config.cedict_path().display());
            println!("Dictionary db:  {}", config.dictionary_db().display());
            println!("Saved words db: {}", config.words_db().display());
            println!("Review limit:   {}", config.review_limit);
            println!("Log level:      {}", config.log_level);
        }
    }

    Ok(())
}
