use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_annotation;
use crate::OutputFormat;

pub fn run(app: &App, text: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let annotations = app.reader.annotate(text)?;

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = annotations
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "text": a.text,
                        "result": a.result,
                        "saved": a.saved,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for annotation in &annotations {
                println!("{}", render_annotation(annotation, use_color));
            }
        }
    }

    Ok(())
}
