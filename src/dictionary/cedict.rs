//! CC-CEDICT source parsing
//!
//! Line format:
//! ```text
//! 中國 中国 [Zhong1 guo2] /China/Middle Kingdom/
//! ```
//! Lines starting with `#` are comments. Any other line that does not
//! fit the format is skipped with a warning rather than failing the load.

use std::io::BufRead;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::models::LexiconEntry;

const LINE_PATTERN: &str = r"^(\S+)\s+(\S+)\s+\[(.*?)\]\s+/(.+)/$";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CedictParseError {
    #[error("Malformed lexicon line {line_number}: {reason}")]
    MalformedLine { line_number: usize, reason: String },
}

/// Counts reported after reading a CEDICT source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub loaded: usize,
    pub skipped: usize,
}

pub struct CedictParser {
    line_re: Regex,
}

impl CedictParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            line_re: Regex::new(LINE_PATTERN)?,
        })
    }

    /// Parse one line. Comments and blank lines yield `Ok(None)`.
    pub fn parse_line(
        &self,
        line_number: usize,
        line: &str,
    ) -> Result<Option<LexiconEntry>, CedictParseError> {
        if line.starts_with('#') {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let caps = self
            .line_re
            .captures(line)
            .ok_or_else(|| CedictParseError::MalformedLine {
                line_number,
                reason: "expected `TRAD SIMP [pinyin] /definitions/`".to_string(),
            })?;

        Ok(Some(LexiconEntry::from_raw(
            &caps[1], &caps[2], &caps[3], &caps[4],
        )))
    }

    /// Read every entry from a CEDICT source, skipping malformed lines.
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> std::io::Result<(Vec<LexiconEntry>, ImportReport)> {
        let mut entries = Vec::new();
        let mut report = ImportReport::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            match self.parse_line(index + 1, &line) {
                Ok(Some(entry)) => {
                    entries.push(entry);
                    report.loaded += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("{}", e);
                    report.skipped += 1;
                }
            }
        }

        Ok((entries, report))
    }
}
