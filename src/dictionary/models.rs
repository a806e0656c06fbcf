//! Data models for dictionary lookups

use serde::{Deserialize, Serialize};

use super::pinyin::to_tone_marks;

/// A CEDICT-style record as stored in the lexicon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    pub traditional: String,
    pub simplified: String,
    /// Space-separated numeric syllables, e.g. `ni3 hao3`
    pub pinyin_numeric: String,
    pub definitions: Vec<String>,
}

impl LexiconEntry {
    pub fn new(
        traditional: impl Into<String>,
        simplified: impl Into<String>,
        pinyin_numeric: impl Into<String>,
        definitions: Vec<String>,
    ) -> Self {
        Self {
            traditional: traditional.into(),
            simplified: simplified.into(),
            pinyin_numeric: pinyin_numeric.into(),
            definitions,
        }
    }

    /// Build an entry from the slash-delimited definition field CEDICT uses
    pub fn from_raw(
        traditional: impl Into<String>,
        simplified: impl Into<String>,
        pinyin_numeric: impl Into<String>,
        raw_definitions: &str,
    ) -> Self {
        Self::new(
            traditional,
            simplified,
            pinyin_numeric,
            split_definitions(raw_definitions),
        )
    }

    /// Definitions joined back into the stored `a/b/c` form
    pub fn raw_definitions(&self) -> String {
        self.definitions.join("/")
    }

    /// True if `key` matches either script
    pub fn matches(&self, key: &str) -> bool {
        self.simplified == key || self.traditional == key
    }

    pub fn first_definition(&self) -> &str {
        self.definitions.first().map(String::as_str).unwrap_or("")
    }

    /// Render as a non-composite lookup result
    pub fn to_result(&self) -> LookupResult {
        LookupResult {
            traditional: self.traditional.clone(),
            simplified: self.simplified.clone(),
            pinyin: to_tone_marks(&self.pinyin_numeric),
            definitions: self.definitions.clone(),
            is_composite: false,
        }
    }
}

pub fn split_definitions(raw: &str) -> Vec<String> {
    raw.split('/').map(str::to_string).collect()
}

/// What a lookup hands back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub traditional: String,
    pub simplified: String,
    /// Tone-marked pinyin
    pub pinyin: String,
    pub definitions: Vec<String>,
    /// Synthesized from smaller entries rather than matched directly
    #[serde(default)]
    pub is_composite: bool,
}

impl LookupResult {
    /// Definitions as stored on a saved word
    pub fn joined_definitions(&self) -> String {
        self.definitions.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_splits_definitions() {
        let entry = LexiconEntry::from_raw("你好", "你好", "ni3 hao3", "hello/hi");
        assert_eq!(entry.definitions, vec!["hello", "hi"]);
        assert_eq!(entry.raw_definitions(), "hello/hi");
        assert_eq!(entry.first_definition(), "hello");
    }

    #[test]
    fn test_matches_either_script() {
        let entry = LexiconEntry::from_raw("國", "国", "guo2", "country");
        assert!(entry.matches("国"));
        assert!(entry.matches("國"));
        assert!(!entry.matches("果"));
    }

    #[test]
    fn test_to_result_converts_pinyin() {
        let entry = LexiconEntry::from_raw("中國", "中国", "Zhong1 guo2", "China");
        let result = entry.to_result();
        assert_eq!(result.pinyin, "Zhōng guó");
        assert!(!result.is_composite);
        assert_eq!(result.joined_definitions(), "China");
    }
}
