//! Chinese dictionary lookups
//!
//! This module provides:
//! - CC-CEDICT parsing and an indexed SQLite lexicon
//! - Numeric pinyin to tone-mark conversion
//! - Exact lookup with a greedy decomposition fallback for unknown compounds

pub mod cedict;
pub mod models;
pub mod pinyin;
pub mod storage;

use std::path::Path;

pub use cedict::{CedictParseError, CedictParser, ImportReport};
pub use models::{LexiconEntry, LookupResult};
pub use pinyin::to_tone_marks;
pub use storage::{DictionaryError, LexiconStore, MemoryLexicon, Result, SqliteLexicon};

pub const BREAKDOWN_PREFIX: &str = "Word breakdown: ";
pub const COMPOUND_NOTE: &str = "Note: This is a compound word broken down into components.";

/// How a component was matched during decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Two characters consumed as one entry
    Pair,
    Single,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub entry: LexiconEntry,
}

/// Lookup engine over a lexicon store
pub struct Dictionary<L = SqliteLexicon> {
    store: L,
}

impl Dictionary<SqliteLexicon> {
    /// Open the SQLite index, building it from CEDICT if it does not exist yet
    pub fn open(db_path: &Path, cedict_path: &Path) -> Result<Self> {
        Ok(Self::new(SqliteLexicon::open(db_path, cedict_path)?))
    }
}

impl<L: LexiconStore> Dictionary<L> {
    pub fn new(store: L) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    /// Look up a word by simplified or traditional text.
    ///
    /// Falls back to decomposition for multi-character input with no
    /// direct entry. `Ok(None)` means nothing could be resolved.
    pub fn lookup(&self, word: &str) -> Result<Option<LookupResult>> {
        if let Some(entry) = self.store.lookup(word)? {
            return Ok(Some(entry.to_result()));
        }

        if word.chars().count() <= 1 {
            return Ok(None);
        }

        let components = self.decompose(word)?;
        Ok(compose(word, &components))
    }

    /// Split `word` into known entries, left to right.
    ///
    /// At each position the next two characters are tried as a unit
    /// before falling back to one character. A pair once taken is never
    /// reconsidered. Characters with no entry are skipped.
    pub fn decompose(&self, word: &str) -> Result<Vec<Component>> {
        let chars: Vec<char> = word.chars().collect();
        let mut components = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if i + 1 < chars.len() {
                let pair: String = chars[i..i + 2].iter().collect();
                if let Some(entry) = self.store.lookup(&pair)? {
                    log::debug!("decompose {}: pair {} at {}", word, pair, i);
                    components.push(Component {
                        kind: ComponentKind::Pair,
                        entry,
                    });
                    i += 2;
                    continue;
                }
            }

            let single = chars[i].to_string();
            match self.store.lookup(&single)? {
                Some(entry) => components.push(Component {
                    kind: ComponentKind::Single,
                    entry,
                }),
                None => log::debug!("decompose {}: no entry for {}", word, single),
            }
            i += 1;
        }

        Ok(components)
    }
}

/// Synthesize a composite result from decomposed components
fn compose(word: &str, components: &[Component]) -> Option<LookupResult> {
    if components.is_empty() {
        return None;
    }

    let traditional: String = components
        .iter()
        .map(|c| c.entry.traditional.as_str())
        .collect();
    let simplified: String = components
        .iter()
        .map(|c| c.entry.simplified.as_str())
        .collect();
    let pinyin = components
        .iter()
        .map(|c| to_tone_marks(&c.entry.pinyin_numeric))
        .collect::<Vec<_>>()
        .join(" ");

    let parts = components
        .iter()
        .map(|c| format!("{} ({})", c.entry.simplified, c.entry.first_definition()))
        .collect::<Vec<_>>()
        .join(" + ");

    let mut definitions = vec![format!("{}{}", BREAKDOWN_PREFIX, parts)];
    if simplified != word {
        definitions.push(COMPOUND_NOTE.to_string());
    }

    Some(LookupResult {
        traditional,
        simplified,
        pinyin,
        definitions,
        is_composite: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn entry(trad: &str, simp: &str, pinyin: &str, defs: &str) -> LexiconEntry {
        LexiconEntry::from_raw(trad, simp, pinyin, defs)
    }

    fn sample_dictionary() -> Dictionary<MemoryLexicon> {
        Dictionary::new(
            vec![
                entry("你", "你", "ni3", "you"),
                entry("好", "好", "hao3", "good/well"),
                entry("學", "学", "xue2", "to learn"),
                entry("生", "生", "sheng1", "to be born/student"),
                entry("研究", "研究", "yan2 jiu1", "research"),
                entry("生命", "生命", "sheng1 ming4", "life"),
                entry("和服", "和服", "he2 fu2", "kimono"),
                entry("服務", "服务", "fu2 wu4", "service"),
                entry("和", "和", "he2", "and"),
                entry("服", "服", "fu2", "clothes"),
                entry("務", "务", "wu4", "affair"),
                entry("中國", "中国", "Zhong1 guo2", "China"),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_exact_match() {
        let dict = sample_dictionary();
        let result = dict.lookup("中国").unwrap().unwrap();
        assert_eq!(result.traditional, "中國");
        assert_eq!(result.pinyin, "Zhōng guó");
        assert_eq!(result.definitions, vec!["China"]);
        assert!(!result.is_composite);

        let by_traditional = dict.lookup("中國").unwrap().unwrap();
        assert_eq!(by_traditional.simplified, "中国");
    }

    #[test]
    fn test_single_character_miss() {
        let dict = sample_dictionary();
        assert!(dict.lookup("猫").unwrap().is_none());
        assert!(dict.lookup("").unwrap().is_none());
    }

    #[test]
    fn test_composite_from_single_characters() {
        let dict = sample_dictionary();
        let result = dict.lookup("你好").unwrap().unwrap();

        assert!(result.is_composite);
        assert_eq!(result.simplified, "你好");
        assert_eq!(result.pinyin, "nǐ hǎo");
        assert!(result.definitions[0].starts_with(BREAKDOWN_PREFIX));
        assert_eq!(
            result.definitions[0],
            "Word breakdown: 你 (you) + 好 (good)"
        );
        // Rebuilt text equals the input, so no compound note
        assert_eq!(result.definitions.len(), 1);
    }

    #[test]
    fn test_compound_note_when_text_differs() {
        let dict = sample_dictionary();

        let result = dict.lookup("學生").unwrap().unwrap();
        assert_eq!(result.traditional, "學生");
        assert_eq!(result.simplified, "学生");
        assert_eq!(result.definitions[1], COMPOUND_NOTE);

        // Unknown characters are skipped
        let result = dict.lookup("你x好").unwrap().unwrap();
        assert_eq!(result.simplified, "你好");
        assert_eq!(result.pinyin, "nǐ hǎo");
        assert_eq!(result.definitions.len(), 2);
    }

    #[test]
    fn test_single_resolved_component_still_composite() {
        let dict = sample_dictionary();
        let result = dict.lookup("你?").unwrap().unwrap();
        assert!(result.is_composite);
        assert_eq!(result.definitions[0], "Word breakdown: 你 (you)");
        assert_eq!(result.definitions[1], COMPOUND_NOTE);
    }

    #[test]
    fn test_nothing_resolved() {
        let dict = sample_dictionary();
        assert!(dict.lookup("xyz").unwrap().is_none());
    }

    #[test]
    fn test_pairs_consumed_greedily() {
        let dict = sample_dictionary();
        let components = dict.decompose("研究生命").unwrap();
        let kinds: Vec<_> = components.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ComponentKind::Pair, ComponentKind::Pair]);

        let result = dict.lookup("研究生命").unwrap().unwrap();
        assert_eq!(result.pinyin, "yán jiū shēng mìng");
        assert_eq!(
            result.definitions[0],
            "Word breakdown: 研究 (research) + 生命 (life)"
        );
    }

    #[test]
    fn test_no_backtracking_after_pair() {
        // 和服 wins even though 和 + 服务 reads better
        let dict = sample_dictionary();
        let components = dict.decompose("和服务").unwrap();
        let words: Vec<_> = components
            .iter()
            .map(|c| c.entry.simplified.as_str())
            .collect();
        assert_eq!(words, vec!["和服", "务"]);
    }

    struct CountingLexicon {
        inner: MemoryLexicon,
        queries: RefCell<Vec<String>>,
    }

    impl LexiconStore for CountingLexicon {
        fn lookup(&self, key: &str) -> Result<Option<LexiconEntry>> {
            self.queries.borrow_mut().push(key.to_string());
            self.inner.lookup(key)
        }
    }

    #[test]
    fn test_pair_then_singles_for_remainder() {
        let inner: MemoryLexicon = vec![
            entry("研究", "研究", "yan2 jiu1", "research"),
            entry("研", "研", "yan2", "to grind"),
            entry("究", "究", "jiu1", "after all"),
            entry("你", "你", "ni3", "you"),
            entry("好", "好", "hao3", "good"),
        ]
        .into_iter()
        .collect();
        let dict = Dictionary::new(CountingLexicon {
            inner,
            queries: RefCell::new(Vec::new()),
        });

        let components = dict.decompose("研究你好").unwrap();
        let words: Vec<_> = components
            .iter()
            .map(|c| c.entry.simplified.as_str())
            .collect();
        assert_eq!(words, vec!["研究", "你", "好"]);

        let queries = dict.store().queries.borrow();
        assert_eq!(*queries, vec!["研究", "你好", "你", "好"]);
        assert!(!queries.iter().any(|q| q == "研" || q == "究"));
    }
}
