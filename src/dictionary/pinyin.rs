//! Numeric pinyin to tone-mark conversion
//!
//! CEDICT stores readings as `ni3 hao3`; readers expect `nǐ hǎo`.
//! Each syllable takes its tone from the first digit it contains and
//! the mark goes on the first vowel present in the order `a e o i u ü`,
//! regardless of where it sits in the syllable (`liu` marks the `i`).

/// Marked variants for tones 1-4 followed by the neutral (unmarked) form.
const LOWER_MARKS: [(char, [char; 5]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à', 'a']),
    ('e', ['ē', 'é', 'ě', 'è', 'e']),
    ('o', ['ō', 'ó', 'ǒ', 'ò', 'o']),
    ('i', ['ī', 'í', 'ǐ', 'ì', 'i']),
    ('u', ['ū', 'ú', 'ǔ', 'ù', 'u']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü']),
];

const UPPER_MARKS: [(char, [char; 5]); 6] = [
    ('A', ['Ā', 'Á', 'Ǎ', 'À', 'A']),
    ('E', ['Ē', 'É', 'Ě', 'È', 'E']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò', 'O']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì', 'I']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù', 'U']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ', 'Ü']),
];

/// Mark placement priority
const VOWEL_PRIORITY: [char; 6] = ['a', 'e', 'o', 'i', 'u', 'ü'];

/// Convert a whitespace-separated numeric pinyin reading to tone marks.
///
/// Syllables without a digit pass through unchanged. The result is
/// rejoined with single spaces.
pub fn to_tone_marks(pinyin: &str) -> String {
    pinyin
        .split_whitespace()
        .map(syllable_to_tone_marks)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a single numeric pinyin syllable.
pub fn syllable_to_tone_marks(syllable: &str) -> String {
    let Some(tone) = syllable.chars().find_map(|c| c.to_digit(10)) else {
        return syllable.to_string();
    };

    let stripped: String = syllable.chars().filter(|c| !c.is_ascii_digit()).collect();
    let mut chars: Vec<char> = normalize_umlaut(&stripped).chars().collect();

    if let Some(pos) = marked_vowel_position(&chars) {
        chars[pos] = apply_tone(chars[pos], tone_index(tone));
    }

    chars.into_iter().collect()
}

/// `u:` and `v` are the ASCII spellings of `ü`
fn normalize_umlaut(base: &str) -> String {
    base.replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

/// Tones 1-5 map to table slots 0-4; 0 and anything above 5 are read as tone 1.
fn tone_index(tone: u32) -> usize {
    match tone {
        1..=5 => (tone - 1) as usize,
        _ => 0,
    }
}

fn fold_case(c: char) -> char {
    match c {
        'Ü' => 'ü',
        other => other.to_ascii_lowercase(),
    }
}

fn marked_vowel_position(chars: &[char]) -> Option<usize> {
    VOWEL_PRIORITY
        .iter()
        .find_map(|&vowel| chars.iter().position(|&c| fold_case(c) == vowel))
}

fn apply_tone(vowel: char, index: usize) -> char {
    LOWER_MARKS
        .iter()
        .chain(UPPER_MARKS.iter())
        .find(|(plain, _)| *plain == vowel)
        .map(|(_, marks)| marks[index])
        .unwrap_or(vowel)
}
