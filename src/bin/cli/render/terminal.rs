use hanzi_reader::flashcards::{format_due, ReviewStats, SavedWord};
use hanzi_reader::reader::Annotation;
use hanzi_reader::LookupResult;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap `text` in `color` when colors are on
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Headword line: "學生 / 学生  xué sheng", or a single form when both match
pub fn headword(traditional: &str, simplified: &str, pinyin: &str, use_color: bool) -> String {
    let forms = if traditional == simplified {
        simplified.to_string()
    } else {
        format!("{} / {}", traditional, simplified)
    };
    format!(
        "{}  {}",
        paint(&forms, Color::BOLD, use_color),
        paint(pinyin, Color::CYAN, use_color)
    )
}

/// Definition lines, numbered unless they are breakdown text
fn definition_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    is_composite: bool,
    use_color: bool,
) -> Vec<String> {
    lines
        .enumerate()
        .map(|(i, line)| {
            if is_composite {
                format!("  {}", paint(line, Color::DIM, use_color))
            } else {
                format!("  {}. {}", i + 1, line)
            }
        })
        .collect()
}

pub fn render_lookup(result: &LookupResult, use_color: bool) -> String {
    let mut lines = vec![headword(
        &result.traditional,
        &result.simplified,
        &result.pinyin,
        use_color,
    )];
    lines.extend(definition_lines(
        result.definitions.iter().map(String::as_str),
        result.is_composite,
        use_color,
    ));
    lines.join("\n")
}

pub fn render_saved_word(word: &SavedWord, use_color: bool) -> String {
    let is_composite = word.definitions.starts_with(hanzi_reader::dictionary::BREAKDOWN_PREFIX);
    let mut lines = vec![headword(&word.traditional, &word.simplified, &word.pinyin, use_color)];
    lines.extend(definition_lines(word.definition_lines(), is_composite, use_color));
    lines.join("\n")
}

/// "new" for unreviewed words, otherwise the review count and due time
pub fn review_status(stats: Option<&ReviewStats>, now: f64) -> String {
    match stats {
        Some(stats) => format!(
            "{} reviews, {}",
            stats.review_count(),
            format_due(stats.next_review, now)
        ),
        None => "new".to_string(),
    }
}

/// One line per segment: the text, then its pinyin and first definition
pub fn render_annotation(annotation: &Annotation, use_color: bool) -> String {
    let marker = if annotation.saved {
        paint("*", Color::YELLOW, use_color)
    } else {
        " ".to_string()
    };

    match &annotation.result {
        Some(result) => {
            let gloss = result.definitions.first().map(String::as_str).unwrap_or("");
            format!(
                "{} {}  {}  {}",
                marker,
                paint(&annotation.text, Color::BOLD, use_color),
                paint(&result.pinyin, Color::CYAN, use_color),
                gloss
            )
        }
        None => format!("{} {}", marker, paint(&annotation.text, Color::DIM, use_color)),
    }
}
