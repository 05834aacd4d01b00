use unicode_segmentation::UnicodeSegmentation;

// Only words that always precede more of the same sentence. "U.S." and "Jr."
// often close one.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sen.", "rep.", "gov.", "gen.", "st.", "vs.",
];

/// UAX #29 sentences, re-joined where a break follows a title abbreviation
/// ("Mr. Smith").
pub fn segment_sentences(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for s in text.unicode_sentences() {
        let s = s.trim();
        if s.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(prev) if ends_with_abbreviation(prev) => {
                prev.push(' ');
                prev.push_str(s);
            }
            _ => out.push(s.to_string()),
        }
    }
    out
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    sentence
        .split_whitespace()
        .last()
        .is_some_and(|w| ABBREVIATIONS.contains(&w.to_lowercase().as_str()))
}

/// Word-like tokens plus standalone punctuation, in order.
pub fn tokenize(sentence: &str) -> Vec<&str> {
    sentence
        .split_word_bounds()
        .filter(|t| !t.trim().is_empty())
        .collect()
}

pub fn whitespace_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cuts `text` to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
