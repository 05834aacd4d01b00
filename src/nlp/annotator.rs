use anyhow::Result;

use super::lexicon;
use super::{Annotator, Entity, EntityKind, Pos, Token};
use crate::segments::{segment_sentences, tokenize};

/// Rule-based annotator: closed-class lexicons, suffix heuristics,
/// capitalization and a gazetteer of places. Deterministic and offline.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnnotator;

impl LexiconAnnotator {
    pub fn new() -> Self {
        Self
    }

    fn tag_word(word: &str, initial: bool, prev: Option<Pos>) -> Pos {
        if !word.chars().any(char::is_alphanumeric) {
            return Pos::Punct;
        }
        if word.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
            return Pos::Num;
        }
        let lower = word.to_lowercase();
        if let Some(pos) = lexicon::closed_class(&lower) {
            return pos;
        }
        if lexicon::is_common_verb(&lower) {
            return Pos::Verb;
        }
        if is_capitalized(word) && (!initial || lexicon::is_place(&lower)) {
            return Pos::Propn;
        }
        match lexicon::suffix_pos(&lower) {
            Some(pos) => pos,
            None if matches!(prev, Some(Pos::Pron | Pos::Aux | Pos::Part)) => Pos::Verb,
            None => Pos::Noun,
        }
    }

    fn sentence_entities(tokens: &[Token], out: &mut Vec<Entity>) {
        let mut titled = false;
        let mut i = 0;
        while i < tokens.len() {
            let tok = &tokens[i];
            if is_capitalized(&tok.text) && lexicon::is_title(&tok.text) {
                titled = true;
                i += 1;
                if tokens.get(i).is_some_and(|t| t.text == ".") {
                    i += 1;
                }
                continue;
            }

            let starts_run = is_name_part(tok)
                && (tok.pos == Pos::Propn
                    || titled
                    || (i == 0 && tokens.get(1).is_some_and(|t| t.pos == Pos::Propn && is_name_part(t))));
            if !starts_run {
                titled = false;
                i += 1;
                continue;
            }

            let prev_word = i.checked_sub(1).map(|j| tokens[j].text.to_lowercase());
            let mut parts: Vec<&str> = Vec::new();
            while i < tokens.len() && is_name_part(&tokens[i]) {
                let text = tokens[i].text.as_str();
                if lexicon::is_title(text) {
                    // "Prime Minister Jane Doe": drop the title words
                    parts.clear();
                    titled = true;
                } else {
                    parts.push(strip_possessive(text));
                }
                i += 1;
            }

            if let Some(kind) = classify_run(&parts, titled, prev_word.as_deref()) {
                out.push(Entity { text: parts.join(" "), kind });
            }
            titled = false;
        }
    }
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else { return false };
    if !first.is_uppercase() {
        return false;
    }
    // all-caps shouting is not a name
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() <= 3 || letters.iter().any(|c| c.is_lowercase())
}

fn is_acronym(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase) && word.chars().count() > 1
}

fn is_name_part(tok: &Token) -> bool {
    is_capitalized(&tok.text)
        && tok.text.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '’' || c == '-' || c == '.')
        && !matches!(tok.pos, Pos::Det | Pos::Pron | Pos::Adp | Pos::Conj | Pos::Aux | Pos::Part | Pos::Adv)
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s").or_else(|| word.strip_suffix("’s")).unwrap_or(word)
}

fn classify_run(parts: &[&str], titled: bool, prev_word: Option<&str>) -> Option<EntityKind> {
    let last = parts.last()?;
    if lexicon::is_org_word(last) {
        return None;
    }
    let name = parts.join(" ");
    if lexicon::is_place(&name) {
        return Some(EntityKind::Location);
    }
    if titled || parts.len() >= 2 {
        return Some(EntityKind::Person);
    }
    // "at MIT" is an institution, not a place
    if prev_word.is_some_and(lexicon::is_locative_prep) && !is_acronym(last) {
        return Some(EntityKind::Location);
    }
    None
}

impl Annotator for LexiconAnnotator {
    fn sentences(&self, text: &str) -> Vec<String> {
        segment_sentences(text)
    }

    fn tag(&self, sentence: &str) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::new();
        for (i, word) in tokenize(sentence).into_iter().enumerate() {
            let prev = out.last().map(|t| t.pos);
            let pos = Self::tag_word(word, i == 0, prev);
            out.push(Token { text: word.to_string(), pos });
        }
        out
    }

    fn entities(&self, text: &str) -> Result<Vec<Entity>> {
        let mut out = Vec::new();
        for sentence in self.sentences(text) {
            let tokens = self.tag(&sentence);
            Self::sentence_entities(&tokens, &mut out);
        }
        Ok(out)
    }

    fn polarity(&self, text: &str) -> f64 {
        super::polarity(text)
    }
}
