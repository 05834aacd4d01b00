use super::lexicon::{is_intensifier, is_negation, polarity_of};
use crate::segments::tokenize;

/// Mean polarity of the polar words in `text`. A negator directly before a
/// polar word flips and halves it; an intensifier scales it by 1.3.
pub fn polarity(text: &str) -> f64 {
    let words: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .map(str::to_lowercase)
        .collect();

    let mut total = 0.0;
    let mut hits = 0usize;
    for (i, word) in words.iter().enumerate() {
        let Some(mut score) = polarity_of(word) else { continue };
        let prev = i.checked_sub(1).map(|j| words[j].as_str());
        let prev2 = i.checked_sub(2).map(|j| words[j].as_str());
        if prev.is_some_and(is_intensifier) {
            score *= 1.3;
            if prev2.is_some_and(is_negation) {
                score *= -0.5;
            }
        } else if prev.is_some_and(is_negation) {
            score *= -0.5;
        }
        total += score.clamp(-1.0, 1.0);
        hits += 1;
    }

    if hits == 0 {
        0.0
    } else {
        total / hits as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_without_polar_words() {
        assert_eq!(polarity("The committee met on Tuesday."), 0.0);
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn positive_and_negative_text() {
        assert!(polarity("What a wonderful and successful day") > 0.3);
        assert!(polarity("A terrible, deadly disaster") < -0.3);
    }

    #[test]
    fn negation_flips_sign() {
        assert!(polarity("This is not good") < 0.0);
        assert!(polarity("It was not very bad") > 0.0);
    }
}
