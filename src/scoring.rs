use crate::segments::whitespace_words;
use crate::types::{QualityMetrics, Sentiment};

/// Polarity beyond which the text counts as clearly positive or negative.
pub const SENTIMENT_THRESHOLD: f64 = 0.3;

pub fn sentiment_of(polarity: f64) -> Sentiment {
    if polarity > SENTIMENT_THRESHOLD {
        Sentiment::Positive
    } else if polarity < -SENTIMENT_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Descriptive metrics; they never influence the verdict.
pub fn quality_metrics(
    text: &str,
    sentences: &[String],
    persons: usize,
    locations: usize,
    polarity: f64,
) -> QualityMetrics {
    let avg_sentence_length = if sentences.is_empty() {
        0.0
    } else {
        sentences.iter().map(|s| whitespace_words(s)).sum::<usize>() as f64 / sentences.len() as f64
    };
    QualityMetrics {
        word_count: whitespace_words(text),
        proper_nouns: persons,
        locations,
        avg_sentence_length,
        sentiment: sentiment_of(polarity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_words_per_sentence() {
        let sentences = vec!["One two three.".to_string(), "Four.".to_string()];
        let m = quality_metrics("One two three. Four.", &sentences, 1, 2, 0.0);
        assert_eq!(m.word_count, 4);
        assert_eq!(m.avg_sentence_length, 2.0);
        assert_eq!((m.proper_nouns, m.locations), (1, 2));
        assert_eq!(m.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn empty_text_is_all_zero() {
        let m = quality_metrics("", &[], 0, 0, 0.0);
        assert_eq!(m.word_count, 0);
        assert_eq!(m.avg_sentence_length, 0.0);
    }

    #[test]
    fn sentiment_thresholds_are_exclusive() {
        assert_eq!(sentiment_of(0.3), Sentiment::Neutral);
        assert_eq!(sentiment_of(0.31), Sentiment::Positive);
        assert_eq!(sentiment_of(-0.3), Sentiment::Neutral);
        assert_eq!(sentiment_of(-0.5), Sentiment::Negative);
    }
}
