//! Keyword-rule sentiment classification.
//!
//! Used whenever the ONNX model is unavailable or fails. A comment is
//! positive if it contains any positive cue, otherwise negative if it
//! contains any negative cue, otherwise neutral. Cues match as plain
//! substrings of the lowercased comment, so `no` also fires inside `know`
//! and `cost` inside `costs`.

use econsult_core::Sentiment;

pub const POSITIVE_CUES: &[&str] = &[
    "good",
    "support",
    "welcome",
    "positive",
    "agree",
    "strongly support",
    "benefit",
    "help",
];

pub const NEGATIVE_CUES: &[&str] = &[
    "not", "no", "oppose", "against", "concern", "problem", "unfair", "cost", "costly",
    "negative",
];

/// Classify one comment. Positive cues win when both kinds match.
pub fn classify(comment: &str) -> Sentiment {
    let lower = comment.to_lowercase();
    if POSITIVE_CUES.iter().any(|cue| lower.contains(cue)) {
        Sentiment::Positive
    } else if NEGATIVE_CUES.iter().any(|cue| lower.contains(cue)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Classify every comment, preserving order.
pub fn classify_all<S: AsRef<str>>(comments: &[S]) -> Vec<Sentiment> {
    comments.iter().map(|c| classify(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_cue() {
        assert_eq!(classify("We Welcome this change"), Sentiment::Positive);
        assert_eq!(classify("Strongly SUPPORT the draft"), Sentiment::Positive);
    }

    #[test]
    fn negative_cue() {
        assert_eq!(classify("We oppose clause 4"), Sentiment::Negative);
        assert_eq!(classify("Compliance is COSTLY"), Sentiment::Negative);
    }

    #[test]
    fn neutral_without_cues() {
        assert_eq!(classify("Clause 7 refers to section 12"), Sentiment::Neutral);
        assert_eq!(classify(""), Sentiment::Neutral);
    }

    #[test]
    fn positive_takes_priority() {
        assert_eq!(
            classify("Good intent but unfair on small firms"),
            Sentiment::Positive
        );
        assert_eq!(classify("I do not agree"), Sentiment::Positive);
    }

    #[test]
    fn cues_match_inside_words() {
        assert_eq!(classify("I know the rules"), Sentiment::Negative);
        assert_eq!(classify("Helpful guidance"), Sentiment::Positive);
    }

    #[test]
    fn classify_all_preserves_order() {
        let labels = classify_all(&["good", "meh", "against"]);
        assert_eq!(
            labels,
            vec![Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative]
        );
    }
}
