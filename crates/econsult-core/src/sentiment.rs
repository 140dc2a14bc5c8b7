//! Sentiment buckets and the per-request sentiment partition.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keywords::{KeywordFreqs, keyword_freqs};

/// Three-way stance of a single comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Map a free-form classifier label onto a bucket.
    ///
    /// Labels containing "pos" are positive, labels containing "neg" are
    /// negative (checked in that order, case-insensitively); anything else
    /// is neutral.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("pos") {
            Self::Positive
        } else if lower.contains("neg") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disjoint partition of a request's comments by sentiment.
///
/// `counts` is empty when there was nothing to classify; otherwise it holds
/// one entry per bucket equal to that bucket's list length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentResult {
    pub counts: BTreeMap<Sentiment, usize>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
    pub keyword_freqs: BTreeMap<Sentiment, KeywordFreqs>,
}

impl SentimentResult {
    /// Result for an empty comment list.
    pub fn empty() -> Self {
        Self {
            keyword_freqs: Sentiment::ALL
                .into_iter()
                .map(|s| (s, KeywordFreqs::default()))
                .collect(),
            ..Self::default()
        }
    }

    /// Build the partition from comments and one label per comment.
    ///
    /// Relative order within each bucket follows the input order.
    /// `labels` must be the same length as `comments`.
    pub fn from_labels(comments: &[String], labels: &[Sentiment], top_k: usize) -> Self {
        debug_assert_eq!(comments.len(), labels.len());
        if comments.is_empty() {
            return Self::empty();
        }

        let mut result = Self::default();
        for (comment, label) in comments.iter().zip(labels) {
            result.bucket_mut(*label).push(comment.clone());
        }

        for sentiment in Sentiment::ALL {
            let bucket = result.bucket(sentiment);
            let count = bucket.len();
            let freqs = keyword_freqs(bucket, top_k);
            result.counts.insert(sentiment, count);
            result.keyword_freqs.insert(sentiment, freqs);
        }
        result
    }

    pub fn bucket(&self, sentiment: Sentiment) -> &[String] {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
        }
    }

    fn bucket_mut(&mut self, sentiment: Sentiment) -> &mut Vec<String> {
        match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Negative => &mut self.negative,
            Sentiment::Neutral => &mut self.neutral,
        }
    }

    /// Count for one bucket, zero when nothing was classified.
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }

    /// Number of comments that were classified.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::DEFAULT_TOP_K;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn label_mapping() {
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("LABEL_neg"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("mixed"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label(""), Sentiment::Neutral);
    }

    #[test]
    fn partition_preserves_relative_order() {
        let comments = strings(&["a good", "b bad", "c meh", "d good", "e bad"]);
        let labels = [
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive,
            Sentiment::Negative,
        ];
        let result = SentimentResult::from_labels(&comments, &labels, DEFAULT_TOP_K);

        assert_eq!(result.positive, strings(&["a good", "d good"]));
        assert_eq!(result.negative, strings(&["b bad", "e bad"]));
        assert_eq!(result.neutral, strings(&["c meh"]));
        assert_eq!(result.count(Sentiment::Positive), 2);
        assert_eq!(result.count(Sentiment::Negative), 2);
        assert_eq!(result.count(Sentiment::Neutral), 1);
        assert_eq!(result.total(), comments.len());
        assert_eq!(
            result.keyword_freqs[&Sentiment::Positive].get("good"),
            Some(2)
        );
    }

    #[test]
    fn empty_result_has_no_counts() {
        let result = SentimentResult::from_labels(&[], &[], DEFAULT_TOP_K);
        assert!(result.counts.is_empty());
        assert_eq!(result.total(), 0);
        assert_eq!(result.keyword_freqs.len(), 3);
        assert!(result.keyword_freqs.values().all(KeywordFreqs::is_empty));
    }

    #[test]
    fn serialises_with_lowercase_bucket_names() {
        let comments = strings(&["welcome change"]);
        let result = SentimentResult::from_labels(&comments, &[Sentiment::Positive], 10);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["counts"]["positive"], 1);
        assert_eq!(json["counts"]["neutral"], 0);
        assert_eq!(json["keyword_freqs"]["positive"]["welcome"], 1);

        let empty = serde_json::to_value(SentimentResult::empty()).unwrap();
        assert_eq!(empty["counts"], serde_json::json!({}));
    }
}
