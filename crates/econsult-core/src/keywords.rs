//! Keyword frequency statistics over a set of comments.

use std::collections::HashMap;

use serde::ser::{Serialize, Serializer};

use crate::text::tokenize_and_filter;

/// Default number of keywords kept per sentiment bucket.
pub const DEFAULT_TOP_K: usize = 150;

/// Token frequencies ordered by descending count.
///
/// Ties keep the order in which tokens were first seen. Serialises as a JSON
/// object whose key order is the frequency order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFreqs(Vec<(String, usize)>);

impl KeywordFreqs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(t, _)| t == token)
            .map(|&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(t, c)| (t.as_str(), *c))
    }

    pub fn into_vec(self) -> Vec<(String, usize)> {
        self.0
    }
}

impl Serialize for KeywordFreqs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(t, c)| (t, c)))
    }
}

/// Count filtered tokens across `comments` and keep the `top_k` most frequent.
///
/// `top_k == 0` keeps every token.
pub fn keyword_freqs<S: AsRef<str>>(comments: &[S], top_k: usize) -> KeywordFreqs {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for comment in comments {
        for token in tokenize_and_filter(comment.as_ref()) {
            if let Some(&i) = index.get(&token) {
                counts[i].1 += 1;
                continue;
            }
            index.insert(token.clone(), counts.len());
            counts.push((token, 1));
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    if top_k > 0 {
        counts.truncate(top_k);
    }
    KeywordFreqs(counts)
}
