//! Output labels of a sequence-classification model.
//!
//! Hugging Face exports describe their output classes in `config.json` as an
//! `id2label` map (`{"0": "NEGATIVE", "1": "POSITIVE"}` for SST-2 models).
//! The classifier only looks at label text, so any binary or three-way
//! sentiment head works as long as its labels mention "pos"/"neg".

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::Context;
use econsult_core::Sentiment;
use serde::Deserialize;

/// Label names keyed by logit index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    id2label: BTreeMap<usize, String>,
}

#[derive(Deserialize)]
struct ModelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::sst2()
    }
}

impl LabelMap {
    /// Labels of the binary SST-2 sentiment head.
    pub fn sst2() -> Self {
        Self::from_pairs([(0, "NEGATIVE"), (1, "POSITIVE")])
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (usize, &'a str)>) -> Self {
        Self {
            id2label: pairs
                .into_iter()
                .map(|(id, label)| (id, label.to_string()))
                .collect(),
        }
    }

    /// Read `id2label` from a model's `config.json`.
    ///
    /// A config without `id2label` yields the SST-2 labels.
    pub fn from_config_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_config_json(&raw)
    }

    pub fn from_config_json(raw: &str) -> anyhow::Result<Self> {
        let config: ModelConfig = serde_json::from_str(raw).context("parsing model config")?;
        if config.id2label.is_empty() {
            return Ok(Self::sst2());
        }

        let mut id2label = BTreeMap::new();
        for (id, label) in config.id2label {
            let id: usize = id
                .parse()
                .with_context(|| format!("non-numeric label id {id:?}"))?;
            id2label.insert(id, label);
        }
        Ok(Self { id2label })
    }

    /// Label for a logit index. Unknown indices get the generic `LABEL_<n>`.
    pub fn label(&self, id: usize) -> String {
        self.id2label
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("LABEL_{id}"))
    }

    pub fn sentiment(&self, id: usize) -> Sentiment {
        Sentiment::from_label(&self.label(id))
    }

    pub fn len(&self) -> usize {
        self.id2label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2label.is_empty()
    }
}
