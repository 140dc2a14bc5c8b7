//! Sentiment classification with model-or-rules fallback.
//!
//! [`SentimentClassifier`] wraps one of two backends chosen once at start-up:
//! a loaded sentence model, or the keyword rules in [`crate::rules`]. A
//! model failure at call time never reaches the caller: the whole batch is
//! re-labelled by the rules and the failure is logged.
//!
//! The process keeps a single classifier behind [`install`] / [`global`];
//! it is immutable after installation apart from the model's own inference
//! state, which is serialised by a mutex.

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use econsult_core::keywords::DEFAULT_TOP_K;
use econsult_core::{Sentiment, SentimentResult};
use tracing::{info, warn};

use crate::rules;

/// A sequence-classification model producing one label per input text.
///
/// Labels are free-form class names (`POSITIVE`, `LABEL_0`, `neutral`, …)
/// and are bucketed with [`Sentiment::from_label`].
pub trait SentenceModel: Send {
    fn predict_labels(&mut self, texts: &[&str]) -> anyhow::Result<Vec<String>>;
}

enum Backend {
    Model(Mutex<Box<dyn SentenceModel>>),
    Rules,
}

/// Comment sentiment classifier.
pub struct SentimentClassifier {
    backend: Backend,
    top_k: usize,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::rules_only()
    }
}

impl SentimentClassifier {
    /// Classifier that only uses the keyword rules.
    pub fn rules_only() -> Self {
        Self {
            backend: Backend::Rules,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Classifier backed by `model`, falling back to rules on failure.
    pub fn with_model(model: impl SentenceModel + 'static) -> Self {
        Self {
            backend: Backend::Model(Mutex::new(Box::new(model))),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set how many keywords are kept per sentiment bucket.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Load the ONNX model from `model_dir`, or fall back to rules.
    ///
    /// Load failures are logged and produce a rules-only classifier.
    pub fn load(model_dir: Option<&Path>) -> Self {
        let Some(dir) = model_dir else {
            info!("no sentiment model configured; using rule-based classifier");
            return Self::rules_only();
        };
        Self::load_model(dir)
    }

    #[cfg(feature = "onnx")]
    fn load_model(dir: &Path) -> Self {
        match crate::OnnxSentimentModel::load(dir) {
            Ok(model) => Self::with_model(model),
            Err(e) => {
                let error = format!("{e:#}");
                warn!(
                    error = %error,
                    model_dir = %dir.display(),
                    "could not load sentiment model; will use fallback classifier"
                );
                Self::rules_only()
            }
        }
    }

    #[cfg(not(feature = "onnx"))]
    fn load_model(dir: &Path) -> Self {
        warn!(
            model_dir = %dir.display(),
            "built without the `onnx` feature; will use fallback classifier"
        );
        Self::rules_only()
    }

    /// Whether the model-backed variant is active.
    pub fn model_loaded(&self) -> bool {
        matches!(self.backend, Backend::Model(_))
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Label every comment exactly once, in input order.
    ///
    /// With a model, either every label comes from the model or, if the
    /// model fails or returns the wrong number of labels, every label comes
    /// from the rules.
    pub fn classify_batch<S: AsRef<str>>(&self, comments: &[S]) -> Vec<Sentiment> {
        if comments.is_empty() {
            return Vec::new();
        }

        match &self.backend {
            Backend::Rules => rules::classify_all(comments),
            Backend::Model(model) => match predict_with(model, comments) {
                Ok(labels) => labels,
                Err(e) => {
                    let error = format!("{e:#}");
                    warn!(
                        error = %error,
                        count = comments.len(),
                        "sentiment model error; falling back to simple rules"
                    );
                    rules::classify_all(comments)
                }
            },
        }
    }

    /// Partition `comments` by sentiment and compute per-bucket keywords.
    pub fn analyze(&self, comments: &[String]) -> SentimentResult {
        if comments.is_empty() {
            return SentimentResult::empty();
        }
        let labels = self.classify_batch(comments);
        SentimentResult::from_labels(comments, &labels, self.top_k)
    }
}

fn predict_with<S: AsRef<str>>(
    model: &Mutex<Box<dyn SentenceModel>>,
    comments: &[S],
) -> anyhow::Result<Vec<Sentiment>> {
    let texts: Vec<&str> = comments.iter().map(|c| c.as_ref()).collect();
    let labels = {
        let mut guard = model
            .lock()
            .map_err(|_| anyhow::anyhow!("sentiment model lock poisoned"))?;
        guard.predict_labels(&texts)?
    };
    anyhow::ensure!(
        labels.len() == texts.len(),
        "model returned {} labels for {} comments",
        labels.len(),
        texts.len()
    );
    Ok(labels.iter().map(|l| Sentiment::from_label(l)).collect())
}

static CLASSIFIER: OnceLock<SentimentClassifier> = OnceLock::new();

/// Install the process-wide classifier. The first installation wins; later
/// calls return the already installed classifier.
pub fn install(classifier: SentimentClassifier) -> &'static SentimentClassifier {
    CLASSIFIER.get_or_init(|| classifier)
}

/// The process-wide classifier, rules-only if none was installed.
pub fn global() -> &'static SentimentClassifier {
    CLASSIFIER.get_or_init(SentimentClassifier::rules_only)
}
