//! ONNX Runtime sequence-classification pipeline for sentiment models.
//!
//! Targets Hugging Face sentiment heads exported to ONNX, e.g.
//! distilbert-base-uncased-finetuned-sst-2-english. The model directory must
//! contain `model.onnx` and `tokenizer.json`; `config.json` supplies the
//! label names and falls back to SST-2 labels when absent.

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::classifier::SentenceModel;
use crate::labels::LabelMap;

/// Comments per inference call.
const BATCH_SIZE: usize = 32;
/// BERT-family position limit.
const MAX_TOKENS: usize = 512;

/// Sentence sentiment classifier using ONNX Runtime.
pub struct OnnxSentimentModel {
    session: Session,
    tokenizer: Tokenizer,
    labels: LabelMap,
    /// DistilBERT graphs take no segment ids; BERT graphs do.
    feeds_token_types: bool,
}

impl OnnxSentimentModel {
    /// Load a model from a directory containing `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let config_path = model_dir.join("config.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );

        let session = Session::builder()?.commit_from_file(&model_path)?;
        let feeds_token_types = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        let labels = if config_path.exists() {
            LabelMap::from_config_file(&config_path)?
        } else {
            LabelMap::sst2()
        };

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;

        // Pad every input in a batch to the longest one.
        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        info!(
            labels = labels.len(),
            feeds_token_types,
            model = %model_path.display(),
            "loaded sentiment model"
        );
        Ok(Self {
            session,
            tokenizer,
            labels,
            feeds_token_types,
        })
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Classify one sub-batch, returning the arg-max label per text.
    fn classify_chunk(&mut self, texts: &[&str]) -> anyhow::Result<Vec<String>> {
        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        // Build flat input tensors: [batch_size, seq_len].
        let mut input_ids = vec![0i64; batch_size * seq_len];
        let mut attention_mask = vec![0i64; batch_size * seq_len];
        let mut token_type_ids = vec![0i64; batch_size * seq_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let offset = i * seq_len;
            for (j, &id) in encoding.get_ids().iter().enumerate() {
                input_ids[offset + j] = id as i64;
            }
            for (j, &mask) in encoding.get_attention_mask().iter().enumerate() {
                attention_mask[offset + j] = mask as i64;
            }
            for (j, &tid) in encoding.get_type_ids().iter().enumerate() {
                token_type_ids[offset + j] = tid as i64;
            }
        }

        let shape = [batch_size as i64, seq_len as i64];

        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;

        let outputs = if self.feeds_token_types {
            let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))?;
            self.session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])?
        } else {
            self.session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
            ])?
        };

        // Logits: [batch_size, num_labels].
        let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            dims.len() == 2 && dims[0] as usize == batch_size && dims[1] > 0,
            "unexpected logits shape: {dims:?}, expected [{batch_size}, num_labels]"
        );
        let num_labels = dims[1] as usize;

        let labels = logits
            .chunks(num_labels)
            .map(|row| self.labels.label(argmax(row)))
            .collect();
        Ok(labels)
    }
}

impl SentenceModel for OnnxSentimentModel {
    fn predict_labels(&mut self, texts: &[&str]) -> anyhow::Result<Vec<String>> {
        let mut labels = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            labels.extend(self.classify_chunk(chunk)?);
        }
        debug!(count = labels.len(), "classified comments with sentiment model");
        Ok(labels)
    }
}

/// Index of the largest logit. Ties go to the lower index.
fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, best_val), (i, &v)| {
            if v > best_val { (i, v) } else { (best, best_val) }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("distilbert-sst2")
    }

    #[test]
    fn argmax_picks_largest_logit() {
        assert_eq!(argmax(&[-1.2, 3.4]), 1);
        assert_eq!(argmax(&[2.0, -0.5, 1.9]), 0);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }

    #[test]
    fn load_fails_without_model_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxSentimentModel::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains("model.onnx not found"));
    }

    #[test]
    #[ignore = "requires models/distilbert-sst2 exported to ONNX"]
    fn classifies_clear_sentiment() {
        let mut model = OnnxSentimentModel::load(&model_dir()).unwrap();
        let labels = model
            .predict_labels(&[
                "This proposal is excellent and long overdue.",
                "This rule is terrible and will ruin small businesses.",
            ])
            .unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(econsult_core::Sentiment::from_label(&labels[0]).as_str(), "positive");
        assert_eq!(econsult_core::Sentiment::from_label(&labels[1]).as_str(), "negative");
    }

    #[test]
    #[ignore = "requires models/distilbert-sst2 exported to ONNX"]
    fn batches_larger_than_chunk_size() {
        let mut model = OnnxSentimentModel::load(&model_dir()).unwrap();
        let texts: Vec<&str> = (0..BATCH_SIZE * 2 + 3)
            .map(|i| if i % 2 == 0 { "Great idea." } else { "Awful idea." })
            .collect();
        let labels = model.predict_labels(&texts).unwrap();
        assert_eq!(labels.len(), texts.len());
    }
}
