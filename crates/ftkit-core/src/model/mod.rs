//! Read-only fastText model: binary reader and inference.
//!
//! This module provides [`FastText`], the trained-model object the facade
//! delegates to. It owns its sub-resources through `Arc`s so that callers
//! can keep a dictionary or args record alive after the model is unloaded.
//!
//! ## Components
//!
//! - [`Args`] - hyperparameter record with decoded loss and model kinds
//! - [`Dictionary`] - vocabulary, labels, tokenizer and n-gram hashing
//! - [`DenseMatrix`] - Candle-backed input and output matrices
//! - [`Scorer`] - output layer (softmax, hierarchical softmax, negative sampling)
//!
//! ## Example
//!
//! ```ignore
//! use ftkit_core::model::FastText;
//!
//! let mut model = FastText::new();
//! model.load_model("model.bin")?;
//! let predictions = model.predict_line("the quick fox", 2, 0.0)?;
//! model.unload();
//! assert!(!model.is_loaded());
//! ```

pub mod args;
pub mod dictionary;
pub mod matrix;
mod reader;
pub mod scorer;
pub mod tree;

pub use args::{Args, LossName, ModelName};
pub use dictionary::{Dictionary, EntryType, Line};
pub use matrix::DenseMatrix;
pub use scorer::Scorer;

use crate::error::FastTextError;
use crate::header::verify_header;
use reader::BinaryReader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Everything a loaded model holds. Each part is shared so that unloading
/// only releases this model's ownership.
#[derive(Debug, Clone)]
struct ModelParts {
    args: Arc<Args>,
    dict: Arc<Dictionary>,
    input: Arc<DenseMatrix>,
    output: Arc<DenseMatrix>,
    /// Present only for supervised models
    scorer: Option<Arc<Scorer>>,
}

/// A fastText model that can be loaded, queried and unloaded.
#[derive(Debug, Clone, Default)]
pub struct FastText {
    parts: Option<ModelParts>,
}

impl FastText {
    /// Creates an unloaded model.
    pub fn new() -> Self {
        Self { parts: None }
    }

    /// Parses the model file at `path`.
    ///
    /// On failure the previously loaded model (if any) is kept.
    #[instrument(skip_all)]
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<(), FastTextError> {
        let path = path.as_ref();
        info!("Loading model from {}", path.display());
        let file = File::open(path).map_err(|e| {
            FastTextError::ModelLoad(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Parses a model from any byte stream.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> Result<(), FastTextError> {
        verify_header(&mut reader)?;
        let mut reader = BinaryReader::new(reader);

        let args = Arc::new(Args::load(&mut reader)?);
        info!(
            "Model config: {} / {} loss, dim {}, bucket {}",
            args.model, args.loss, args.dim, args.bucket
        );

        let dict = Arc::new(Dictionary::load(&mut reader, Arc::clone(&args))?);
        info!(
            "Dictionary: {} words, {} labels",
            dict.nwords(),
            dict.nlabels()
        );

        if reader.read_bool("input quantization flag")? {
            return Err(FastTextError::Unsupported(
                "quantized models are not supported".to_string(),
            ));
        }
        let input = Arc::new(DenseMatrix::load(&mut reader, "input matrix")?);

        if reader.read_bool("output quantization flag")? {
            return Err(FastTextError::Unsupported(
                "quantized output matrices are not supported".to_string(),
            ));
        }
        let output = Arc::new(DenseMatrix::load(&mut reader, "output matrix")?);

        let dim = args.dim as usize;
        if input.cols() != dim || output.cols() != dim {
            return Err(FastTextError::ModelLoad(format!(
                "matrix width ({} / {}) does not match dimension {}",
                input.cols(),
                output.cols(),
                dim
            )));
        }
        let min_rows = dict.nwords() + args.bucket as usize;
        if input.rows() < min_rows {
            return Err(FastTextError::ModelLoad(format!(
                "input matrix has {} rows, expected at least {}",
                input.rows(),
                min_rows
            )));
        }

        let scorer = if args.is_supervised() {
            Some(Arc::new(Scorer::new(
                Arc::clone(&output),
                args.loss,
                &dict.label_counts(),
            )?))
        } else {
            None
        };

        info!(
            "Loaded model: input {}x{}, output {}x{}",
            input.rows(),
            input.cols(),
            output.rows(),
            output.cols()
        );

        self.parts = Some(ModelParts {
            args,
            dict,
            input,
            output,
            scorer,
        });
        Ok(())
    }

    /// Drops this model's share of every sub-resource.
    pub fn unload(&mut self) {
        if self.parts.take().is_some() {
            info!("Model unloaded");
        }
    }

    /// True while a model is held.
    pub fn is_loaded(&self) -> bool {
        self.parts.is_some()
    }

    fn parts(&self) -> Result<&ModelParts, FastTextError> {
        self.parts.as_ref().ok_or(FastTextError::NotLoaded)
    }

    pub fn args(&self) -> Result<Arc<Args>, FastTextError> {
        Ok(Arc::clone(&self.parts()?.args))
    }

    pub fn dictionary(&self) -> Result<Arc<Dictionary>, FastTextError> {
        Ok(Arc::clone(&self.parts()?.dict))
    }

    pub fn input_matrix(&self) -> Result<Arc<DenseMatrix>, FastTextError> {
        Ok(Arc::clone(&self.parts()?.input))
    }

    pub fn output_matrix(&self) -> Result<Arc<DenseMatrix>, FastTextError> {
        Ok(Arc::clone(&self.parts()?.output))
    }

    /// Embedding dimension of the loaded model.
    pub fn dimension(&self) -> Result<usize, FastTextError> {
        Ok(self.parts()?.args.dim as usize)
    }

    fn scorer(&self) -> Result<&Scorer, FastTextError> {
        self.parts()?.scorer.as_deref().ok_or_else(|| {
            FastTextError::Unsupported("label prediction needs a supervised model".to_string())
        })
    }

    /// Ranked `(probability, label id)` pairs for an already tokenized line.
    pub fn predict_ids(
        &self,
        line: &Line,
        k: usize,
        threshold: f32,
    ) -> Result<Vec<(f32, usize)>, FastTextError> {
        let scorer = self.scorer()?;
        if line.words.is_empty() || k == 0 {
            return Ok(vec![]);
        }
        let hidden = self.parts()?.input.mean_rows(&line.words)?;
        scorer.predict(&hidden, k, threshold)
    }

    /// Ranked `(probability, label)` pairs for the first line of `text`.
    ///
    /// Returns nothing when `k` is zero or the line has no usable tokens.
    pub fn predict_line(
        &self,
        text: &str,
        k: usize,
        threshold: f32,
    ) -> Result<Vec<(f32, String)>, FastTextError> {
        let dict = &self.parts()?.dict;
        let line = dict.line(text);

        self.predict_ids(&line, k, threshold)?
            .into_iter()
            .map(|(prob, label)| {
                dict.label(label)
                    .map(|name| (prob, name.to_string()))
                    .ok_or(FastTextError::IndexOutOfRange {
                        index: label,
                        len: dict.nlabels(),
                    })
            })
            .collect()
    }

    /// Average of the word's own row and its character n-gram rows.
    pub fn word_vector(&self, word: &str) -> Result<Vec<f32>, FastTextError> {
        let parts = self.parts()?;
        parts.input.mean_rows(&parts.dict.subword_ids(word))
    }

    /// Input row of the hash bucket for `subword`.
    pub fn subword_vector(&self, subword: &str) -> Result<Vec<f32>, FastTextError> {
        let parts = self.parts()?;
        let row = parts.dict.subword_row(subword).ok_or_else(|| {
            FastTextError::Unsupported("model has no subword buckets".to_string())
        })?;
        parts.input.row(row)
    }

    /// Sentence embedding.
    ///
    /// Only the first line of `text` is used. Classifiers average the input
    /// rows of the tokenized line. Unsupervised models average the
    /// unit-normalized vectors of each word.
    pub fn sentence_vector(&self, text: &str) -> Result<Vec<f32>, FastTextError> {
        let parts = self.parts()?;
        let dim = parts.args.dim as usize;

        if parts.args.is_supervised() {
            let line = parts.dict.line(text);
            return parts.input.mean_rows(&line.words);
        }

        let mut sum = vec![0.0f32; dim];
        let mut count = 0usize;
        let first_line = text.split('\n').next().unwrap_or("");
        for word in dictionary::tokenize(first_line) {
            let vec = self.word_vector(word)?;
            let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (acc, x) in sum.iter_mut().zip(&vec) {
                    *acc += x / norm;
                }
            }
            count += 1;
        }
        if count > 0 {
            let scale = 1.0 / count as f32;
            sum.iter_mut().for_each(|x| *x *= scale);
        }
        Ok(sum)
    }
}
