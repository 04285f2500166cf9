//! Hyperparameter record stored in the model file.
//!
//! The binary format stores twelve integers and one double. The remaining
//! fields exposed here (learning rate, label prefix, ...) are not persisted,
//! so loaded models report the fastText defaults for them.

use super::reader::BinaryReader;
use crate::config::{DEFAULT_LABEL_PREFIX, DEFAULT_LR, DEFAULT_MIN_COUNT_LABEL};
use crate::error::FastTextError;
use serde::Serialize;
use std::fmt;
use std::io::Read;

/// Training objective family of the output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LossName {
    /// Hierarchical softmax
    Hs,
    /// Negative sampling
    Ns,
    /// Full softmax
    Softmax,
}

impl LossName {
    /// Canonical token used by the fastText command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            LossName::Hs => "hs",
            LossName::Ns => "ns",
            LossName::Softmax => "softmax",
        }
    }
}

impl TryFrom<i32> for LossName {
    type Error = FastTextError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LossName::Hs),
            2 => Ok(LossName::Ns),
            3 => Ok(LossName::Softmax),
            _ => Err(FastTextError::UnrecognizedEnumValue {
                kind: "loss",
                value,
            }),
        }
    }
}

impl fmt::Display for LossName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    /// Continuous bag of words
    Cbow,
    /// Skip-gram
    Sg,
    /// Supervised classifier
    Sup,
}

impl ModelName {
    /// Canonical token used by the fastText command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Cbow => "cbow",
            ModelName::Sg => "sg",
            ModelName::Sup => "sup",
        }
    }
}

impl TryFrom<i32> for ModelName {
    type Error = FastTextError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ModelName::Cbow),
            2 => Ok(ModelName::Sg),
            3 => Ok(ModelName::Sup),
            _ => Err(FastTextError::UnrecognizedEnumValue {
                kind: "model",
                value,
            }),
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyperparameters a model was trained with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Args {
    /// Learning rate (not persisted)
    pub lr: f64,
    /// Tokens processed between learning-rate updates
    pub lr_update_rate: i32,
    /// Embedding dimension
    pub dim: i32,
    /// Context window size
    pub ws: i32,
    pub epoch: i32,
    pub min_count: i32,
    /// Minimum label occurrences (not persisted)
    pub min_count_label: i32,
    /// Negatives sampled per positive
    pub neg: i32,
    /// Max length of word n-grams
    pub word_ngrams: i32,
    pub loss: LossName,
    pub model: ModelName,
    /// Number of hash buckets for character and word n-grams
    pub bucket: i32,
    /// Min length of character n-grams
    pub minn: i32,
    /// Max length of character n-grams
    pub maxn: i32,
    /// Subsampling threshold
    pub t: f64,
    /// Prefix identifying label tokens (not persisted)
    pub label: String,
    /// Pretrained vectors file used for training (not persisted)
    pub pretrained_vectors: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            lr: DEFAULT_LR,
            lr_update_rate: 100,
            dim: 100,
            ws: 5,
            epoch: 5,
            min_count: 5,
            min_count_label: DEFAULT_MIN_COUNT_LABEL,
            neg: 5,
            word_ngrams: 1,
            loss: LossName::Ns,
            model: ModelName::Sg,
            bucket: 2_000_000,
            minn: 3,
            maxn: 6,
            t: 1e-4,
            label: DEFAULT_LABEL_PREFIX.to_string(),
            pretrained_vectors: String::new(),
        }
    }
}

impl Args {
    /// Reads the persisted fields in file order.
    pub(crate) fn load<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self, FastTextError> {
        let dim = reader.read_i32("args.dim")?;
        let ws = reader.read_i32("args.ws")?;
        let epoch = reader.read_i32("args.epoch")?;
        let min_count = reader.read_i32("args.minCount")?;
        let neg = reader.read_i32("args.neg")?;
        let word_ngrams = reader.read_i32("args.wordNgrams")?;
        let loss = LossName::try_from(reader.read_i32("args.loss")?)?;
        let model = ModelName::try_from(reader.read_i32("args.model")?)?;
        let bucket = reader.read_i32("args.bucket")?;
        let minn = reader.read_i32("args.minn")?;
        let maxn = reader.read_i32("args.maxn")?;
        let lr_update_rate = reader.read_i32("args.lrUpdateRate")?;
        let t = reader.read_f64("args.t")?;

        if dim <= 0 {
            return Err(FastTextError::ModelLoad(format!(
                "invalid dimension {}",
                dim
            )));
        }
        if bucket < 0 {
            return Err(FastTextError::ModelLoad(format!(
                "invalid bucket count {}",
                bucket
            )));
        }

        Ok(Self {
            dim,
            ws,
            epoch,
            min_count,
            neg,
            word_ngrams,
            loss,
            model,
            bucket,
            minn,
            maxn,
            lr_update_rate,
            t,
            ..Self::default()
        })
    }

    /// True for classifiers, whose dictionaries carry labels.
    pub fn is_supervised(&self) -> bool {
        self.model == ModelName::Sup
    }
}
