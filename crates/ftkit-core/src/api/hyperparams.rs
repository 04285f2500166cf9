//! Hyperparameter accessors.
//!
//! Fields the binary format does not store (`lr`, `min_count_label`,
//! `label_prefix`, `pretrained_vectors_file_name`) report fastText's
//! training defaults.

use super::FastTextApi;
use crate::error::FastTextError;
use crate::model::Args;
use std::sync::Arc;

impl FastTextApi {
    /// The whole args record, shared with the model.
    pub fn args(&self) -> Result<Arc<Args>, FastTextError> {
        self.model.args()
    }

    pub fn lr(&self) -> Result<f64, FastTextError> {
        Ok(self.args()?.lr)
    }

    pub fn lr_update_rate(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.lr_update_rate)
    }

    pub fn dim(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.dim)
    }

    pub fn context_window_size(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.ws)
    }

    pub fn epoch(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.epoch)
    }

    pub fn min_count(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.min_count)
    }

    pub fn min_count_label(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.min_count_label)
    }

    pub fn n_sampled_negatives(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.neg)
    }

    pub fn word_ngrams(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.word_ngrams)
    }

    pub fn bucket(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.bucket)
    }

    pub fn minn(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.minn)
    }

    pub fn maxn(&self) -> Result<i32, FastTextError> {
        Ok(self.args()?.maxn)
    }

    pub fn sampling_threshold(&self) -> Result<f64, FastTextError> {
        Ok(self.args()?.t)
    }

    pub fn label_prefix(&self) -> Result<String, FastTextError> {
        Ok(self.args()?.label.clone())
    }

    pub fn pretrained_vectors_file_name(&self) -> Result<String, FastTextError> {
        Ok(self.args()?.pretrained_vectors.clone())
    }

    /// `"ns"`, `"hs"` or `"softmax"`.
    pub fn loss_name(&self) -> Result<String, FastTextError> {
        Ok(self.args()?.loss.as_str().to_string())
    }

    /// `"cbow"`, `"sg"` or `"sup"`.
    pub fn model_name(&self) -> Result<String, FastTextError> {
        Ok(self.args()?.model.as_str().to_string())
    }
}
