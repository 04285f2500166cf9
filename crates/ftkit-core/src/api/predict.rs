//! Label prediction.

use super::FastTextApi;
use crate::config::DEFAULT_THRESHOLD;
use crate::error::FastTextError;
use serde::Serialize;
use tracing::debug;

/// One ranked label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub probability: f32,
    pub label: String,
}

impl FastTextApi {
    /// Up to `k` labels for `text` with probability at or above `threshold`,
    /// best first. Ties keep dictionary order.
    ///
    /// `k <= 0` and text without words both give an empty list.
    pub fn predict_proba(
        &self,
        text: &str,
        k: i32,
        threshold: f32,
    ) -> Result<Vec<Prediction>, FastTextError> {
        if !self.is_model_loaded() {
            return Err(FastTextError::NotLoaded);
        }
        if k <= 0 {
            return Ok(Vec::new());
        }

        let predictions: Vec<Prediction> = self
            .model
            .predict_line(text, k as usize, threshold)?
            .into_iter()
            .map(|(probability, label)| Prediction { probability, label })
            .collect();
        debug!("{} predictions for k={} threshold={}", predictions.len(), k, threshold);
        Ok(predictions)
    }

    /// Labels of [`predict_proba`](Self::predict_proba), in the same order.
    pub fn predict(&self, text: &str, k: i32, threshold: f32) -> Result<Vec<String>, FastTextError> {
        Ok(self
            .predict_proba(text, k, threshold)?
            .into_iter()
            .map(|p| p.label)
            .collect())
    }

    pub fn predict_proba_top(&self, text: &str, k: i32) -> Result<Vec<Prediction>, FastTextError> {
        self.predict_proba(text, k, DEFAULT_THRESHOLD)
    }

    pub fn predict_top(&self, text: &str, k: i32) -> Result<Vec<String>, FastTextError> {
        self.predict(text, k, DEFAULT_THRESHOLD)
    }
}
