//! Embedding lookups. Every vector has the model's dimension.

use super::FastTextApi;
use crate::error::FastTextError;

impl FastTextApi {
    /// Mean of the word's own row and its character n-gram rows.
    ///
    /// Out-of-vocabulary words are built from n-grams alone; a word with no
    /// rows at all gives the zero vector.
    pub fn word_vector(&self, word: &str) -> Result<Vec<f32>, FastTextError> {
        self.checked(self.model.word_vector(word)?)
    }

    /// Row of the hash bucket `subword` falls into.
    ///
    /// Fails with `Unsupported` if the model was trained without buckets.
    pub fn subword_vector(&self, subword: &str) -> Result<Vec<f32>, FastTextError> {
        self.checked(self.model.subword_vector(subword)?)
    }

    pub fn sentence_vector(&self, text: &str) -> Result<Vec<f32>, FastTextError> {
        self.checked(self.model.sentence_vector(text)?)
    }

    /// Passes `vec` through if it has the model's dimension.
    fn checked(&self, vec: Vec<f32>) -> Result<Vec<f32>, FastTextError> {
        let dim = self.model.dimension()?;
        if vec.len() != dim {
            return Err(FastTextError::Inference(format!(
                "vector has {} values, model dimension is {}",
                vec.len(),
                dim
            )));
        }
        Ok(vec)
    }

    /// Same as [`word_vector`](Self::word_vector).
    pub fn vector(&self, word: &str) -> Result<Vec<f32>, FastTextError> {
        self.word_vector(word)
    }
}
