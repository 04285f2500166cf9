//! Read-only view over the dictionary.

use super::FastTextApi;
use crate::error::FastTextError;

impl FastTextApi {
    /// All words in dictionary order.
    pub fn words(&self) -> Result<Vec<String>, FastTextError> {
        let dict = self.model.dictionary()?;
        Ok((0..dict.nwords())
            .filter_map(|i| dict.word(i).map(str::to_string))
            .collect())
    }

    /// All labels in dictionary order.
    pub fn labels(&self) -> Result<Vec<String>, FastTextError> {
        let dict = self.model.dictionary()?;
        Ok((0..dict.nlabels())
            .filter_map(|i| dict.label(i).map(str::to_string))
            .collect())
    }

    pub fn word(&self, i: usize) -> Result<String, FastTextError> {
        let dict = self.model.dictionary()?;
        dict.word(i)
            .map(str::to_string)
            .ok_or(FastTextError::IndexOutOfRange {
                index: i,
                len: dict.nwords(),
            })
    }

    pub fn label(&self, i: usize) -> Result<String, FastTextError> {
        let dict = self.model.dictionary()?;
        dict.label(i)
            .map(str::to_string)
            .ok_or(FastTextError::IndexOutOfRange {
                index: i,
                len: dict.nlabels(),
            })
    }

    pub fn nwords(&self) -> Result<usize, FastTextError> {
        Ok(self.model.dictionary()?.nwords())
    }

    pub fn nlabels(&self) -> Result<usize, FastTextError> {
        Ok(self.model.dictionary()?.nlabels())
    }

    /// `(n-gram, input row)` pairs that make up `word`'s vector, the word
    /// itself first when it is in the vocabulary.
    pub fn subwords(&self, word: &str) -> Result<Vec<(String, i32)>, FastTextError> {
        Ok(self.model.dictionary()?.subwords(word))
    }
}
