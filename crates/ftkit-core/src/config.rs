//! Format and inference constants.
//!
//! These values are fixed by the fastText binary format and tokenizer. They
//! are shared by the header validator, the model reader and the facade.
//!
//! # Usage
//!
//! ```
//! use ftkit_core::config::{FILEFORMAT_MAGIC_INT32, FASTTEXT_VERSION};
//!
//! let mut header = Vec::new();
//! header.extend_from_slice(&FILEFORMAT_MAGIC_INT32.to_ne_bytes());
//! header.extend_from_slice(&FASTTEXT_VERSION.to_ne_bytes());
//! assert_eq!(header.len(), 8);
//! ```

// =============================================================================
// Binary Format
// =============================================================================

/// Magic number stored in the first four bytes of every model file.
pub const FILEFORMAT_MAGIC_INT32: i32 = 793_712_314;

/// The only model format version this crate reads.
pub const FASTTEXT_VERSION: i32 = 12;

/// Size of the header prefix (magic + version) in bytes.
pub const HEADER_SIZE: usize = 8;

// =============================================================================
// Tokenizer
// =============================================================================

/// End-of-sentence token, emitted for every newline.
pub const EOS: &str = "</s>";

/// Begin-of-word marker wrapped around words before n-gram extraction.
pub const BOW: &str = "<";

/// End-of-word marker wrapped around words before n-gram extraction.
pub const EOW: &str = ">";

/// Multiplier used to combine word hashes into word n-gram hashes.
pub const WORD_NGRAM_HASH_MULTIPLIER: u64 = 116_049_371;

// =============================================================================
// Prediction
// =============================================================================

/// Threshold used by the prediction convenience methods.
pub const DEFAULT_THRESHOLD: f32 = 0.0;

/// Added inside logarithms to keep hierarchical-softmax scores finite.
pub const LOG_EPSILON: f32 = 1e-5;

// =============================================================================
// Args defaults (fields the binary format does not store)
// =============================================================================

/// Learning rate reported for loaded models.
pub const DEFAULT_LR: f64 = 0.05;

/// Label prefix reported for loaded models.
pub const DEFAULT_LABEL_PREFIX: &str = "__label__";

/// Minimum label count reported for loaded models.
pub const DEFAULT_MIN_COUNT_LABEL: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size_matches_fields() {
        assert_eq!(HEADER_SIZE, 2 * std::mem::size_of::<i32>());
    }

    #[test]
    fn test_word_markers() {
        let wrapped = format!("{}{}{}", BOW, "fox", EOW);
        assert_eq!(wrapped, "<fox>");
    }
}
