//! Inference facade over a single fastText model.
//!
//! [`FastTextApi`] owns at most one loaded [`FastText`] model. Reads take
//! `&self` and fail with [`FastTextError::NotLoaded`] until a model is
//! loaded; load and unload take `&mut self`.
//!
//! # Usage
//!
//! ```ignore
//! use ftkit_core::FastTextApi;
//!
//! let mut api = FastTextApi::new();
//! if FastTextApi::check_model("model.bin") {
//!     api.load_model("model.bin")?;
//!     for p in api.predict_proba("the quick fox", 3, 0.5)? {
//!         println!("{} {:.4}", p.label, p.probability);
//!     }
//!     api.unload_model();
//! }
//! ```
//!
//! The facade is split by concern:
//!
//! - `predict` - ranked labels with threshold and top-k
//! - `vectors` - word, subword and sentence embeddings
//! - `vocab` - dictionary introspection
//! - `hyperparams` - typed accessors over the args record

mod hyperparams;
mod predict;
mod vectors;
mod vocab;

#[cfg(test)]
mod tests;

pub use predict::Prediction;

use crate::error::FastTextError;
use crate::evaluation::{evaluate, TestMetrics};
use crate::header;
use crate::model::FastText;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Lifecycle and query surface for one fastText model.
#[derive(Debug, Clone, Default)]
pub struct FastTextApi {
    model: FastText,
}

impl FastTextApi {
    /// Create a facade with no model loaded.
    pub fn new() -> Self {
        Self {
            model: FastText::new(),
        }
    }

    /// True if `path` starts with the fastText magic number and the
    /// supported format version. Never loads the model.
    pub fn check_model(path: impl AsRef<Path>) -> bool {
        header::check_model(path)
    }

    /// Load the model at `path`, replacing any model already held.
    ///
    /// On error the facade keeps whatever state it had before the call.
    #[instrument(skip_all)]
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<(), FastTextError> {
        let path = path.as_ref();
        let mut model = FastText::new();
        if let Err(e) = model.load_model(path) {
            warn!("Failed to load {}: {}", path.display(), e);
            return Err(e);
        }
        self.model.unload();
        self.model = model;
        Ok(())
    }

    /// Release the loaded model. A no-op when nothing is loaded.
    pub fn unload_model(&mut self) {
        self.model.unload();
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Evaluate the model on a labeled file, one example per line.
    ///
    /// # Errors
    ///
    /// - `NotLoaded` if no model is held
    /// - `UnreadableInputFile` if `path` cannot be opened
    #[instrument(skip_all, fields(k = k))]
    pub fn test(&self, path: impl AsRef<Path>, k: usize) -> Result<TestMetrics, FastTextError> {
        if !self.model.is_loaded() {
            return Err(FastTextError::NotLoaded);
        }
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FastTextError::UnreadableInputFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("Evaluating on {}", path.display());
        evaluate(&self.model, BufReader::new(file), k)
    }

    /// The underlying model, for callers that need the lower-level API.
    pub fn model(&self) -> &FastText {
        &self.model
    }
}
