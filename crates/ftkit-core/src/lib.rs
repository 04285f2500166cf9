//! # ftkit Core
//!
//! Inference over trained fastText models: header validation, label
//! prediction, word/subword/sentence vectors and vocabulary introspection.
//!
//! Training and writing models are out of scope; models come from the
//! fastText tool.
//!
//! ## Modules
//!
//! - [`api`] - [`FastTextApi`] facade with model lifecycle and queries
//! - [`model`] - binary model reader, tokenizer, n-gram hashing and scoring
//! - [`header`] - cheap magic/version check on candidate model files
//! - [`evaluation`] - precision/recall at k over a labeled file
//! - [`config`] - format constants and defaults
//! - [`error`] - error type shared by every module

pub mod api;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod header;
pub mod model;

pub use api::{FastTextApi, Prediction};
pub use error::FastTextError;
pub use evaluation::TestMetrics;
pub use model::{Args, FastText, LossName, ModelName};
