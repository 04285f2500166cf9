//! Precision/recall evaluation of a classifier over a labeled file.
//!
//! Each line holds one example: label tokens (with the model's label prefix)
//! mixed with words. Lines without a known label or without words are
//! skipped.
//!
//! | Metric | Formula |
//! |--------|---------|
//! | P@k | correct predictions / (k * examples) |
//! | R@k | correct predictions / gold labels |

use crate::error::FastTextError;
use crate::model::FastText;
use serde::Serialize;
use std::io::BufRead;
use tracing::info;

/// Aggregate metrics from one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestMetrics {
    /// Examples that were scored
    pub examples: usize,
    /// Number of predictions requested per example
    pub k: usize,
    /// Precision at k
    pub precision: f64,
    /// Recall at k
    pub recall: f64,
}

impl TestMetrics {
    fn from_counts(examples: usize, k: usize, correct: usize, gold: usize) -> Self {
        let precision = if examples > 0 && k > 0 {
            correct as f64 / (k * examples) as f64
        } else {
            0.0
        };
        let recall = if gold > 0 {
            correct as f64 / gold as f64
        } else {
            0.0
        };
        Self {
            examples,
            k,
            precision,
            recall,
        }
    }
}

/// Streams labeled lines through `model` and scores the top-`k` predictions.
pub fn evaluate<R: BufRead>(
    model: &FastText,
    reader: R,
    k: usize,
) -> Result<TestMetrics, FastTextError> {
    let dict = model.dictionary()?;

    let mut examples = 0usize;
    let mut correct = 0usize;
    let mut gold = 0usize;

    for line in reader.lines() {
        let text = line.map_err(|e| FastTextError::UnreadableInputFile {
            path: "<stream>".to_string(),
            reason: e.to_string(),
        })?;
        let tokens = dict.line(&format!("{}\n", text));
        if tokens.labels.is_empty() || tokens.words.is_empty() {
            continue;
        }

        let predictions = model.predict_ids(&tokens, k, 0.0)?;
        correct += predictions
            .iter()
            .filter(|(_, label)| tokens.labels.contains(&(*label as i32)))
            .count();
        examples += 1;
        gold += tokens.labels.len();
    }

    let metrics = TestMetrics::from_counts(examples, k, correct, gold);
    info!(
        "N {} | P@{} {:.3} | R@{} {:.3}",
        metrics.examples, k, metrics.precision, k, metrics.recall
    );
    Ok(metrics)
}
