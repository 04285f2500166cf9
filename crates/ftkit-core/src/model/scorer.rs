//! Output layer: turns a hidden vector into ranked label probabilities.

use super::args::LossName;
use super::matrix::DenseMatrix;
use super::tree::HuffmanTree;
use crate::error::FastTextError;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Scoring model for a supervised classifier.
#[derive(Debug, Clone)]
pub struct Scorer {
    output: Arc<DenseMatrix>,
    loss: LossName,
    tree: Option<HuffmanTree>,
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return vec![];
    }
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&x| x / sum).collect()
}

/// Descending by probability, ties by ascending label index.
fn rank(candidates: &mut [(f32, usize)]) {
    candidates.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
}

impl Scorer {
    /// Builds the scorer; hierarchical softmax also builds the label tree.
    pub fn new(
        output: Arc<DenseMatrix>,
        loss: LossName,
        label_counts: &[i64],
    ) -> Result<Self, FastTextError> {
        let tree = match loss {
            LossName::Hs => {
                let tree = HuffmanTree::build(label_counts);
                if output.rows() < tree.internal_nodes() {
                    return Err(FastTextError::ModelLoad(format!(
                        "output matrix has {} rows, tree needs {}",
                        output.rows(),
                        tree.internal_nodes()
                    )));
                }
                Some(tree)
            }
            LossName::Ns | LossName::Softmax => {
                if output.rows() != label_counts.len() {
                    return Err(FastTextError::ModelLoad(format!(
                        "output matrix has {} rows for {} labels",
                        output.rows(),
                        label_counts.len()
                    )));
                }
                None
            }
        };
        Ok(Self { output, loss, tree })
    }

    pub fn loss(&self) -> LossName {
        self.loss
    }

    /// Top-`k` `(probability, label)` pairs with probability at or above
    /// `threshold`, best first.
    pub fn predict(
        &self,
        hidden: &[f32],
        k: usize,
        threshold: f32,
    ) -> Result<Vec<(f32, usize)>, FastTextError> {
        if k == 0 {
            return Ok(vec![]);
        }
        let scores = self.output.mul_vec(hidden)?;

        let mut candidates: Vec<(f32, usize)> = match &self.tree {
            Some(tree) => tree
                .top_k(&scores, k, threshold)
                .into_iter()
                .map(|(log_prob, label)| (log_prob.exp().min(1.0), label))
                .filter(|(p, _)| *p >= threshold)
                .collect(),
            None => {
                let probs = match self.loss {
                    LossName::Softmax => softmax(&scores),
                    _ => scores.iter().map(|&s| sigmoid(s)).collect(),
                };
                probs
                    .into_iter()
                    .enumerate()
                    .filter(|(_, p)| *p >= threshold)
                    .map(|(label, p)| (p, label))
                    .collect()
            }
        };

        rank(&mut candidates);
        candidates.truncate(k);
        debug!(
            "Scored {} labels ({} loss), kept {}",
            scores.len(),
            self.loss,
            candidates.len()
        );
        Ok(candidates)
    }
}
