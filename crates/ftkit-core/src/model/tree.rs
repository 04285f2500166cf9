//! Huffman tree over labels for hierarchical-softmax prediction.
//!
//! Leaves `0..n` are the labels; internal node `n + i` owns output-matrix
//! row `i`. Taking the right branch at a node has probability
//! `sigmoid(score[row])`.

use crate::config::LOG_EPSILON;

#[derive(Debug, Clone)]
struct Node {
    left: Option<usize>,
    right: Option<usize>,
    count: i64,
}

/// Binary coding tree built from label frequencies.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    leaves: usize,
}

fn std_log(x: f32) -> f32 {
    (x + LOG_EPSILON).ln()
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

impl HuffmanTree {
    /// Builds the tree from counts sorted in descending order.
    pub fn build(counts: &[i64]) -> Self {
        let leaves = counts.len();
        let total = (2 * leaves).saturating_sub(1);
        let mut nodes: Vec<Node> = (0..total)
            .map(|i| Node {
                left: None,
                right: None,
                count: counts.get(i).copied().unwrap_or(i64::MAX / 4),
            })
            .collect();

        // Two-queue construction: leaves are consumed from the rarest end,
        // internal nodes in creation order.
        let mut leaf = leaves as isize - 1;
        let mut node = leaves;
        for i in leaves..total {
            let mut mini = [0usize; 2];
            for slot in &mut mini {
                if leaf >= 0 && nodes[leaf as usize].count < nodes[node].count {
                    *slot = leaf as usize;
                    leaf -= 1;
                } else {
                    *slot = node;
                    node += 1;
                }
            }
            nodes[i].left = Some(mini[0]);
            nodes[i].right = Some(mini[1]);
            nodes[i].count = nodes[mini[0]].count + nodes[mini[1]].count;
        }

        Self { nodes, leaves }
    }

    /// Number of output rows the tree consumes.
    pub fn internal_nodes(&self) -> usize {
        self.leaves.saturating_sub(1)
    }

    /// Top-`k` leaves by log-probability, skipping anything below
    /// `threshold`. `scores[i]` is the raw score of internal node `leaves + i`.
    ///
    /// Returned pairs are `(log_probability, label)` in no particular order.
    pub fn top_k(&self, scores: &[f32], k: usize, threshold: f32) -> Vec<(f32, usize)> {
        let mut best = Vec::with_capacity(k.min(self.leaves) + 1);
        if self.leaves == 0 || k == 0 {
            return best;
        }
        if self.leaves == 1 {
            if threshold <= 1.0 {
                best.push((0.0, 0));
            }
            return best;
        }
        let root = self.nodes.len() - 1;
        self.dfs(root, 0.0, scores, k, std_log(threshold), &mut best);
        best
    }

    fn dfs(
        &self,
        node: usize,
        score: f32,
        scores: &[f32],
        k: usize,
        log_threshold: f32,
        best: &mut Vec<(f32, usize)>,
    ) {
        if score < log_threshold {
            return;
        }
        if best.len() == k && score < worst(best) {
            return;
        }

        let (left, right) = match (self.nodes[node].left, self.nodes[node].right) {
            (Some(left), Some(right)) => (left, right),
            _ => {
                best.push((score, node));
                if best.len() > k {
                    let worst_idx = worst_index(best);
                    best.swap_remove(worst_idx);
                }
                return;
            }
        };

        let f = sigmoid(scores[node - self.leaves]);
        self.dfs(left, score + std_log(1.0 - f), scores, k, log_threshold, best);
        self.dfs(right, score + std_log(f), scores, k, log_threshold, best);
    }
}

fn worst(best: &[(f32, usize)]) -> f32 {
    best.iter().map(|(s, _)| *s).fold(f32::INFINITY, f32::min)
}

fn worst_index(best: &[(f32, usize)]) -> usize {
    best.iter()
        .enumerate()
        .min_by(|a, b| a.1 .0.total_cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_three_labels() {
        let tree = HuffmanTree::build(&[10, 5, 1]);
        assert_eq!(tree.nodes.len(), 5);
        assert_eq!(tree.internal_nodes(), 2);
        // First merge combines the two rarest labels
        assert_eq!(tree.nodes[3].left, Some(2));
        assert_eq!(tree.nodes[3].right, Some(1));
        assert_eq!(tree.nodes[3].count, 6);
        // Root joins the merged node with the frequent label
        assert_eq!(tree.nodes[4].left, Some(3));
        assert_eq!(tree.nodes[4].right, Some(0));
        assert_eq!(tree.nodes[4].count, 16);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let tree = HuffmanTree::build(&[8, 4, 2, 1]);
        let scores = [0.3, -1.2, 2.0];
        let all = tree.top_k(&scores, 4, 0.0);
        assert_eq!(all.len(), 4);
        let total: f32 = all.iter().map(|(s, _)| s.exp()).sum();
        assert!((total - 1.0).abs() < 1e-3, "total was {}", total);
    }

    #[test]
    fn test_top_k_keeps_best() {
        let tree = HuffmanTree::build(&[8, 4, 2, 1]);
        let scores = [0.3, -1.2, 2.0];
        let mut all = tree.top_k(&scores, 4, 0.0);
        all.sort_by(|a, b| b.0.total_cmp(&a.0));

        let top = tree.top_k(&scores, 2, 0.0);
        assert_eq!(top.len(), 2);
        let mut labels: Vec<usize> = top.iter().map(|(_, l)| *l).collect();
        labels.sort_unstable();
        let mut expected = vec![all[0].1, all[1].1];
        expected.sort_unstable();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_threshold_prunes() {
        let tree = HuffmanTree::build(&[8, 4, 2, 1]);
        let scores = [0.3, -1.2, 2.0];
        let kept = tree.top_k(&scores, 4, 0.3);
        assert!(kept.iter().all(|(s, _)| s.exp() >= 0.3 - 1e-4));
    }

    #[test]
    fn test_huge_k_returns_every_leaf() {
        let tree = HuffmanTree::build(&[8, 4, 2, 1]);
        let all = tree.top_k(&[0.3, -1.2, 2.0], usize::MAX - 1, 0.0);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_single_label() {
        let tree = HuffmanTree::build(&[3]);
        assert_eq!(tree.top_k(&[], 1, 0.5), vec![(0.0, 0)]);
    }
}
