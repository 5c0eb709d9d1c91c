//! Bagged ensemble of CART regression trees.
//!
//! Each tree is grown on a bootstrap resample of the training rows, splitting
//! on whichever feature and threshold most reduces squared error. The forest
//! predicts the mean of its trees.

use crate::domain::entities::item::ItemFeatures;
use crate::domain::error::DomainError;
use crate::domain::ports::estimator::Estimator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub const N_FEATURES: usize = 4;

pub type FeatureRow = [f64; N_FEATURES];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    /// `None` grows each tree until leaves are pure or too small to split.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

impl RegressionTree {
    fn fit(x: &[FeatureRow], y: &[f64], mut sample: Vec<usize>, params: &ForestParams) -> Self {
        let mut tree = RegressionTree { nodes: Vec::new() };
        tree.grow(x, y, &mut sample, 0, params);
        tree
    }

    /// Grow the subtree for `idx` and return its node index.
    fn grow(
        &mut self,
        x: &[FeatureRow],
        y: &[f64],
        idx: &mut [usize],
        depth: usize,
        params: &ForestParams,
    ) -> usize {
        let n = idx.len() as f64;
        let sum: f64 = idx.iter().map(|&i| y[i]).sum();
        let mean = sum / n;

        let depth_reached = params.max_depth.is_some_and(|d| depth >= d);
        let pure = idx.iter().all(|&i| y[i] == y[idx[0]]);
        if depth_reached || pure || idx.len() < params.min_samples_split.max(2) {
            return self.push(Node::Leaf { value: mean });
        }

        let parent_score = sum * sum / n;
        let best = match Self::best_split(x, y, idx, params.min_samples_leaf.max(1)) {
            Some(best) if best.score > parent_score + 1e-9 * parent_score.abs() => best,
            _ => return self.push(Node::Leaf { value: mean }),
        };

        idx.sort_unstable_by(|&a, &b| x[a][best.feature].total_cmp(&x[b][best.feature]));
        let mid = idx.partition_point(|&i| x[i][best.feature] <= best.threshold);

        let at = self.push(Node::Leaf { value: mean });
        let (left_idx, right_idx) = idx.split_at_mut(mid);
        let left = self.grow(x, y, left_idx, depth + 1, params);
        let right = self.grow(x, y, right_idx, depth + 1, params);
        self.nodes[at] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        at
    }

    /// Best split maximizing `Σl²/nl + Σr²/nr`, which is equivalent to
    /// minimizing the children's summed squared error.
    fn best_split(
        x: &[FeatureRow],
        y: &[f64],
        idx: &mut [usize],
        min_leaf: usize,
    ) -> Option<SplitCandidate> {
        let total: f64 = idx.iter().map(|&i| y[i]).sum();
        let n = idx.len();
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..N_FEATURES {
            idx.sort_unstable_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));
            let mut left_sum = 0.0;
            for k in 0..n - 1 {
                left_sum += y[idx[k]];
                let here = x[idx[k]][feature];
                let next = x[idx[k + 1]][feature];
                if here == next {
                    continue;
                }
                let left_n = k + 1;
                let right_n = n - left_n;
                if left_n < min_leaf || right_n < min_leaf {
                    continue;
                }
                let right_sum = total - left_sum;
                let score =
                    left_sum * left_sum / left_n as f64 + right_sum * right_sum / right_n as f64;
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: (here + next) / 2.0,
                        score,
                    });
                }
            }
        }
        best
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn fit(x: &[FeatureRow], y: &[f64], params: ForestParams) -> Result<Self, DomainError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(DomainError::DataUnavailable(format!(
                "Cannot fit a forest on {} rows and {} targets",
                x.len(),
                y.len()
            )));
        }
        if params.n_trees == 0 {
            return Err(DomainError::Validation("n_trees must be at least 1".into()));
        }

        let n = x.len();
        let trees = (0..params.n_trees)
            .map(|t| {
                let mut rng = ChaCha8Rng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(x, y, sample, &params)
            })
            .collect();

        Ok(Self { params, trees })
    }

    pub fn predict_row(&self, row: &FeatureRow) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        total / self.trees.len() as f64
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Estimator for RandomForest {
    fn estimate(&self, features: &ItemFeatures) -> f64 {
        self.predict_row(&features.to_vector())
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<FeatureRow>, Vec<f64>) {
        let x: Vec<FeatureRow> = (0..40).map(|i| [i as f64, 0.0, 0.0, 0.0]).collect();
        let y: Vec<f64> = (0..40).map(|i| if i < 20 { 10.0 } else { 30.0 }).collect();
        (x, y)
    }

    #[test]
    fn test_single_tree_learns_step() {
        let (x, y) = step_data();
        let params = ForestParams::default();
        let tree = RegressionTree::fit(&x, &y, (0..x.len()).collect(), &params);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.predict(&[3.0, 0.0, 0.0, 0.0]), 10.0);
        assert_eq!(tree.predict(&[35.0, 0.0, 0.0, 0.0]), 30.0);
    }

    #[test]
    fn test_max_depth_zero_is_mean() {
        let (x, y) = step_data();
        let params = ForestParams {
            max_depth: Some(0),
            ..ForestParams::default()
        };
        let tree = RegressionTree::fit(&x, &y, (0..x.len()).collect(), &params);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[0.0; 4]), 20.0);
    }

    #[test]
    fn test_forest_is_reproducible_for_seed() {
        let (x, y) = step_data();
        let params = ForestParams {
            n_trees: 5,
            ..ForestParams::default()
        };
        let a = RandomForest::fit(&x, &y, params.clone()).unwrap();
        let b = RandomForest::fit(&x, &y, params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tree_count(), 5);
    }

    #[test]
    fn test_forest_prediction_within_target_range() {
        let (x, y) = step_data();
        let params = ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&x, &y, params).unwrap();
        let low = forest.predict_row(&[0.0, 0.0, 0.0, 0.0]);
        let high = forest.predict_row(&[39.0, 0.0, 0.0, 0.0]);
        assert!((10.0..=30.0).contains(&low));
        assert!((10.0..=30.0).contains(&high));
        assert!(high > low);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = RandomForest::fit(&[], &[], ForestParams::default()).unwrap_err();
        assert!(matches!(err, DomainError::DataUnavailable(_)));
    }
}
