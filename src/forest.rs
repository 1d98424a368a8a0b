//! Bagged decision-tree ensemble over the indicator features.

use crate::error::{Error, Result};
use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::info;

/// Ensemble hyperparameters.
///
/// The defaults (100 trees, seed 42) are fixed so that two fits over the
/// same table produce identical predictions.
#[derive(Debug, Clone)]
pub struct ForestParams {
    pub trees: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams { trees: 100, seed: 42, max_depth: None }
    }
}

/// A trained forest: bootstrap-sampled trees combined by majority vote.
#[derive(Debug)]
pub struct RemedyForest {
    trees: Vec<DecisionTree<f64, usize>>,
    classes: usize,
}

impl RemedyForest {
    /// Fits `params.trees` trees, each on a bootstrap sample of the rows.
    ///
    /// All randomness comes from a single rng seeded with `params.seed`, so
    /// the fitted forest is a pure function of the data and the params.
    pub fn fit(params: &ForestParams, x: &Array2<f64>, y: &Array1<usize>) -> Result<Self> {
        let rows = x.nrows();
        if rows == 0 {
            return Err(Error::EmptyDataset);
        }

        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.trees);
        for _ in 0..params.trees {
            let indices: Vec<usize> = (0..rows).map(|_| rng.random_range(0..rows)).collect();
            let sample = Dataset::new(x.select(Axis(0), &indices), y.select(Axis(0), &indices));
            let tree = DecisionTree::params()
                .max_depth(params.max_depth)
                .fit(&sample)
                .map_err(|e| Error::Training(e.to_string()))?;
            trees.push(tree);
        }

        let classes = y.iter().max().map(|&c| c + 1).unwrap_or(0);
        info!(
            trees = trees.len(),
            rows,
            features = x.ncols(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trained remedy forest"
        );
        Ok(RemedyForest { trees, classes })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Majority-vote class indices for each row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<usize> {
        let per_tree: Vec<Array1<usize>> = self.trees.iter().map(|tree| tree.predict(x)).collect();

        let mut out = Array1::zeros(x.nrows());
        for row in 0..x.nrows() {
            let mut votes = vec![0usize; self.classes];
            for prediction in &per_tree {
                votes[prediction[row]] += 1;
            }
            out[row] = argmax(&votes);
        }
        out
    }

    /// Predicts a single aligned feature row.
    pub fn predict_one(&self, row: ArrayView1<f64>) -> usize {
        let x = row.insert_axis(Axis(0)).to_owned();
        self.predict(&x)[0]
    }
}

/// Index of the largest vote count; ties resolve to the lower class index.
fn argmax(votes: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in votes.iter().enumerate() {
        if count > votes[best] {
            best = class;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Two well-separated classes with several identical rows each, so every
    /// bootstrap sample sees both classes.
    fn toy() -> (Array2<f64>, Array1<usize>) {
        let mut x = Array2::zeros((16, 2));
        let mut y = Array1::zeros(16);
        for row in 0..16 {
            if row < 8 {
                x[[row, 0]] = 1.0;
            } else {
                x[[row, 1]] = 1.0;
                y[row] = 1;
            }
        }
        (x, y)
    }

    #[test]
    fn recovers_separable_training_labels() {
        let (x, y) = toy();
        let forest = RemedyForest::fit(&ForestParams::default(), &x, &y).unwrap();
        assert_eq!(forest.n_trees(), 100);
        assert_eq!(forest.predict(&x), y);
    }

    #[test]
    fn fit_is_deterministic_for_a_fixed_seed() {
        let (x, y) = toy();
        let params = ForestParams { trees: 25, ..ForestParams::default() };
        let a = RemedyForest::fit(&params, &x, &y).unwrap();
        let b = RemedyForest::fit(&params, &x, &y).unwrap();
        assert_eq!(a.predict(&x), b.predict(&x));

        let probe = array![[1.0, 0.0]];
        assert_eq!(a.predict(&probe), b.predict(&probe));
    }

    #[test]
    fn predict_one_matches_batch_prediction() {
        let (x, y) = toy();
        let forest = RemedyForest::fit(&ForestParams::default(), &x, &y).unwrap();
        let batch = forest.predict(&x);
        for row in 0..x.nrows() {
            assert_eq!(forest.predict_one(x.row(row)), batch[row]);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let x = Array2::zeros((0, 2));
        let y = Array1::zeros(0);
        let err = RemedyForest::fit(&ForestParams::default(), &x, &y).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn argmax_prefers_the_lower_class_on_ties() {
        assert_eq!(argmax(&[3, 3, 1]), 0);
        assert_eq!(argmax(&[1, 4, 4]), 1);
        assert_eq!(argmax(&[0, 0, 5]), 2);
    }
}
