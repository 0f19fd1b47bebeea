//! Pairwise cosine similarity.
//!
//! The matrix is built once from a set of term vectors and never changes
//! afterwards. Rows are computed in parallel with Rayon; every cell is
//! computed by the same arithmetic regardless of scheduling, so repeated
//! builds are bit-identical.

use crate::vector::SparseVector;
use rayon::prelude::*;

/// Cosine similarity of two vectors, 0.0 when either norm is 0.
pub fn cosine(u: &SparseVector, v: &SparseVector) -> f64 {
    cosine_with_norms(u, u.norm(), v, v.norm())
}

fn cosine_with_norms(u: &SparseVector, u_norm: f64, v: &SparseVector, v_norm: f64) -> f64 {
    if u_norm == 0.0 || v_norm == 0.0 {
        return 0.0;
    }
    (u.dot(v) / (u_norm * v_norm)).clamp(0.0, 1.0)
}

/// Dense N x N symmetric matrix of similarity scores in [0, 1].
///
/// The diagonal is always 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute all pairwise cosine similarities.
    ///
    /// Only the upper triangle is computed; the lower triangle is mirrored
    /// from it so symmetry is exact.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(SparseVector::norm).collect();

        let upper: Vec<Vec<f64>> = (0..size)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..size)
                    .map(|j| cosine_with_norms(&vectors[i], norms[i], &vectors[j], norms[j]))
                    .collect()
            })
            .collect();

        let mut scores = vec![0.0; size * size];
        for (i, row) in upper.into_iter().enumerate() {
            scores[i * size + i] = 1.0;
            for (offset, score) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                scores[i * size + j] = score;
                scores[j * size + i] = score;
            }
        }

        Self { size, scores }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Score between positions `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.scores[i * self.size + j])
        } else {
            None
        }
    }

    /// Full row of scores for position `i`
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.scores[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }
}
