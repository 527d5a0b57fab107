//! Sparse weight vector.
//!
//! Stores only non-zero entries as parallel index/value arrays sorted by
//! index, so a dot product is a single merge walk over two sorted lists.

use serde::{Deserialize, Serialize};

/// Sparse vector of `f64` weights, indices sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVec {
    inds: Vec<u32>,
    vals: Vec<f64>,
}

impl SparseVec {
    pub fn new() -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Build from (index, value) pairs. Indices must be unique; zero values
    /// are dropped, the rest is sorted by index.
    pub fn from_pairs(mut pairs: Vec<(u32, f64)>) -> Self {
        pairs.retain(|(_, v)| *v != 0.0);
        pairs.sort_unstable_by_key(|(i, _)| *i);
        let mut inds = Vec::with_capacity(pairs.len());
        let mut vals = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            inds.push(i);
            vals.push(v);
        }
        SparseVec { inds, vals }
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    /// Iterate stored entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Value at `index`, 0.0 if not stored.
    pub fn get(&self, index: u32) -> f64 {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Dot product via merge walk over the two sorted index lists.
    pub fn dot(&self, other: &SparseVec) -> f64 {
        let mut sum = 0.0;
        let mut a = 0;
        let mut b = 0;
        while a < self.inds.len() && b < other.inds.len() {
            match self.inds[a].cmp(&other.inds[b]) {
                std::cmp::Ordering::Equal => {
                    sum += self.vals[a] * other.vals[b];
                    a += 1;
                    b += 1;
                }
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
            }
        }
        sum
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.vals.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean length. A zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.vals {
                *v /= norm;
            }
        }
    }
}
