//! Solution Decoder
//!
//! Maps a basis-state index to per-node partition labels. Bit i of the
//! index (least significant first) is the label of node i.

use std::fmt;

use serde::Serialize;

use crate::error::{MaxCutError, Result};

/// Per-node binary labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Solution {
    labels: Vec<u8>,
}

impl Solution {
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Label of node i
    pub fn label(&self, node: usize) -> u8 {
        self.labels[node]
    }

    /// Re-encode as a state index (label i at bit i)
    pub fn to_index(&self) -> u64 {
        self.labels
            .iter()
            .enumerate()
            .take(64)
            .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << i))
    }

    /// Nodes labeled 0 and nodes labeled 1
    pub fn partition(&self) -> (Vec<usize>, Vec<usize>) {
        let (zeros, ones): (Vec<usize>, Vec<usize>) =
            (0..self.labels.len()).partition(|&i| self.labels[i] == 0);
        (zeros, ones)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, b) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{b}")?;
        }
        write!(f, "]")
    }
}

/// Decode a state index into n labels
///
/// Fails with [`MaxCutError::OutOfRange`] when `index < 0` or
/// `index >= 2^num_nodes`.
pub fn decode(index: i64, num_nodes: usize) -> Result<Solution> {
    let out_of_range = MaxCutError::OutOfRange {
        index: i128::from(index),
        num_nodes,
    };

    if index < 0 {
        return Err(out_of_range);
    }
    // 2^n exceeds i64::MAX once n >= 63, so every non-negative index fits
    if num_nodes < 63 && index >= (1i64 << num_nodes) {
        return Err(out_of_range);
    }

    let labels = (0..num_nodes)
        .map(|i| if i < 63 { ((index >> i) & 1) as u8 } else { 0 })
        .collect();

    Ok(Solution { labels })
}

/// Unsigned form of [`decode`], for solver state indices
pub fn decode_state(state: u64, num_nodes: usize) -> Result<Solution> {
    let index = i64::try_from(state).map_err(|_| MaxCutError::OutOfRange {
        index: i128::from(state),
        num_nodes,
    })?;
    decode(index, num_nodes)
}
