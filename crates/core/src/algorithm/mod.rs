//! Diff algorithms implementation
//!
//! Provides sequence alignment algorithms that turn two sequences into an
//! edit script. They are generic over the element type so the same code
//! aligns token sequences (word-level diff) and characters (character-level
//! diff).
//!
//! Every algorithm produces a script whose `Equal` + `Delete` entries walk
//! the original sequence in order and whose `Equal` + `Insert` entries walk
//! the modified sequence in order.
pub mod lcs;
pub mod myers;
pub mod patience;

use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use lcs::LcsAlgorithm;
pub use myers::MyersAlgorithm;
pub use patience::PatienceAlgorithm;

/// One step of an edit script, indexing into the two input sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// `original[original] == modified[modified]`
    Equal { original: usize, modified: usize },
    /// `original[original]` is not in the modified sequence
    Delete { original: usize },
    /// `modified[modified]` is not in the original sequence
    Insert { modified: usize },
}

impl EditOp {
    fn shifted(self, original_offset: usize, modified_offset: usize) -> Self {
        match self {
            EditOp::Equal { original, modified } => EditOp::Equal {
                original: original + original_offset,
                modified: modified + modified_offset,
            },
            EditOp::Delete { original } => EditOp::Delete {
                original: original + original_offset,
            },
            EditOp::Insert { modified } => EditOp::Insert {
                modified: modified + modified_offset,
            },
        }
    }
}

/// Trait for diff algorithms
pub trait DiffAlgorithm {
    /// Compute an edit script turning `original` into `modified`
    fn compute<T: Eq + Hash>(&self, original: &[T], modified: &[T]) -> Vec<EditOp>;

    fn name(&self) -> &'static str;
}

/// Algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithmKind {
    /// Myers O(ND) shortest edit script (default)
    #[default]
    Myers,
    /// Dynamic-programming longest common subsequence
    Lcs,
    /// Patience diff: anchor on unique common elements, Myers in between
    Patience,
}

impl DiffAlgorithmKind {
    /// Align two sequences with this algorithm.
    ///
    /// The common prefix and suffix are matched up front; the algorithm only
    /// sees the differing middle.
    pub fn diff<T: Eq + Hash>(self, original: &[T], modified: &[T]) -> Vec<EditOp> {
        let prefix = original
            .iter()
            .zip(modified)
            .take_while(|(a, b)| a == b)
            .count();
        let suffix = original[prefix..]
            .iter()
            .rev()
            .zip(modified[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let original_mid = &original[prefix..original.len() - suffix];
        let modified_mid = &modified[prefix..modified.len() - suffix];

        let mut ops: Vec<EditOp> = (0..prefix)
            .map(|i| EditOp::Equal { original: i, modified: i })
            .collect();

        let middle = match self {
            DiffAlgorithmKind::Myers => MyersAlgorithm.compute(original_mid, modified_mid),
            DiffAlgorithmKind::Lcs => LcsAlgorithm.compute(original_mid, modified_mid),
            DiffAlgorithmKind::Patience => PatienceAlgorithm.compute(original_mid, modified_mid),
        };
        ops.extend(middle.into_iter().map(|op| op.shifted(prefix, prefix)));

        let original_tail = original.len() - suffix;
        let modified_tail = modified.len() - suffix;
        ops.extend((0..suffix).map(|i| EditOp::Equal {
            original: original_tail + i,
            modified: modified_tail + i,
        }));

        ops
    }

    pub fn name(self) -> &'static str {
        match self {
            DiffAlgorithmKind::Myers => MyersAlgorithm.name(),
            DiffAlgorithmKind::Lcs => LcsAlgorithm.name(),
            DiffAlgorithmKind::Patience => PatienceAlgorithm.name(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Script for when at least one side is empty
fn trivial_script(original_len: usize, modified_len: usize) -> Option<Vec<EditOp>> {
    if original_len == 0 {
        return Some((0..modified_len).map(|modified| EditOp::Insert { modified }).collect());
    }
    if modified_len == 0 {
        return Some((0..original_len).map(|original| EditOp::Delete { original }).collect());
    }
    None
}

/// Expand matched index pairs (strictly increasing on both sides) into a
/// full script, deletions before insertions in every gap
fn script_from_matches(
    original_len: usize,
    modified_len: usize,
    matches: &[(usize, usize)],
) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity(original_len + modified_len);
    let mut orig_idx = 0;
    let mut mod_idx = 0;

    let sentinel = (original_len, modified_len);
    for &(match_orig, match_mod) in matches.iter().chain(std::iter::once(&sentinel)) {
        while orig_idx < match_orig {
            ops.push(EditOp::Delete { original: orig_idx });
            orig_idx += 1;
        }
        while mod_idx < match_mod {
            ops.push(EditOp::Insert { modified: mod_idx });
            mod_idx += 1;
        }
        if (match_orig, match_mod) != sentinel {
            ops.push(EditOp::Equal {
                original: match_orig,
                modified: match_mod,
            });
            orig_idx += 1;
            mod_idx += 1;
        }
    }

    ops
}
