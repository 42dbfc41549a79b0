use std::collections::HashMap;
use std::hash::Hash;

use crate::algorithm::myers::MyersAlgorithm;
use crate::algorithm::{trivial_script, DiffAlgorithm, DiffAlgorithmKind, EditOp};

/// Patience diff algorithm
///
/// Anchors on elements that occur exactly once on each side, keeps the
/// longest run of anchors that is increasing on both sides, and recurses
/// into the gaps. Regions without unique elements are handed to Myers.
pub struct PatienceAlgorithm;

impl DiffAlgorithm for PatienceAlgorithm {
    fn compute<T: Eq + Hash>(&self, original: &[T], modified: &[T]) -> Vec<EditOp> {
        if let Some(ops) = trivial_script(original.len(), modified.len()) {
            return ops;
        }

        let anchors = unique_anchors(original, modified);
        if anchors.is_empty() {
            return MyersAlgorithm.compute(original, modified);
        }

        let mut ops = Vec::with_capacity(original.len() + modified.len());
        let mut orig_start = 0;
        let mut mod_start = 0;

        for &(anchor_orig, anchor_mod) in &anchors {
            let gap = DiffAlgorithmKind::Patience.diff(
                &original[orig_start..anchor_orig],
                &modified[mod_start..anchor_mod],
            );
            ops.extend(gap.into_iter().map(|op| op.shifted(orig_start, mod_start)));
            ops.push(EditOp::Equal {
                original: anchor_orig,
                modified: anchor_mod,
            });
            orig_start = anchor_orig + 1;
            mod_start = anchor_mod + 1;
        }

        let tail = DiffAlgorithmKind::Patience.diff(&original[orig_start..], &modified[mod_start..]);
        ops.extend(tail.into_iter().map(|op| op.shifted(orig_start, mod_start)));

        ops
    }

    fn name(&self) -> &'static str {
        "patience"
    }
}

/// Elements unique on both sides, reduced to the longest chain increasing
/// on both sides
fn unique_anchors<T: Eq + Hash>(original: &[T], modified: &[T]) -> Vec<(usize, usize)> {
    let orig_counts = occurrences(original);
    let mod_counts = occurrences(modified);

    let mut pairs: Vec<(usize, usize)> = orig_counts
        .iter()
        .filter_map(|(item, &(count, orig_pos))| match mod_counts.get(item) {
            Some(&(1, mod_pos)) if count == 1 => Some((orig_pos, mod_pos)),
            _ => None,
        })
        .collect();

    pairs.sort_unstable();
    longest_increasing_chain(&pairs)
}

/// Element -> (occurrence count, position of last occurrence)
fn occurrences<T: Eq + Hash>(items: &[T]) -> HashMap<&T, (usize, usize)> {
    let mut counts: HashMap<&T, (usize, usize)> = HashMap::new();
    for (pos, item) in items.iter().enumerate() {
        let entry = counts.entry(item).or_insert((0, pos));
        entry.0 += 1;
        entry.1 = pos;
    }
    counts
}

/// Longest subsequence of `pairs` (sorted by original position) whose
/// modified positions increase, via patience sorting
fn longest_increasing_chain(pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; pairs.len()];

    for (i, &(_, mod_pos)) in pairs.iter().enumerate() {
        let pile = tails.partition_point(|&t| pairs[t].1 < mod_pos);
        if pile > 0 {
            prev[i] = Some(tails[pile - 1]);
        }
        if pile == tails.len() {
            tails.push(i);
        } else {
            tails[pile] = i;
        }
    }

    let mut chain = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        chain.push(pairs[i]);
        cursor = prev[i];
    }
    chain.reverse();
    chain
}
