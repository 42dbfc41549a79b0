use std::hash::Hash;

use crate::algorithm::{script_from_matches, trivial_script, DiffAlgorithm, EditOp};

/// Dynamic-programming longest common subsequence, O(NM) time and space
pub struct LcsAlgorithm;

impl DiffAlgorithm for LcsAlgorithm {
    fn compute<T: Eq + Hash>(&self, original: &[T], modified: &[T]) -> Vec<EditOp> {
        if let Some(ops) = trivial_script(original.len(), modified.len()) {
            return ops;
        }

        let matches = longest_common_subsequence(original, modified);
        script_from_matches(original.len(), modified.len(), &matches)
    }

    fn name(&self) -> &'static str {
        "lcs"
    }
}

/// Index pairs of one longest common subsequence, increasing on both sides
pub fn longest_common_subsequence<T: PartialEq>(original: &[T], modified: &[T]) -> Vec<(usize, usize)> {
    let n = original.len();
    let m = modified.len();

    // DP table
    let mut dp = vec![vec![0usize; m + 1]; n + 1];

    for i in 1..=n {
        for j in 1..=m {
            if original[i - 1] == modified[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    // Backtrack to find LCS
    let mut lcs = Vec::with_capacity(dp[n][m]);
    let mut i = n;
    let mut j = m;

    while i > 0 && j > 0 {
        if original[i - 1] == modified[j - 1] {
            lcs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}
