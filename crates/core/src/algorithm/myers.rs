use std::hash::Hash;

use crate::algorithm::{trivial_script, DiffAlgorithm, EditOp};

/// Myers O(ND) diff algorithm, linear-space variant
///
/// Runs the greedy search from both ends at once until the two frontiers
/// overlap on a "middle snake", splits the problem there and recurses on
/// each half. Only two frontier vectors are alive per level, so memory
/// stays O(N + M) while the script is still a shortest one.
pub struct MyersAlgorithm;

impl DiffAlgorithm for MyersAlgorithm {
    fn compute<T: Eq + Hash>(&self, original: &[T], modified: &[T]) -> Vec<EditOp> {
        if let Some(ops) = trivial_script(original.len(), modified.len()) {
            return ops;
        }

        let mut ops = Vec::with_capacity(original.len().max(modified.len()));
        diff_range(original, modified, 0, 0, &mut ops);
        ops
    }

    fn name(&self) -> &'static str {
        "myers"
    }
}

/// Append the script for `original` vs `modified`, whose first elements sit
/// at `original_offset` and `modified_offset` in the full inputs.
fn diff_range<T: PartialEq>(
    original: &[T],
    modified: &[T],
    original_offset: usize,
    modified_offset: usize,
    ops: &mut Vec<EditOp>,
) {
    let prefix = original
        .iter()
        .zip(modified)
        .take_while(|(a, b)| a == b)
        .count();
    push_equal(ops, original_offset, modified_offset, prefix);

    let original = &original[prefix..];
    let modified = &modified[prefix..];
    let original_offset = original_offset + prefix;
    let modified_offset = modified_offset + prefix;

    let suffix = original
        .iter()
        .rev()
        .zip(modified.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let n = original.len() - suffix;
    let m = modified.len() - suffix;
    let (original, modified) = (&original[..n], &modified[..m]);

    if original.is_empty() {
        ops.extend((0..m).map(|j| EditOp::Insert {
            modified: modified_offset + j,
        }));
    } else if modified.is_empty() {
        ops.extend((0..n).map(|i| EditOp::Delete {
            original: original_offset + i,
        }));
    } else {
        match middle_snake(original, modified) {
            Some((x, y)) if (x, y) != (0, 0) && (x, y) != (n, m) => {
                diff_range(&original[..x], &modified[..y], original_offset, modified_offset, ops);
                diff_range(&original[x..], &modified[y..], original_offset + x, modified_offset + y, ops);
            }
            // nothing in common
            _ => {
                ops.extend((0..n).map(|i| EditOp::Delete {
                    original: original_offset + i,
                }));
                ops.extend((0..m).map(|j| EditOp::Insert {
                    modified: modified_offset + j,
                }));
            }
        }
    }

    push_equal(ops, original_offset + n, modified_offset + m, suffix);
}

fn push_equal(ops: &mut Vec<EditOp>, original: usize, modified: usize, len: usize) {
    ops.extend((0..len).map(|i| EditOp::Equal {
        original: original + i,
        modified: modified + i,
    }));
}

/// Find a point on a shortest edit path through the middle of the edit
/// graph. Inputs must be non-empty with differing first and last elements.
///
/// `forward[k]` holds the furthest x reached from the top-left on diagonal
/// `k = x - y`; `reverse[k]` the same measured from the bottom-right.
/// Returns `None` when the inputs share no element.
fn middle_snake<T: PartialEq>(original: &[T], modified: &[T]) -> Option<(usize, usize)> {
    let n = original.len() as isize;
    let m = modified.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let len = 2 * max_d + 2;

    let mut forward = vec![-1isize; len as usize];
    let mut reverse = vec![-1isize; len as usize];
    forward[(offset + 1) as usize] = 0;
    reverse[(offset + 1) as usize] = 0;

    let delta = n - m;
    // with an odd delta the paths meet during a forward step
    let odd = delta % 2 != 0;

    // diagonals pruned after running off the edge of the graph
    let (mut k1_start, mut k1_end, mut k2_start, mut k2_end) = (0isize, 0isize, 0isize, 0isize);

    for d in 0..max_d {
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let idx = (offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && forward[idx - 1] < forward[idx + 1]) {
                forward[idx + 1]
            } else {
                forward[idx - 1] + 1
            };
            let mut y1 = x1 - k1;

            while x1 < n && y1 < m && original[x1 as usize] == modified[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            forward[idx] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if odd {
                let k2_idx = offset + delta - k1;
                if (0..len).contains(&k2_idx) && reverse[k2_idx as usize] != -1 {
                    let x2 = n - reverse[k2_idx as usize];
                    if x1 >= x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let idx = (offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && reverse[idx - 1] < reverse[idx + 1]) {
                reverse[idx + 1]
            } else {
                reverse[idx - 1] + 1
            };
            let mut y2 = x2 - k2;

            while x2 < n
                && y2 < m
                && original[(n - x2 - 1) as usize] == modified[(m - y2 - 1) as usize]
            {
                x2 += 1;
                y2 += 1;
            }
            reverse[idx] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !odd {
                let k1_idx = offset + delta - k2;
                if (0..len).contains(&k1_idx) && forward[k1_idx as usize] != -1 {
                    let x1 = forward[k1_idx as usize];
                    let y1 = x1 - (k1_idx - offset);
                    if x1 >= n - x2 && x1 <= n && (0..=m).contains(&y1) {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::lcs::LcsAlgorithm;
    use crate::algorithm::tests::{assert_valid_script, equal_count, words};

    #[test]
    fn test_myers_basic() {
        let orig = words("hello world");
        let modified = words("hello rust");

        let ops = MyersAlgorithm.compute(&orig, &modified);
        assert_valid_script(&orig, &modified, &ops);
        assert_eq!(
            ops,
            vec![
                EditOp::Equal { original: 0, modified: 0 },
                EditOp::Delete { original: 1 },
                EditOp::Insert { modified: 1 },
            ]
        );
    }

    #[test]
    fn test_all_insertions() {
        let modified = words("hello world");
        let ops = MyersAlgorithm.compute(&[], &modified);

        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(op, EditOp::Insert { .. })));
    }

    #[test]
    fn test_myers_finds_a_longest_common_subsequence() {
        let a: Vec<char> = "ABCABBA".chars().collect();
        let b: Vec<char> = "CBABAC".chars().collect();
        let ops = MyersAlgorithm.compute(&a, &b);

        assert_valid_script(&a, &b, &ops);
        assert_eq!(equal_count(&ops), equal_count(&LcsAlgorithm.compute(&a, &b)));
        assert_eq!(equal_count(&ops), 4);
    }

    #[test]
    fn test_myers_on_chinese_characters() {
        let a: Vec<char> = "今天天气很好".chars().collect();
        let b: Vec<char> = "今天天气不好".chars().collect();
        let ops = MyersAlgorithm.compute(&a, &b);

        assert_valid_script(&a, &b, &ops);
        assert_eq!(equal_count(&ops), 5);
    }

    #[test]
    fn test_single_elements_with_nothing_in_common() {
        let ops = MyersAlgorithm.compute(&['甲'], &['乙']);
        assert_eq!(
            ops,
            vec![EditOp::Delete { original: 0 }, EditOp::Insert { modified: 0 }]
        );
    }

    #[test]
    fn test_large_disjoint_inputs() {
        let a: Vec<char> = std::iter::repeat('甲').take(6000).collect();
        let b: Vec<char> = std::iter::repeat('乙').take(6000).collect();
        let ops = MyersAlgorithm.compute(&a, &b);

        assert_valid_script(&a, &b, &ops);
        assert_eq!(equal_count(&ops), 0);
        assert_eq!(ops.len(), 12_000);
    }

    #[test]
    fn test_large_inputs_with_scattered_edits_match_lcs() {
        let a: Vec<u32> = (0..1500).map(|i| i % 97).collect();
        let b: Vec<u32> = (0..1500)
            .filter(|i| i % 13 != 0)
            .map(|i| if i % 29 == 0 { 1000 + i } else { i % 97 })
            .collect();
        let ops = MyersAlgorithm.compute(&a, &b);

        assert_valid_script(&a, &b, &ops);
        assert_eq!(equal_count(&ops), equal_count(&LcsAlgorithm.compute(&a, &b)));
    }

    #[test]
    fn test_edits_at_both_ends_and_middle() {
        let a: Vec<char> = "xabcdefgy".chars().collect();
        let b: Vec<char> = "zabcXefgw".chars().collect();
        let ops = MyersAlgorithm.compute(&a, &b);

        assert_valid_script(&a, &b, &ops);
        assert_eq!(equal_count(&ops), 6);
    }
}
