//! Diff result types and structures
//!
//! An edit script from [`crate::algorithm`] is collapsed into [`DiffPart`]s:
//! each maximal run of units with the same status becomes one part. Within
//! each changed stretch between two unchanged runs, removed units are
//! emitted before added ones.

use std::fmt;

use serde::Serialize;

use crate::algorithm::EditOp;

/// Status of a diff part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both texts
    Same,
    /// Only in the second text
    Added,
    /// Only in the first text
    Removed,
}

/// Granularity a diff was computed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffUnit {
    /// Normalized tokens, joined with a single space
    Token,
    /// Raw Unicode scalar values, joined with nothing
    Char,
}

impl DiffUnit {
    pub fn separator(self) -> &'static str {
        match self {
            DiffUnit::Token => " ",
            DiffUnit::Char => "",
        }
    }
}

/// A maximal run of units sharing one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffPart {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: DiffKind,
    /// Number of units in this run
    pub count: usize,
}

impl DiffPart {
    pub fn new(value: impl Into<String>, kind: DiffKind, count: usize) -> Self {
        Self {
            value: value.into(),
            kind,
            count,
        }
    }

    pub fn same(value: impl Into<String>, count: usize) -> Self {
        Self::new(value, DiffKind::Same, count)
    }

    pub fn added(value: impl Into<String>, count: usize) -> Self {
        Self::new(value, DiffKind::Added, count)
    }

    pub fn removed(value: impl Into<String>, count: usize) -> Self {
        Self::new(value, DiffKind::Removed, count)
    }

    /// Get a human-readable description of this part
    pub fn description(&self) -> String {
        match self.kind {
            DiffKind::Same => format!("Same: \"{}\"", self.value),
            DiffKind::Added => format!("Added: \"{}\"", self.value),
            DiffKind::Removed => format!("Removed: \"{}\"", self.value),
        }
    }
}

/// Collapse an edit script over `original`/`modified` into diff parts
pub fn collapse<S: AsRef<str>>(
    ops: &[EditOp],
    original: &[S],
    modified: &[S],
    unit: DiffUnit,
) -> Vec<DiffPart> {
    let mut builder = PartBuilder::new(unit);

    for op in ops {
        match *op {
            EditOp::Equal { original: i, .. } => builder.same(original[i].as_ref()),
            EditOp::Delete { original: i } => builder.removed(original[i].as_ref()),
            EditOp::Insert { modified: j } => builder.added(modified[j].as_ref()),
        }
    }

    builder.finish()
}

/// Accumulates units; removed and added units between two unchanged runs
/// are buffered separately and flushed removed-first
struct PartBuilder<'a> {
    unit: DiffUnit,
    parts: Vec<DiffPart>,
    same: Vec<&'a str>,
    removed: Vec<&'a str>,
    added: Vec<&'a str>,
}

impl<'a> PartBuilder<'a> {
    fn new(unit: DiffUnit) -> Self {
        Self {
            unit,
            parts: Vec::new(),
            same: Vec::new(),
            removed: Vec::new(),
            added: Vec::new(),
        }
    }

    fn same(&mut self, value: &'a str) {
        self.flush_changes();
        self.same.push(value);
    }

    fn removed(&mut self, value: &'a str) {
        self.flush_same();
        self.removed.push(value);
    }

    fn added(&mut self, value: &'a str) {
        self.flush_same();
        self.added.push(value);
    }

    fn flush_same(&mut self) {
        let units = std::mem::take(&mut self.same);
        self.emit(units, DiffKind::Same);
    }

    fn flush_changes(&mut self) {
        let removed = std::mem::take(&mut self.removed);
        let added = std::mem::take(&mut self.added);
        self.emit(removed, DiffKind::Removed);
        self.emit(added, DiffKind::Added);
    }

    fn emit(&mut self, units: Vec<&'a str>, kind: DiffKind) {
        if units.is_empty() {
            return;
        }
        self.parts.push(DiffPart::new(
            units.join(self.unit.separator()),
            kind,
            units.len(),
        ));
    }

    fn finish(mut self) -> Vec<DiffPart> {
        self.flush_same();
        self.flush_changes();
        self.parts
    }
}

/// The first text as seen through the diff: `Same` and `Removed` parts
pub fn original_side(parts: &[DiffPart], unit: DiffUnit) -> String {
    join_side(parts, unit, DiffKind::Removed)
}

/// The second text as seen through the diff: `Same` and `Added` parts
pub fn modified_side(parts: &[DiffPart], unit: DiffUnit) -> String {
    join_side(parts, unit, DiffKind::Added)
}

fn join_side(parts: &[DiffPart], unit: DiffUnit, changed: DiffKind) -> String {
    parts
        .iter()
        .filter(|p| p.kind == DiffKind::Same || p.kind == changed)
        .map(|p| p.value.as_str())
        .collect::<Vec<_>>()
        .join(unit.separator())
}

/// Statistics about the diff, counted in units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DiffStatistics {
    /// Units present in both texts
    pub same: usize,

    /// Units only in the second text
    pub added: usize,

    /// Units only in the first text
    pub removed: usize,

    /// Number of changed parts (added or removed runs)
    pub changed_parts: usize,

    /// Fraction of units changed (0.0 to 1.0)
    pub change_ratio: f64,
}

impl DiffStatistics {
    pub fn from_parts(parts: &[DiffPart]) -> Self {
        let mut stats = Self::default();
        for part in parts {
            match part.kind {
                DiffKind::Same => stats.same += part.count,
                DiffKind::Added => {
                    stats.added += part.count;
                    stats.changed_parts += 1;
                }
                DiffKind::Removed => {
                    stats.removed += part.count;
                    stats.changed_parts += 1;
                }
            }
        }
        stats.calculate_change_ratio();
        stats
    }

    /// Calculate the change ratio
    pub fn calculate_change_ratio(&mut self) {
        let total = self.same + self.added + self.removed;
        self.change_ratio = if total > 0 {
            (self.added + self.removed) as f64 / total as f64
        } else {
            0.0
        };
    }

    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl fmt::Display for DiffStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} same, {} added, {} removed ({:.1}% changed)",
            self.same,
            self.added,
            self.removed,
            self.change_ratio * 100.0
        )
    }
}
