//! Sequential human-readable item codes (`BED-003`, `TREE-012`).

use std::collections::HashSet;

use crate::model::{ItemType, LayoutDoc};

/// Parses the numeric suffix of `code` when it carries `prefix`.
fn code_number(code: &str, prefix: &str) -> Option<u64> {
    code.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}

pub fn format_code(prefix: &str, number: u64) -> String {
    format!("{prefix}-{number:03}")
}

/// Allocates codes that collide with neither the document nor earlier
/// allocations from the same allocator.
#[derive(Debug, Clone, Default)]
pub struct CodeAllocator {
    taken: HashSet<String>,
}

impl CodeAllocator {
    pub fn for_doc(doc: &LayoutDoc) -> Self {
        Self {
            taken: doc.codes().map(str::to_string).collect(),
        }
    }

    /// Next code for `item_type`: one past the highest number in use, or
    /// the lowest free number once the highest can no longer be exceeded.
    pub fn next(&mut self, item_type: ItemType) -> Option<String> {
        let prefix = item_type.code_prefix()?;
        let used: HashSet<u64> = self
            .taken
            .iter()
            .filter_map(|c| code_number(c, prefix))
            .collect();
        let highest = used.iter().copied().max().unwrap_or(0);
        let number = highest
            .checked_add(1)
            .or_else(|| (1..u64::MAX).find(|n| !used.contains(n)))?;
        let code = format_code(prefix, number);
        self.taken.insert(code.clone());
        Some(code)
    }

    /// Keeps `existing` when it is free, otherwise allocates a fresh code.
    pub fn keep_or_next(&mut self, item_type: ItemType, existing: Option<&str>) -> Option<String> {
        item_type.code_prefix()?;
        match existing {
            Some(code) if !self.taken.contains(code) => {
                self.taken.insert(code.to_string());
                Some(code.to_string())
            }
            _ => self.next(item_type),
        }
    }
}
