//! Truth-table cache.
//!
//! The cache deduplicates Boolean functions and assigns each one a stable integer [`Literal`].
//! Functions are stored in normal form, with bit 0 cleared: a function whose bit 0 is set is
//! stored as its complement, and the returned literal has its lowest bit set.
//!
//! ```text
//! literal = 2 * slot + complemented
//! ```
//!
//! Consequently a function and its complement share one slot, and the complement of the
//! function behind literal `l` is always `l ^ 1`.

use std::collections::HashMap;

use crate::truth_table::TruthTable;

/// Key of a function in the [`TruthTableCache`].
pub type Literal = u32;

#[derive(Debug, Clone, Default)]
pub struct TruthTableCache {
    data: Vec<TruthTable>,
    indices: HashMap<TruthTable, u32>,
}

impl TruthTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored slots (each slot covers a function and its complement).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Register `function` and return its literal.
    ///
    /// Returns the existing literal if the function (or its complement) is already present.
    pub fn insert(&mut self, function: &TruthTable) -> Literal {
        let complemented = function.get_bit(0);
        let normal = if complemented { !function } else { function.clone() };

        if let Some(&slot) = self.indices.get(&normal) {
            return 2 * slot + complemented as u32;
        }

        let slot = self.data.len() as u32;
        self.indices.insert(normal.clone(), slot);
        self.data.push(normal);
        2 * slot + complemented as u32
    }

    /// Find the literal of `function` without registering it.
    pub fn find(&self, function: &TruthTable) -> Option<Literal> {
        let complemented = function.get_bit(0);
        let slot = if complemented {
            self.indices.get(&!function)
        } else {
            self.indices.get(function)
        };
        slot.map(|&slot| 2 * slot + complemented as u32)
    }

    /// Check whether `literal` designates a registered function.
    pub fn contains(&self, literal: Literal) -> bool {
        ((literal >> 1) as usize) < self.data.len()
    }

    /// Get the function behind `literal`.
    pub fn get(&self, literal: Literal) -> TruthTable {
        assert!(self.contains(literal), "Literal {} is not in the cache", literal);
        let entry = &self.data[(literal >> 1) as usize];
        if literal & 1 != 0 {
            !entry
        } else {
            entry.clone()
        }
    }

    /// Number of variables of the function behind `literal`.
    pub fn num_vars(&self, literal: Literal) -> u32 {
        assert!(self.contains(literal), "Literal {} is not in the cache", literal);
        self.data[(literal >> 1) as usize].num_vars()
    }
}
