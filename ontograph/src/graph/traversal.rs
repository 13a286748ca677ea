//! Transitive traversal over the CSR adjacency
//!
//! Closure queries (ancestors, descendants) walk the matrix breadth-first
//! with a worklist owned by the iterator. A seen-set guarantees every node is
//! emitted and expanded at most once, so traversal terminates on cycles.
//! Nothing is computed until the consumer pulls; dropping the iterator stops
//! the walk.

use crate::codec::DataIndexer;
use crate::csr::ImmutableCsrMatrix;
use crate::error::GraphError;
use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;

/// Lazy transitive closure following one bit slot of the adjacency cells.
#[derive(Debug, Clone)]
pub struct Closure<'a, T, S> {
    nodes: &'a [T],
    matrix: &'a ImmutableCsrMatrix<S>,

    /// Slot that must be set for a cell to be followed
    slot: usize,

    /// Source row, emitted first when the caller asked for it
    pending_source: Option<usize>,

    frontier: VecDeque<usize>,
    seen: HashSet<usize>,
}

impl<'a, T, S: DataIndexer> Closure<'a, T, S> {
    /// Start a traversal at `source`. The one-hop neighbours of the source
    /// are queued immediately; everything further is expanded on demand.
    pub(crate) fn new(
        nodes: &'a [T],
        matrix: &'a ImmutableCsrMatrix<S>,
        slot: usize,
        source: usize,
        include_source: bool,
    ) -> Result<Self, GraphError> {
        let mut closure = Self {
            nodes,
            matrix,
            slot,
            pending_source: include_source.then_some(source),
            frontier: VecDeque::new(),
            seen: HashSet::new(),
        };

        // The source is never re-emitted, even when a cycle leads back to it
        closure.seen.insert(source);
        let slot = closure.slot;
        for col in matrix.col_indices_of_val(source, |cell: &S| S::is_set(*cell, slot))? {
            if closure.seen.insert(col) {
                closure.frontier.push_back(col);
            }
        }

        Ok(closure)
    }

    fn expand(&mut self, row: usize) {
        let (matrix, slot) = (self.matrix, self.slot);
        // Columns of a square adjacency matrix are always valid rows
        let Ok(cols) = matrix.col_indices_of_val(row, |cell: &S| S::is_set(*cell, slot)) else {
            debug_assert!(false, "column {} is not a valid row", row);
            return;
        };
        for col in cols {
            if self.seen.insert(col) {
                self.frontier.push_back(col);
            }
        }
    }

    /// Number of nodes queued but not yet emitted.
    pub fn pending(&self) -> usize {
        self.frontier.len() + usize::from(self.pending_source.is_some())
    }
}

impl<'a, T, S: DataIndexer> Iterator for Closure<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if let Some(source) = self.pending_source.take() {
            return Some(&self.nodes[source]);
        }
        let row = self.frontier.pop_front()?;
        self.expand(row);
        Some(&self.nodes[row])
    }
}

impl<T, S: DataIndexer> FusedIterator for Closure<'_, T, S> {}
