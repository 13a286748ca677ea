//! Relation codec
//!
//! Maps every (relation, direction) pair of an edge set onto a bit slot of
//! the CSR cell scalar. Relation `i` in first-seen order owns slots `2i`
//! (forward) and `2i + 1` (inverse).

use super::DataIndexer;
use crate::edge::Edge;
use crate::error::GraphError;
use crate::relation::Relation;
use std::collections::HashMap;

/// Bit layout of the relations present in an edge set.
#[derive(Debug, Clone)]
pub struct RelationCodec<R> {
    /// Relations in first-seen order
    relations: Vec<R>,

    /// Relation -> position in `relations`
    positions: HashMap<R, usize>,
}

impl<R: Relation> RelationCodec<R> {
    /// Create a codec from an explicit relation list. Repeats are ignored.
    pub fn new(relations: impl IntoIterator<Item = R>) -> Self {
        let mut codec = Self {
            relations: Vec::new(),
            positions: HashMap::new(),
        };
        for relation in relations {
            codec.push(relation);
        }
        codec
    }

    /// Create a codec from the distinct relations of an edge set.
    pub fn from_edges<T>(edges: &[Edge<T, R>]) -> Self {
        Self::new(edges.iter().map(|e| e.relation))
    }

    fn push(&mut self, relation: R) {
        if !self.positions.contains_key(&relation) {
            self.positions.insert(relation, self.relations.len());
            self.relations.push(relation);
        }
    }

    /// Relations in slot order.
    pub fn relations(&self) -> &[R] {
        &self.relations
    }

    /// Number of distinct relations.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn contains(&self, relation: &R) -> bool {
        self.positions.contains_key(relation)
    }

    /// Bit slot of `relation` in the given direction.
    pub fn calculate_bit_index(&self, relation: &R, inverted: bool) -> Result<usize, GraphError> {
        self.positions
            .get(relation)
            .map(|&pos| 2 * pos + usize::from(inverted))
            .ok_or_else(|| GraphError::unknown_relation(relation))
    }

    /// Number of slots this codec needs.
    pub fn max_idx(&self) -> usize {
        2 * self.relations.len()
    }

    /// Fail if the codec needs more slots than `S` offers.
    pub fn check_capacity<S: DataIndexer>(&self) -> Result<(), GraphError> {
        if self.max_idx() > S::max_idx() {
            return Err(GraphError::capacity_exceeded(self.max_idx(), S::max_idx()));
        }
        Ok(())
    }

    /// Check whether `cell` holds `relation` in the given direction.
    pub fn is_set<S: DataIndexer>(&self, cell: S, relation: &R, inverted: bool) -> bool {
        self.calculate_bit_index(relation, inverted)
            .map(|idx| S::is_set(cell, idx))
            .unwrap_or(false)
    }

    /// Return `cell` with `relation` set in the given direction.
    pub fn encode<S: DataIndexer>(
        &self,
        cell: S,
        relation: &R,
        inverted: bool,
    ) -> Result<S, GraphError> {
        let idx = self.calculate_bit_index(relation, inverted)?;
        S::set_nth_slot(cell, idx)
    }

    /// All (relation, inverted) pairs held by `cell`, in slot order.
    pub fn decode<S: DataIndexer>(&self, cell: S) -> Vec<(R, bool)> {
        let mut pairs = Vec::with_capacity(S::count_set(cell));
        for (pos, relation) in self.relations.iter().enumerate() {
            if S::is_set(cell, 2 * pos) {
                pairs.push((*relation, false));
            }
            if S::is_set(cell, 2 * pos + 1) {
                pairs.push((*relation, true));
            }
        }
        pairs
    }
}
