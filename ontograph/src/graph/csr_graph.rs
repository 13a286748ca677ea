//! CSR-backed ontology graph
//!
//! The graph owns a sorted node array and a square, symmetric adjacency
//! matrix. Row `i` and column `i` both stand for `nodes[i]`. For an edge
//! `s -> o` the cell `(s, o)` carries the relation's forward slot and the
//! cell `(o, s)` its inverse slot, so parents and children of a node are both
//! read from the node's own row.

use super::query::{NodeIter, OntologyGraph};
use super::traversal::Closure;
use crate::codec::{DataIndexer, RelationCodec};
use crate::csr::ImmutableCsrMatrix;
use crate::error::GraphError;
use crate::node::Node;
use crate::relation::Relation;

/// Immutable ontology graph whose cells are `S`-wide relation bit sets.
#[derive(Debug, Clone)]
pub struct CsrOntologyGraph<T, R, S> {
    root: T,

    /// Sorted, deduplicated; position = row = column
    nodes: Vec<T>,

    adjacency: ImmutableCsrMatrix<S>,
    codec: RelationCodec<R>,
    hierarchy: R,

    /// Slot of the hierarchy relation, row node is the subject
    hierarchy_forward: usize,

    /// Slot of the hierarchy relation, row node is the object
    hierarchy_inverse: usize,
}

impl<T: Node, R: Relation, S: DataIndexer> CsrOntologyGraph<T, R, S> {
    pub(crate) fn from_parts(
        root: T,
        nodes: Vec<T>,
        adjacency: ImmutableCsrMatrix<S>,
        codec: RelationCodec<R>,
        hierarchy: R,
    ) -> Result<Self, GraphError> {
        if adjacency.n_rows() != nodes.len() || adjacency.n_cols() != nodes.len() {
            return Err(GraphError::malformed(format!(
                "adjacency is {}x{} but there are {} nodes",
                adjacency.n_rows(),
                adjacency.n_cols(),
                nodes.len()
            )));
        }
        if nodes.binary_search(&root).is_err() {
            return Err(GraphError::node_not_found(&root));
        }
        let hierarchy_forward = codec.calculate_bit_index(&hierarchy, false)?;
        let hierarchy_inverse = codec.calculate_bit_index(&hierarchy, true)?;

        Ok(Self {
            root,
            nodes,
            adjacency,
            codec,
            hierarchy,
            hierarchy_forward,
            hierarchy_inverse,
        })
    }

    /// Row/column index of `node`.
    pub fn index_of(&self, node: &T) -> Result<usize, GraphError> {
        self.nodes
            .binary_search(node)
            .map_err(|_| GraphError::node_not_found(node))
    }

    /// Sorted node array.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    pub fn matrix(&self) -> &ImmutableCsrMatrix<S> {
        &self.adjacency
    }

    pub fn codec(&self) -> &RelationCodec<R> {
        &self.codec
    }

    /// Relation used for the hierarchy queries.
    pub fn hierarchy_relation(&self) -> R {
        self.hierarchy
    }

    fn one_hop(
        &self,
        source: &T,
        include_source: bool,
        slot: usize,
    ) -> Result<impl Iterator<Item = &T> + '_, GraphError> {
        let row = self.index_of(source)?;
        let cols = self
            .adjacency
            .col_indices_of_val(row, move |cell: &S| S::is_set(*cell, slot))?;
        let nodes = &self.nodes;
        // A self-loop would report the source a second time
        Ok(include_source
            .then_some(row)
            .into_iter()
            .chain(cols.filter(move |&col| !include_source || col != row))
            .map(move |idx| &nodes[idx]))
    }

    fn closure(
        &self,
        source: &T,
        include_source: bool,
        slot: usize,
    ) -> Result<Closure<'_, T, S>, GraphError> {
        let row = self.index_of(source)?;
        Closure::new(&self.nodes, &self.adjacency, slot, row, include_source)
    }

    /// Nodes one `relation` hop away from `source`.
    ///
    /// With `inverted = false` these are the objects of `source -relation->`
    /// edges, with `inverted = true` the subjects of `-relation-> source`.
    pub fn adjacent(
        &self,
        source: &T,
        relation: &R,
        inverted: bool,
    ) -> Result<impl Iterator<Item = &T> + '_, GraphError> {
        let slot = self.codec.calculate_bit_index(relation, inverted)?;
        self.one_hop(source, false, slot)
    }

    /// Relations encoded between `from` and `to`, as seen from `from`.
    ///
    /// `(r, false)` means an edge `from -r-> to` exists, `(r, true)` an edge
    /// `to -r-> from`.
    pub fn relations_between(&self, from: &T, to: &T) -> Result<Vec<(R, bool)>, GraphError> {
        let row = self.index_of(from)?;
        let col = self.index_of(to)?;
        Ok(self
            .adjacency
            .get(row, col)?
            .map(|cell| self.codec.decode(*cell))
            .unwrap_or_default())
    }

    /// Lazy closure over parents with the concrete iterator type.
    pub fn ancestors_iter(
        &self,
        source: &T,
        include_source: bool,
    ) -> Result<Closure<'_, T, S>, GraphError> {
        self.closure(source, include_source, self.hierarchy_forward)
    }

    /// Lazy closure over children with the concrete iterator type.
    pub fn descendants_iter(
        &self,
        source: &T,
        include_source: bool,
    ) -> Result<Closure<'_, T, S>, GraphError> {
        self.closure(source, include_source, self.hierarchy_inverse)
    }
}

impl<T: Node, R: Relation, S: DataIndexer> OntologyGraph<T> for CsrOntologyGraph<T, R, S> {
    fn root(&self) -> &T {
        &self.root
    }

    fn parents(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        Ok(Box::new(self.one_hop(
            source,
            include_source,
            self.hierarchy_forward,
        )?))
    }

    fn children(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        Ok(Box::new(self.one_hop(
            source,
            include_source,
            self.hierarchy_inverse,
        )?))
    }

    fn ancestors(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        Ok(Box::new(self.ancestors_iter(source, include_source)?))
    }

    fn descendants(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        Ok(Box::new(self.descendants_iter(source, include_source)?))
    }

    fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, node: &T) -> bool {
        self.nodes.binary_search(node).is_ok()
    }
}
