//! Runtime choice of cell width
//!
//! `OntologyGraphBuilder::build_auto` picks the cell scalar from the number
//! of relations in the edge set. This enum holds the result behind one type.

use super::csr_graph::CsrOntologyGraph;
use super::query::{NodeIter, OntologyGraph};
use crate::codec::{RelationCodec, ScalarWidth};
use crate::error::GraphError;
use crate::node::Node;
use crate::relation::Relation;

/// A `CsrOntologyGraph` of any supported cell width.
#[derive(Debug, Clone)]
pub enum AnyOntologyGraph<T, R> {
    U8(CsrOntologyGraph<T, R, u8>),
    U16(CsrOntologyGraph<T, R, u16>),
    U32(CsrOntologyGraph<T, R, u32>),
    U64(CsrOntologyGraph<T, R, u64>),
}

macro_rules! dispatch {
    ($self:ident, $graph:ident => $body:expr) => {
        match $self {
            AnyOntologyGraph::U8($graph) => $body,
            AnyOntologyGraph::U16($graph) => $body,
            AnyOntologyGraph::U32($graph) => $body,
            AnyOntologyGraph::U64($graph) => $body,
        }
    };
}

impl<T: Node, R: Relation> AnyOntologyGraph<T, R> {
    /// Width of the cell scalar.
    pub fn width(&self) -> ScalarWidth {
        match self {
            AnyOntologyGraph::U8(_) => ScalarWidth::U8,
            AnyOntologyGraph::U16(_) => ScalarWidth::U16,
            AnyOntologyGraph::U32(_) => ScalarWidth::U32,
            AnyOntologyGraph::U64(_) => ScalarWidth::U64,
        }
    }

    pub fn codec(&self) -> &RelationCodec<R> {
        dispatch!(self, g => g.codec())
    }

    pub fn nodes(&self) -> &[T] {
        dispatch!(self, g => g.nodes())
    }

    /// Number of stored adjacency cells.
    pub fn nnz(&self) -> usize {
        dispatch!(self, g => g.matrix().nnz())
    }

    pub fn hierarchy_relation(&self) -> R {
        dispatch!(self, g => g.hierarchy_relation())
    }

    /// See [`CsrOntologyGraph::adjacent`].
    pub fn adjacent(
        &self,
        source: &T,
        relation: &R,
        inverted: bool,
    ) -> Result<NodeIter<'_, T>, GraphError> {
        dispatch!(self, g => Ok(Box::new(g.adjacent(source, relation, inverted)?)))
    }

    /// See [`CsrOntologyGraph::relations_between`].
    pub fn relations_between(&self, from: &T, to: &T) -> Result<Vec<(R, bool)>, GraphError> {
        dispatch!(self, g => g.relations_between(from, to))
    }
}

impl<T: Node, R: Relation> OntologyGraph<T> for AnyOntologyGraph<T, R> {
    fn root(&self) -> &T {
        dispatch!(self, g => g.root())
    }

    fn parents(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        dispatch!(self, g => g.parents(source, include_source))
    }

    fn children(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        dispatch!(self, g => g.children(source, include_source))
    }

    fn ancestors(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        dispatch!(self, g => g.ancestors(source, include_source))
    }

    fn descendants(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError> {
        dispatch!(self, g => g.descendants(source, include_source))
    }

    fn iter(&self) -> std::slice::Iter<'_, T> {
        dispatch!(self, g => g.iter())
    }

    fn len(&self) -> usize {
        dispatch!(self, g => g.len())
    }

    fn contains(&self, node: &T) -> bool {
        dispatch!(self, g => g.contains(node))
    }
}
