//! Query facade shared by every graph representation
//!
//! Consumers such as information-content or similarity computations depend
//! on this trait only, never on the CSR layout, bit positions or node order.

use crate::error::GraphError;
use crate::node::Node;
use std::collections::BTreeSet;

/// Boxed lazy sequence of nodes borrowed from a graph.
pub type NodeIter<'a, T> = Box<dyn Iterator<Item = &'a T> + 'a>;

/// Hierarchy queries over an immutable ontology graph.
///
/// Every method taking a node fails with [`GraphError::NodeNotFound`] when
/// the node is not part of the graph; an unknown node is never reported as
/// an empty result.
pub trait OntologyGraph<T: Node> {
    /// The unique top node of the hierarchy.
    fn root(&self) -> &T;

    /// Direct parents of `source`, preceded by `source` if `include_source`.
    fn parents(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError>;

    /// Direct children of `source`, preceded by `source` if `include_source`.
    fn children(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError>;

    /// Transitive closure of [`parents`](Self::parents).
    fn ancestors(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError>;

    /// Transitive closure of [`children`](Self::children).
    fn descendants(&self, source: &T, include_source: bool) -> Result<NodeIter<'_, T>, GraphError>;

    /// All nodes in sorted order.
    fn iter(&self) -> std::slice::Iter<'_, T>;

    /// Number of nodes, including a synthetic root if one was added.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, node: &T) -> bool;

    /// Check that `node` has no children.
    fn is_leaf(&self, node: &T) -> Result<bool, GraphError> {
        Ok(self.children(node, false)?.next().is_none())
    }

    /// Check that `parent` is a direct parent of `child`.
    fn is_parent_of(&self, parent: &T, child: &T) -> Result<bool, GraphError> {
        self.ensure_contains(parent)?;
        Ok(self.parents(child, false)?.any(|p| p == parent))
    }

    /// Check that `child` is a direct child of `parent`.
    fn is_child_of(&self, child: &T, parent: &T) -> Result<bool, GraphError> {
        self.is_parent_of(parent, child)
    }

    /// Check that `ancestor` is a strict ancestor of `node`.
    fn is_ancestor_of(&self, ancestor: &T, node: &T) -> Result<bool, GraphError> {
        self.ensure_contains(ancestor)?;
        Ok(self.ancestors(node, false)?.any(|a| a == ancestor))
    }

    /// Check that `descendant` is a strict descendant of `node`.
    fn is_descendant_of(&self, descendant: &T, node: &T) -> Result<bool, GraphError> {
        self.is_ancestor_of(node, descendant)
    }

    /// Nodes sharing at least one parent with `node`, sorted, without `node`.
    fn siblings(&self, node: &T) -> Result<Vec<&T>, GraphError> {
        let mut siblings = BTreeSet::new();
        for parent in self.parents(node, false)? {
            for child in self.children(parent, false)? {
                if child != node {
                    siblings.insert(child);
                }
            }
        }
        Ok(siblings.into_iter().collect())
    }

    #[doc(hidden)]
    fn ensure_contains(&self, node: &T) -> Result<(), GraphError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(GraphError::node_not_found(node))
        }
    }
}
