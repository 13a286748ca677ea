//! Graph construction
//!
//! Compiles an edge list into a `CsrOntologyGraph` in five steps:
//! 1. Find the root of the hierarchy relation, repairing multiple roots
//! 2. Collect the relation inventory and check it fits the cell width
//! 3. Collect the sorted node inventory
//! 4. Assemble the symmetric CSR adjacency in two passes
//! 5. Check that the hierarchy hangs off the root

use super::any::AnyOntologyGraph;
use super::csr_graph::CsrOntologyGraph;
use super::query::OntologyGraph;
use crate::codec::{DataIndexer, RelationCodec, ScalarWidth};
use crate::config::GraphConfig;
use crate::csr::ImmutableCsrMatrix;
use crate::edge::Edge;
use crate::error::GraphError;
use crate::node::Node;
use crate::relation::{Relation, RelationType};
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Number of offending nodes named in connectivity diagnostics
const DIAGNOSTIC_SAMPLE: usize = 5;

/// Builder for immutable ontology graphs.
#[derive(Debug, Clone)]
pub struct OntologyGraphBuilder<R> {
    hierarchy: R,
    config: GraphConfig,
}

impl Default for OntologyGraphBuilder<RelationType> {
    fn default() -> Self {
        Self::new(RelationType::IsA)
    }
}

impl<R: Relation> OntologyGraphBuilder<R> {
    /// Create a builder using `hierarchy_relation` for root discovery and
    /// the hierarchy queries.
    pub fn new(hierarchy_relation: R) -> Self {
        Self {
            hierarchy: hierarchy_relation,
            config: GraphConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hierarchy_relation(&self) -> R {
        self.hierarchy
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build a graph whose cells are `S` scalars.
    #[instrument(skip_all, fields(edges = edges.len(), width = S::WIDTH))]
    pub fn build<T: Node, S: DataIndexer>(
        &self,
        edges: &[Edge<T, R>],
    ) -> Result<CsrOntologyGraph<T, R, S>, GraphError> {
        let (root, edges) = self.resolve_root(edges)?;

        let codec = RelationCodec::from_edges(&edges);
        codec.check_capacity::<S>()?;
        debug!(
            relations = codec.len(),
            slots = codec.max_idx(),
            "Relation inventory collected"
        );

        let nodes = collect_nodes(&edges);
        let adjacency = assemble_adjacency::<T, R, S>(&nodes, &edges, &codec)?;
        let graph = CsrOntologyGraph::from_parts(root, nodes, adjacency, codec, self.hierarchy)?;

        self.check_connectivity(&graph, &edges)?;

        info!(
            nodes = graph.len(),
            cells = graph.matrix().nnz(),
            relations = graph.codec().len(),
            root = ?graph.root(),
            "Built ontology graph"
        );
        Ok(graph)
    }

    /// Build a graph, choosing the cell width at runtime.
    ///
    /// Uses `config.scalar_width` when set, otherwise the narrowest width
    /// that holds the relations of `edges`.
    #[instrument(skip_all, fields(edges = edges.len()))]
    pub fn build_auto<T: Node>(
        &self,
        edges: &[Edge<T, R>],
    ) -> Result<AnyOntologyGraph<T, R>, GraphError> {
        let width = match self.config.scalar_width {
            Some(width) => width,
            None => ScalarWidth::for_relation_count(RelationCodec::from_edges(edges).len())?,
        };
        debug!(%width, "Selected cell width");

        match width {
            ScalarWidth::U8 => self.build::<T, u8>(edges).map(AnyOntologyGraph::U8),
            ScalarWidth::U16 => self.build::<T, u16>(edges).map(AnyOntologyGraph::U16),
            ScalarWidth::U32 => self.build::<T, u32>(edges).map(AnyOntologyGraph::U32),
            ScalarWidth::U64 => self.build::<T, u64>(edges).map(AnyOntologyGraph::U64),
        }
    }

    /// Pick the root, adding a synthetic one when the hierarchy has several
    /// tops. The input is never modified; repair works on a copy.
    fn resolve_root<'e, T: Node>(
        &self,
        edges: &'e [Edge<T, R>],
    ) -> Result<(T, Cow<'e, [Edge<T, R>]>), GraphError> {
        let mut candidates = root_candidates(edges, &self.hierarchy);

        match candidates.len() {
            0 => Err(GraphError::NoRootCandidate),
            1 => {
                let root = candidates.remove(0);
                debug!(root = ?root, "Found single root");
                Ok((root, Cow::Borrowed(edges)))
            }
            _ if !self.config.repair_multiple_roots => {
                Err(GraphError::ambiguous_root(&candidates))
            }
            _ => {
                let sentinel = T::synthetic_root();
                let (root, tops) = if candidates.binary_search(&sentinel).is_ok() {
                    // The sentinel is already a top; the others go under it
                    let tops: Vec<T> = candidates.into_iter().filter(|c| *c != sentinel).collect();
                    (sentinel, tops)
                } else {
                    (fresh_root(edges)?, candidates)
                };

                warn!(
                    candidates = tops.len(),
                    root = ?root,
                    "Multiple root candidates, adding synthetic root"
                );

                let mut augmented = Vec::with_capacity(edges.len() + tops.len());
                augmented.extend_from_slice(edges);
                augmented.extend(
                    tops.into_iter()
                        .map(|top| Edge::new(top, root.clone(), self.hierarchy)),
                );
                Ok((root, Cow::Owned(augmented)))
            }
        }
    }

    /// Report hierarchy nodes that are not descendants of the root.
    ///
    /// These appear when one part of the hierarchy is a cycle with no top
    /// while another part has one.
    fn check_connectivity<T: Node, S: DataIndexer>(
        &self,
        graph: &CsrOntologyGraph<T, R, S>,
        edges: &[Edge<T, R>],
    ) -> Result<(), GraphError> {
        let reachable: HashSet<&T> = graph.descendants_iter(graph.root(), true)?.collect();

        let mut disconnected: Vec<&T> = edges
            .iter()
            .filter(|e| e.relation == self.hierarchy)
            .flat_map(|e| [&e.subject, &e.object])
            .filter(|node| !reachable.contains(node))
            .collect();
        if disconnected.is_empty() {
            return Ok(());
        }
        disconnected.sort_unstable();
        disconnected.dedup();

        let count = disconnected.len();
        let sample: Vec<String> = disconnected
            .iter()
            .take(DIAGNOSTIC_SAMPLE)
            .map(|node| format!("{:?}", node))
            .collect();

        if self.config.strict_connectivity {
            return Err(GraphError::DisconnectedHierarchy { count, sample });
        }
        warn!(count, sample = ?sample, "Hierarchy nodes not connected to the root");
        Ok(())
    }
}

/// Objects of hierarchy edges that are never the subject of one, sorted.
pub fn root_candidates<T: Node, R: Relation>(edges: &[Edge<T, R>], hierarchy: &R) -> Vec<T> {
    let subjects: HashSet<&T> = edges
        .iter()
        .filter(|e| e.relation == *hierarchy)
        .map(|e| &e.subject)
        .collect();

    let mut candidates: Vec<T> = edges
        .iter()
        .filter(|e| e.relation == *hierarchy && !subjects.contains(&e.object))
        .map(|e| e.object.clone())
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// First synthetic root not used by any edge endpoint.
///
/// Trying one more value than there are nodes always finds a free one,
/// unless the node type runs out of sentinels first.
fn fresh_root<T: Node, R>(edges: &[Edge<T, R>]) -> Result<T, GraphError> {
    let taken: HashSet<&T> = edges
        .iter()
        .flat_map(|e| [&e.subject, &e.object])
        .collect();

    for attempt in 0..=taken.len() {
        match T::nth_synthetic_root(attempt) {
            Some(root) if !taken.contains(&root) => {
                debug!(attempt, root = ?root, "Picked fresh synthetic root");
                return Ok(root);
            }
            Some(_) => {}
            None => break,
        }
    }
    Err(GraphError::synthetic_root_collision(&T::synthetic_root()))
}

/// Every edge endpoint, sorted and deduplicated.
fn collect_nodes<T: Node, R>(edges: &[Edge<T, R>]) -> Vec<T> {
    let mut nodes = Vec::with_capacity(edges.len() * 2);
    for edge in edges {
        nodes.push(edge.subject.clone());
        nodes.push(edge.object.clone());
    }
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

/// Build the symmetric adjacency of `edges` over `nodes`.
///
/// Pass one counts two entries per edge per row to size the arrays exactly,
/// pass two scatters `(column, slot)` entries into place. Each row is then
/// sorted by column and entries for the same column are merged into a single
/// cell, compacting the output.
fn assemble_adjacency<T: Node, R: Relation, S: DataIndexer>(
    nodes: &[T],
    edges: &[Edge<T, R>],
    codec: &RelationCodec<R>,
) -> Result<ImmutableCsrMatrix<S>, GraphError> {
    let n = nodes.len();
    let index_of = |node: &T| {
        nodes
            .binary_search(node)
            .map_err(|_| GraphError::node_not_found(node))
    };

    let mut resolved = Vec::with_capacity(edges.len());
    for edge in edges {
        let subject = index_of(&edge.subject)?;
        let object = index_of(&edge.object)?;
        let forward = codec.calculate_bit_index(&edge.relation, false)?;
        resolved.push((subject, object, forward));
    }

    // Pass one: row degrees, then prefix sums
    let mut indptr = vec![0usize; n + 1];
    for &(subject, object, _) in &resolved {
        indptr[subject + 1] += 1;
        indptr[object + 1] += 1;
    }
    for row in 0..n {
        indptr[row + 1] += indptr[row];
    }

    // Pass two: scatter (column, slot) entries
    let total = indptr[n];
    let mut entries = vec![(0usize, 0usize); total];
    let mut cursor = indptr[..n].to_vec();
    for &(subject, object, forward) in &resolved {
        entries[cursor[subject]] = (object, forward);
        cursor[subject] += 1;
        entries[cursor[object]] = (subject, forward + 1);
        cursor[object] += 1;
    }

    // Merge cells sharing (row, column); indptr[row] is rewritten only
    // after it has been read as the start of the row
    let mut indices = Vec::with_capacity(total);
    let mut data: Vec<S> = Vec::with_capacity(total);
    let mut start = 0;
    for row in 0..n {
        let end = indptr[row + 1];
        let segment = &mut entries[start..end];
        segment.sort_unstable_by_key(|&(col, _)| col);

        let row_begin = indices.len();
        indptr[row] = row_begin;
        for &(col, slot) in segment.iter() {
            if indices.len() > row_begin && indices.last() == Some(&col) {
                let last = data.len() - 1;
                data[last] = S::set_nth_slot(data[last], slot)?;
            } else {
                indices.push(col);
                data.push(S::set_nth_slot(S::empty(), slot)?);
            }
        }
        start = end;
    }
    indptr[n] = indices.len();

    debug!(
        entries = total,
        cells = indices.len(),
        "Assembled adjacency"
    );
    ImmutableCsrMatrix::new(indptr, indices, data, n)
}
