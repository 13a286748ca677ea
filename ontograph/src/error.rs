//! Graph error types.
//!
//! A single error enum covers every failure the engine can report: capacity
//! problems with the chosen scalar width, topology problems found while
//! discovering the root, lookups of unknown nodes, and malformed sparse
//! storage.

use thiserror::Error;

/// Unified errors from graph construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The edge set uses more relation slots than the scalar width provides.
    #[error("Relation capacity exceeded: {required} bit slots required, {available} available")]
    CapacityExceeded { required: usize, available: usize },

    /// Every object of a hierarchy edge is also a subject of one.
    #[error("No root candidate found for the hierarchy relation")]
    NoRootCandidate,

    /// Several root candidates exist and root repair is disabled.
    #[error("Ambiguous root: {} candidates {candidates:?}", .candidates.len())]
    AmbiguousRoot { candidates: Vec<String> },

    /// Every synthetic root the node type can make is already a node.
    #[error("No free synthetic root, {0} and its alternatives are already present in the edge set")]
    SyntheticRootCollision(String),

    /// Hierarchy nodes that cannot reach the root.
    #[error("{count} hierarchy nodes are not connected to the root, e.g. {sample:?}")]
    DisconnectedHierarchy { count: usize, sample: Vec<String> },

    /// Query for a node absent from the graph.
    #[error("Node not present in graph: {0}")]
    NodeNotFound(String),

    /// Relation type absent from the codec.
    #[error("Unknown relation: {0}")]
    UnknownRelation(String),

    /// Bit slot outside of the scalar width.
    #[error("Invalid slot {slot} for a {width}-bit scalar")]
    InvalidSlot { slot: usize, width: usize },

    /// Row outside of the matrix.
    #[error("Row {row} out of range [0, {rows})")]
    RowOutOfRange { row: usize, rows: usize },

    /// CSR arrays violate a structural invariant.
    #[error("Malformed CSR matrix: {0}")]
    MalformedMatrix(String),

    /// Term id not in `PREFIX:ID` form.
    #[error("Invalid term id: {0}")]
    InvalidTermId(String),

    /// Relation label that does not name a known relation type.
    #[error("Unknown relation label: {0}")]
    UnknownRelationLabel(String),
}

impl GraphError {
    /// Create a capacity error.
    pub fn capacity_exceeded(required: usize, available: usize) -> Self {
        Self::CapacityExceeded {
            required,
            available,
        }
    }

    /// Create an ambiguous root error from the candidate nodes.
    pub fn ambiguous_root<T: std::fmt::Debug>(candidates: &[T]) -> Self {
        Self::AmbiguousRoot {
            candidates: candidates.iter().map(|c| format!("{:?}", c)).collect(),
        }
    }

    /// Create a synthetic root collision error.
    pub fn synthetic_root_collision<T: std::fmt::Debug>(root: &T) -> Self {
        Self::SyntheticRootCollision(format!("{:?}", root))
    }

    /// Create a node not found error.
    pub fn node_not_found<T: std::fmt::Debug>(node: &T) -> Self {
        Self::NodeNotFound(format!("{:?}", node))
    }

    /// Create an unknown relation error.
    pub fn unknown_relation<R: std::fmt::Debug>(relation: &R) -> Self {
        Self::UnknownRelation(format!("{:?}", relation))
    }

    /// Create a malformed matrix error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedMatrix(msg.into())
    }

    /// Whether this error is fatal to a build rather than to a single query.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. }
                | Self::NoRootCandidate
                | Self::AmbiguousRoot { .. }
                | Self::SyntheticRootCollision(_)
                | Self::DisconnectedHierarchy { .. }
        )
    }
}
