//! Ontograph - Typed Ontology Graph Storage
//!
//! An immutable, read-mostly index over large ontologies that supports:
//! - Bit-packed encoding of several relation types per node pair
//! - Compressed-sparse-row adjacency with no dense matrix or pointer graph
//! - Root discovery with repair of multiple hierarchy tops
//! - Lazy parent, child, ancestor and descendant queries

pub mod codec;
pub mod config;
pub mod csr;
pub mod edge;
pub mod error;
pub mod graph;
pub mod node;
pub mod relation;

pub use codec::{DataIndexer, RelationCodec, ScalarWidth};
pub use config::GraphConfig;
pub use csr::ImmutableCsrMatrix;
pub use edge::Edge;
pub use error::GraphError;
pub use graph::{AnyOntologyGraph, CsrOntologyGraph, OntologyGraph, OntologyGraphBuilder};
pub use node::{Node, TermId};
pub use relation::{Relation, RelationType};
