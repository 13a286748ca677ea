//! Graph data structures and algorithms
//!
//! This module contains the core graph types of the crate:
//! - `OntologyGraph`: Query facade used by downstream consumers
//! - `CsrOntologyGraph`: CSR-backed implementation with a fixed cell width
//! - `AnyOntologyGraph`: Cell width chosen at runtime
//! - `OntologyGraphBuilder`: Compiles edges into a graph
//! - `Closure`: Lazy ancestor/descendant traversal
//! - `memory`: Functions for estimating heap memory usage

mod any;
mod builder;
mod csr_graph;
pub mod memory;
mod query;
mod traversal;

pub use any::AnyOntologyGraph;
pub use builder::{root_candidates, OntologyGraphBuilder};
pub use csr_graph::CsrOntologyGraph;
pub use query::{NodeIter, OntologyGraph};
pub use traversal::Closure;
