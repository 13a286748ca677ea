//! Memory size calculation for graph data structures
//!
//! Provides functions for estimating heap memory usage of a built graph.
//! Useful for benchmarking and for sizing the cell width of large ontologies.
//!
//! # Example
//!
//! ```
//! use ontograph::graph::{memory, OntologyGraphBuilder};
//! use ontograph::{Edge, RelationType};
//!
//! let edges = vec![Edge::new(1u32, 2, RelationType::IsA)];
//! let graph = OntologyGraphBuilder::default().build::<u32, u8>(&edges).unwrap();
//! let breakdown = memory::graph_size(&graph);
//! println!("Graph uses {}", memory::format_bytes(breakdown.total_bytes));
//! ```

use super::CsrOntologyGraph;
use crate::codec::DataIndexer;
use crate::node::Node;
use crate::relation::Relation;
use std::mem;

// ============================================================================
// CsrOntologyGraph memory calculation
// ============================================================================

/// Memory breakdown for CsrOntologyGraph
///
/// Node sizes are shallow: heap data owned by a node (e.g. the strings of a
/// `TermId`) is not counted.
#[derive(Debug, Clone, Default)]
pub struct GraphMemory {
    pub total_bytes: usize,
    pub nodes_bytes: usize,
    pub indptr_bytes: usize,
    pub indices_bytes: usize,
    pub data_bytes: usize,
    pub codec_bytes: usize,
}

/// Calculate memory usage of a CsrOntologyGraph
pub fn graph_size<T: Node, R: Relation, S: DataIndexer>(
    graph: &CsrOntologyGraph<T, R, S>,
) -> GraphMemory {
    let nodes_bytes = slice_size(graph.nodes());

    let matrix = graph.matrix();
    let indptr_bytes = slice_size(matrix.indptr());
    let indices_bytes = slice_size(matrix.indices());
    let data_bytes = slice_size(matrix.data());

    // relation list plus the position map
    let relations = graph.codec().len();
    let codec_bytes = relations * mem::size_of::<R>()
        + relations * (mem::size_of::<R>() + mem::size_of::<usize>() + 16);

    GraphMemory {
        total_bytes: nodes_bytes + indptr_bytes + indices_bytes + data_bytes + codec_bytes,
        nodes_bytes,
        indptr_bytes,
        indices_bytes,
        data_bytes,
        codec_bytes,
    }
}

/// Estimate the heap size of a boxed slice or vector's contents
fn slice_size<T>(slice: &[T]) -> usize {
    mem::size_of_val(slice)
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Binary units, largest first
const UNITS: [(&str, usize); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

/// Format bytes as human-readable string
pub fn format_bytes(bytes: usize) -> String {
    UNITS
        .iter()
        .find(|&&(_, size)| bytes >= size)
        .map(|&(unit, size)| format!("{:.2} {}", bytes as f64 / size as f64, unit))
        .unwrap_or_else(|| format!("{} B", bytes))
}

/// Calculate bytes per node for a graph
pub fn bytes_per_node<T: Node, R: Relation, S: DataIndexer>(
    graph: &CsrOntologyGraph<T, R, S>,
) -> f64 {
    let mem = graph_size(graph);
    let nodes = graph.nodes().len();
    if nodes == 0 {
        0.0
    } else {
        mem.total_bytes as f64 / nodes as f64
    }
}
