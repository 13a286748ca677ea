//! Configuration types for the OntologyGraphBuilder.

use crate::codec::ScalarWidth;
use serde::{Deserialize, Serialize};

/// Configuration for graph construction.
///
/// The hierarchy relation is not part of the config because it is typed by
/// the relation parameter of the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Join several hierarchy tops under a synthetic root.
    ///
    /// When `false`, more than one root candidate fails the build with
    /// `GraphError::AmbiguousRoot`. Defaults to `true`.
    pub repair_multiple_roots: bool,

    /// Fail the build when some hierarchy nodes cannot reach the root.
    ///
    /// When `false` such nodes are only reported with a warning. Defaults to
    /// `false`.
    pub strict_connectivity: bool,

    /// Cell width used by `build_auto`.
    ///
    /// `None` picks the narrowest width that holds every relation of the
    /// edge set.
    pub scalar_width: Option<ScalarWidth>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            repair_multiple_roots: true,
            strict_connectivity: false,
            scalar_width: None,
        }
    }
}

impl GraphConfig {
    /// Create a config that rejects multiple roots and disconnected nodes.
    ///
    /// # Returns
    ///
    /// A `GraphConfig` with root repair disabled and connectivity enforced.
    pub fn strict() -> Self {
        Self {
            repair_multiple_roots: false,
            strict_connectivity: true,
            scalar_width: None,
        }
    }

    /// Use a fixed cell width for `build_auto`.
    ///
    /// # Arguments
    ///
    /// * `width` - Width of the CSR cell scalar
    pub fn with_scalar_width(mut self, width: ScalarWidth) -> Self {
        self.scalar_width = Some(width);
        self
    }
}
