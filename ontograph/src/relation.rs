//! Relation types
//!
//! Any small `Copy` tag can label edges. `RelationType` covers the relations
//! found in the common biomedical ontologies, with `IsA` as the subsumption
//! relation that drives the hierarchy queries by default.

use crate::error::GraphError;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Tag carried by an edge.
pub trait Relation: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<R> Relation for R where R: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

/// Relation types used by the bundled ontologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RelationType {
    /// Subsumption (`is_a`)
    #[default]
    IsA,
    PartOf,
    HasPart,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    OccursIn,
}

impl RelationType {
    /// Every variant, in declaration order.
    pub const ALL: [RelationType; 7] = [
        RelationType::IsA,
        RelationType::PartOf,
        RelationType::HasPart,
        RelationType::Regulates,
        RelationType::PositivelyRegulates,
        RelationType::NegativelyRegulates,
        RelationType::OccursIn,
    ];

    /// The OBO label of the relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::IsA => "is_a",
            RelationType::PartOf => "part_of",
            RelationType::HasPart => "has_part",
            RelationType::Regulates => "regulates",
            RelationType::PositivelyRegulates => "positively_regulates",
            RelationType::NegativelyRegulates => "negatively_regulates",
            RelationType::OccursIn => "occurs_in",
        }
    }
}

impl Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| GraphError::UnknownRelationLabel(s.to_string()))
    }
}
