//! Node identifiers
//!
//! The engine is generic over the node type. It only compares, hashes and
//! clones nodes; the one extra thing it needs is a sentinel to use as the
//! top node when the hierarchy has more than one root.

use crate::error::GraphError;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Identifier of an ontology term.
pub trait Node: Clone + Ord + Hash + Debug + Send + Sync + 'static {
    /// Sentinel used as the root when several root candidates are found.
    fn synthetic_root() -> Self;

    /// The `attempt`-th sentinel, tried in order when earlier ones are
    /// already used by real nodes. Attempt 0 is [`Node::synthetic_root`].
    /// Returns `None` once the type cannot make another one.
    fn nth_synthetic_root(attempt: usize) -> Option<Self> {
        (attempt == 0).then(Self::synthetic_root)
    }
}

macro_rules! impl_numeric_node {
    ($($ty:ty),*) => {
        $(
            impl Node for $ty {
                fn synthetic_root() -> Self {
                    <$ty>::MAX
                }

                fn nth_synthetic_root(attempt: usize) -> Option<Self> {
                    <$ty>::try_from(attempt)
                        .ok()
                        .and_then(|n| <$ty>::MAX.checked_sub(n))
                }
            }
        )*
    };
}

impl_numeric_node!(u32, u64, usize);

/// Prefix of the synthetic `owl:Thing` root.
pub const OWL_PREFIX: &str = "owl";

/// Id of the synthetic `owl:Thing` root.
pub const OWL_THING: &str = "Thing";

/// Id of the `attempt`-th synthetic root: `Thing`, `Thing_1`, `Thing_2`, ...
fn owl_thing_id(attempt: usize) -> String {
    match attempt {
        0 => OWL_THING.to_string(),
        n => format!("{}_{}", OWL_THING, n),
    }
}

impl Node for String {
    fn synthetic_root() -> Self {
        format!("{}:{}", OWL_PREFIX, OWL_THING)
    }

    fn nth_synthetic_root(attempt: usize) -> Option<Self> {
        Some(format!("{}:{}", OWL_PREFIX, owl_thing_id(attempt)))
    }
}

/// A `PREFIX:ID` ontology term identifier, e.g. `HP:0000118`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId {
    prefix: Box<str>,
    id: Box<str>,
}

impl TermId {
    /// Create a term id from its parts.
    pub fn new(prefix: impl Into<Box<str>>, id: impl Into<Box<str>>) -> Self {
        Self {
            prefix: prefix.into(),
            id: id.into(),
        }
    }

    /// The ontology prefix, e.g. `HP`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The local id, e.g. `0000118`.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Node for TermId {
    fn synthetic_root() -> Self {
        TermId::new(OWL_PREFIX, OWL_THING)
    }

    fn nth_synthetic_root(attempt: usize) -> Option<Self> {
        Some(TermId::new(OWL_PREFIX, owl_thing_id(attempt)))
    }
}

impl FromStr for TermId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((prefix, id)) if !prefix.is_empty() && !id.is_empty() => {
                Ok(TermId::new(prefix, id))
            }
            _ => Err(GraphError::InvalidTermId(s.to_string())),
        }
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.id)
    }
}

impl Debug for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
