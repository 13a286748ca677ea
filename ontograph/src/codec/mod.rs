//! Bit-packed relation encoding
//!
//! - `DataIndexer`: bit slots of a fixed-width scalar
//! - `RelationCodec`: relation and direction to slot mapping

mod indexer;
mod relation;

pub use indexer::{DataIndexer, ScalarWidth};
pub use relation::RelationCodec;
