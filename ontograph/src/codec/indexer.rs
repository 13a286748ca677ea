//! Fixed-width scalar bit codec
//!
//! Each CSR cell is a single unsigned scalar whose bits are flags. This module
//! knows nothing about relations; it only sets and tests bit positions.
//! The width is chosen at compile time by picking one of `u8`, `u16`, `u32`
//! or `u64` as the cell type.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Bit-slot operations over a fixed-width unsigned scalar.
pub trait DataIndexer: Copy + Eq + Default + Debug + Send + Sync + 'static {
    /// Number of bit slots in the scalar.
    const WIDTH: usize;

    /// The value with no slot set.
    fn empty() -> Self;

    /// Return `previous` with slot `n` set.
    fn set_nth_slot(previous: Self, n: usize) -> Result<Self, GraphError>;

    /// Check whether slot `n` is set. Slots past the width are never set.
    fn is_set(value: Self, n: usize) -> bool;

    /// Number of set slots.
    fn count_set(value: Self) -> usize;

    /// Number of addressable slots.
    fn max_idx() -> usize {
        Self::WIDTH
    }
}

macro_rules! impl_data_indexer {
    ($($ty:ty),*) => {
        $(
            impl DataIndexer for $ty {
                const WIDTH: usize = <$ty>::BITS as usize;

                #[inline]
                fn empty() -> Self {
                    0
                }

                #[inline]
                fn set_nth_slot(previous: Self, n: usize) -> Result<Self, GraphError> {
                    if n >= Self::WIDTH {
                        return Err(GraphError::InvalidSlot {
                            slot: n,
                            width: Self::WIDTH,
                        });
                    }
                    Ok(previous | (1 << n))
                }

                #[inline]
                fn is_set(value: Self, n: usize) -> bool {
                    n < Self::WIDTH && (value >> n) & 1 == 1
                }

                #[inline]
                fn count_set(value: Self) -> usize {
                    value.count_ones() as usize
                }
            }
        )*
    };
}

impl_data_indexer!(u8, u16, u32, u64);

/// Runtime tag for the four supported scalar widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarWidth {
    U8,
    U16,
    U32,
    U64,
}

impl ScalarWidth {
    /// All widths, narrowest first.
    pub const ALL: [ScalarWidth; 4] = [
        ScalarWidth::U8,
        ScalarWidth::U16,
        ScalarWidth::U32,
        ScalarWidth::U64,
    ];

    /// Number of bit slots.
    pub fn bits(&self) -> usize {
        match self {
            ScalarWidth::U8 => u8::WIDTH,
            ScalarWidth::U16 => u16::WIDTH,
            ScalarWidth::U32 => u32::WIDTH,
            ScalarWidth::U64 => u64::WIDTH,
        }
    }

    /// Number of relation types that fit (two slots each).
    pub fn relation_capacity(&self) -> usize {
        self.bits() / 2
    }

    /// Narrowest width able to hold `relations` relation types.
    pub fn for_relation_count(relations: usize) -> Result<Self, GraphError> {
        Self::ALL
            .into_iter()
            .find(|w| w.relation_capacity() >= relations)
            .ok_or_else(|| {
                GraphError::capacity_exceeded(relations * 2, ScalarWidth::U64.bits())
            })
    }
}

impl std::fmt::Display for ScalarWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "u{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_slots() {
        for n in 0..8 {
            assert!(!u8::is_set(u8::empty(), n));
        }
        assert_eq!(u64::count_set(u64::empty()), 0);
    }

    #[test]
    fn test_set_and_read_back() {
        let v = u16::set_nth_slot(u16::empty(), 3).unwrap();
        let v = u16::set_nth_slot(v, 15).unwrap();
        assert_eq!(v, 0b1000_0000_0000_1000);
        assert!(u16::is_set(v, 3));
        assert!(u16::is_set(v, 15));
        assert!(!u16::is_set(v, 4));
        assert_eq!(u16::count_set(v), 2);
    }

    #[test]
    fn test_set_is_idempotent() {
        let once = u32::set_nth_slot(0, 7).unwrap();
        let twice = u32::set_nth_slot(once, 7).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_slot_out_of_width_rejected() {
        assert_eq!(
            u8::set_nth_slot(0, 8),
            Err(GraphError::InvalidSlot { slot: 8, width: 8 })
        );
        assert!(u64::set_nth_slot(0, 63).is_ok());
        assert!(u64::set_nth_slot(0, 64).is_err());
        assert!(!u8::is_set(u8::MAX, 8));
    }

    #[test]
    fn test_max_idx_matches_width() {
        assert_eq!(u8::max_idx(), 8);
        assert_eq!(u16::max_idx(), 16);
        assert_eq!(u32::max_idx(), 32);
        assert_eq!(u64::max_idx(), 64);
    }

    #[test]
    fn test_width_for_relation_count() {
        assert_eq!(ScalarWidth::for_relation_count(0).unwrap(), ScalarWidth::U8);
        assert_eq!(ScalarWidth::for_relation_count(4).unwrap(), ScalarWidth::U8);
        assert_eq!(ScalarWidth::for_relation_count(5).unwrap(), ScalarWidth::U16);
        assert_eq!(ScalarWidth::for_relation_count(16).unwrap(), ScalarWidth::U32);
        assert_eq!(ScalarWidth::for_relation_count(32).unwrap(), ScalarWidth::U64);
        assert_eq!(
            ScalarWidth::for_relation_count(33),
            Err(GraphError::capacity_exceeded(66, 64))
        );
    }

    #[test]
    fn test_width_display() {
        assert_eq!(ScalarWidth::U16.to_string(), "u16");
    }
}
