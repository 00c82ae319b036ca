//! Data structures to hold insertion indices that may be either `u16` or `u32` to save space.

use crate::error::{KDIndexError, Result};

/// Trees with fewer items than this store their ids as `u16`.
const U16_ID_LIMIT: usize = 65536;

/// An owned array of insertion indices that may be either `u16` or `u32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedIndices {
    /// Ids of a tree with fewer than 65536 items
    U16(Vec<u16>),
    /// Ids of a larger tree
    U32(Vec<u32>),
}

impl OwnedIndices {
    /// Store the given insertion order compactly.
    ///
    /// Fails with [`KDIndexError::TooManyItems`] if an id does not fit in `u32`.
    pub(crate) fn try_from_order(order: &[usize]) -> Result<Self> {
        let num_items = order.len();
        if num_items < U16_ID_LIMIT {
            // every id is below num_items
            Ok(Self::U16(order.iter().map(|&id| id as u16).collect()))
        } else {
            let ids = order
                .iter()
                .map(|&id| u32::try_from(id).map_err(|_| KDIndexError::TooManyItems(num_items)))
                .collect::<Result<Vec<_>>>()?;
            Ok(Self::U32(ids))
        }
    }

    /// A borrowed view of these indices.
    pub fn as_indices(&self) -> Indices<'_> {
        match self {
            Self::U16(arr) => Indices::U16(arr),
            Self::U32(arr) => Indices::U32(arr),
        }
    }
}

/// A slice of indices that may be either `u16` or `u32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Indices<'a> {
    /// Ids of a tree with fewer than 65536 items
    U16(&'a [u16]),
    /// Ids of a larger tree
    U32(&'a [u32]),
}

impl Indices<'_> {
    /// The number of ids.
    pub fn len(&self) -> usize {
        match self {
            Self::U16(arr) => arr.len(),
            Self::U32(arr) => arr.len(),
        }
    }

    /// Whether there are no ids.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insertion id stored at the given slot of the kd-sorted arrays.
    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        match self {
            Self::U16(arr) => arr[index] as u32,
            Self::U32(arr) => arr[index],
        }
    }

    /// Bytes used per stored id.
    #[inline]
    pub fn bytes_per_element(&self) -> usize {
        match self {
            Self::U16(_) => 2,
            Self::U32(_) => 4,
        }
    }
}
