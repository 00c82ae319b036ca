#![doc = include_str!("../README.md")]

mod error;
mod geometry;
pub mod indices;
pub mod kdtree;
mod r#type;

pub use error::{KDIndexError, Result};
pub use geometry::{Point, Rect};
pub use r#type::IndexableNum;

#[cfg(test)]
pub(crate) mod test;
