//! An implementation of an immutable k-dimensional tree over a static point set.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, KDTreeMetadata};
pub use r#trait::{KDTreeIndex, Neighbor, SearchStats};
pub use traversal::Node;
