use std::cmp::Ordering;

use log::debug;

use crate::error::{KDIndexError, Result};
use crate::geometry::check_dim;
use crate::indices::OwnedIndices;
use crate::kdtree::index::KDTreeMetadata;
use crate::kdtree::traversal::Span;
use crate::kdtree::KDTree;
use crate::r#type::IndexableNum;

/// A builder to create a [`KDTree`].
///
/// ```
/// use kd_index::kdtree::{KDTreeBuilder, KDTreeIndex};
///
/// let mut builder = KDTreeBuilder::<f64>::new(3);
/// builder.add(&[0., 0., 0.]).unwrap();
/// builder.add(&[1., 1., 1.]).unwrap();
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.num_items(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: IndexableNum> {
    /// Coordinates in insertion order, `dim` values per point
    coords: Vec<N>,
    dim: usize,
    num_items: usize,
}

impl<N: IndexableNum> KDTreeBuilder<N> {
    /// Create a new builder for points with `dim` coordinates.
    pub fn new(dim: usize) -> Self {
        Self::with_capacity(dim, 0)
    }

    /// Create a new builder for points with `dim` coordinates, reserving room for `capacity`
    /// points.
    pub fn with_capacity(dim: usize, capacity: usize) -> Self {
        Self {
            coords: Vec::with_capacity(dim * capacity),
            dim,
            num_items: 0,
        }
    }

    /// Add a point to the index, returning its insertion id.
    pub fn add(&mut self, point: &[N]) -> Result<u32> {
        if self.dim == 0 {
            return Err(KDIndexError::ZeroDimension);
        }
        check_dim(self.dim, point.len())?;
        if let Some(axis) = point.iter().position(|c| c.is_unordered()) {
            return Err(KDIndexError::InvalidCoordinate { axis });
        }
        let id = u32::try_from(self.num_items)
            .map_err(|_| KDIndexError::TooManyItems(self.num_items + 1))?;

        self.coords.extend_from_slice(point);
        self.num_items += 1;
        Ok(id)
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(self) -> Result<KDTree<N>> {
        if self.num_items == 0 {
            return Ok(KDTree::empty(self.dim));
        }

        let order = kd_sort(&self.coords, self.dim, self.num_items);

        let mut coords = Vec::with_capacity(self.coords.len());
        for &id in &order {
            coords.extend_from_slice(&self.coords[id * self.dim..(id + 1) * self.dim]);
        }
        let ids = OwnedIndices::try_from_order(&order)?;

        debug!(
            "built kd-tree with {} points in {} dimensions",
            self.num_items, self.dim
        );

        Ok(KDTree {
            coords,
            ids,
            metadata: KDTreeMetadata {
                dim: self.dim,
                num_items: self.num_items,
            },
        })
    }
}

/// Compute the kd-sorted order of the points: the insertion id stored at each slot.
///
/// Each subtree's slots are stably sorted on the subtree's axis and split at the median, then
/// both halves are sorted on the next axis. Ties keep their relative order from the parent
/// level, so the first level keeps insertion order.
fn kd_sort<N: IndexableNum>(coords: &[N], dim: usize, num_items: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..num_items).collect();

    let mut stack = vec![Span::root(num_items)];
    while let Some(span) = stack.pop() {
        let axis = span.axis(dim);
        order[span.start..span.end].sort_by(|&a, &b| {
            coords[a * dim + axis]
                .partial_cmp(&coords[b * dim + axis])
                .unwrap_or(Ordering::Equal)
        });

        stack.extend(span.left());
        stack.extend(span.right());
    }

    order
}
