use geo_traits::{CoordTrait, RectTrait};
use log::trace;
use tinyvec::TinyVec;

use crate::error::{KDIndexError, Result};
use crate::geometry::{check_dim, Point, Rect};
use crate::indices::Indices;
use crate::kdtree::index::KDTreeMetadata;
use crate::kdtree::traversal::{Node, Span};
use crate::kdtree::KDTree;
use crate::r#type::{sq_dist, IndexableNum};

/// The nearest stored point to a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion id of the point
    pub id: u32,
    /// Euclidean distance from the query
    pub distance: f64,
}

/// Traversal counters of a single query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// The number of tree nodes whose pivot was examined
    pub nodes_visited: usize,
}

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum>: Sized {
    /// The underlying kd-sorted coordinate buffer of this tree, `dim` values per slot
    fn coords(&self) -> &[N];

    /// The insertion ids in kd-sorted order
    fn indices(&self) -> Indices<'_>;

    /// Access the metadata describing this KDTree
    fn metadata(&self) -> &KDTreeMetadata;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.metadata().num_items()
    }

    /// The number of coordinates of every point in this KDTree
    fn dim(&self) -> usize {
        self.metadata().dim()
    }

    /// Whether this KDTree holds no points
    fn is_empty(&self) -> bool {
        self.num_items() == 0
    }

    /// The coordinates stored at a slot of the kd-sorted buffer.
    #[inline]
    fn slot_coords(&self, slot: usize) -> &[N] {
        let dim = self.dim();
        &self.coords()[slot * dim..(slot + 1) * dim]
    }

    /// Search the index for points inside a rectangle, boundary included.
    ///
    /// Returns the found points in unspecified order.
    fn range(&self, rect: &Rect<N>) -> Result<Vec<Point<N>>> {
        let (slots, _) = range_slots(self, rect)?;
        Ok(slots
            .into_iter()
            .map(|slot| Point::new(self.slot_coords(slot)))
            .collect())
    }

    /// Search the index for points inside a rectangle, boundary included.
    ///
    /// Returns insertion ids of found items
    fn range_ids(&self, rect: &Rect<N>) -> Result<Vec<u32>> {
        let (result, _) = self.range_with_stats(rect)?;
        Ok(result)
    }

    /// Search the index for points inside a rectangle, also reporting how many nodes the
    /// traversal examined.
    fn range_with_stats(&self, rect: &Rect<N>) -> Result<(Vec<u32>, SearchStats)> {
        let (slots, stats) = range_slots(self, rect)?;
        let indices = self.indices();
        Ok((slots.into_iter().map(|slot| indices.get(slot)).collect(), stats))
    }

    /// Search a 2-D index for items within a given bounding box.
    ///
    /// Returns insertion ids of found items
    fn range_rect(&self, rect: &impl RectTrait<T = N>) -> Result<Vec<u32>> {
        let rect = Rect::try_new(
            [rect.min().x(), rect.min().y()],
            [rect.max().x(), rect.max().y()],
        )?;
        if !self.is_empty() {
            check_dim(self.dim(), 2)?;
        }
        self.range_ids(&rect)
    }

    /// Find the stored point closest to `query` by Euclidean distance.
    ///
    /// Returns `None` for an empty tree. Among equidistant points, the first one reached by the
    /// traversal wins.
    fn nearest(&self, query: &Point<N>) -> Result<Option<Point<N>>> {
        let (found, _) = nearest_slot(self, query.coords())?;
        Ok(found.map(|(slot, _)| Point::new(self.slot_coords(slot))))
    }

    /// Find the insertion id and distance of the stored point closest to `query`.
    fn nearest_neighbor(&self, query: &[N]) -> Result<Option<Neighbor>> {
        let (found, _) = self.nearest_with_stats(query)?;
        Ok(found)
    }

    /// Nearest-neighbor search that also reports how many nodes the traversal examined.
    fn nearest_with_stats(&self, query: &[N]) -> Result<(Option<Neighbor>, SearchStats)> {
        let (found, stats) = nearest_slot(self, query)?;
        let neighbor = found.map(|(slot, dist_sq)| Neighbor {
            id: self.indices().get(slot),
            distance: dist_sq.sqrt(),
        });
        Ok((neighbor, stats))
    }

    /// Find the nearest neighbor of a 2-D coordinate.
    fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<Option<Neighbor>> {
        self.nearest_neighbor(&[coord.x(), coord.y()])
    }

    /// Search the index for items within a given Euclidean radius of `query`, boundary included.
    ///
    /// Returns insertion ids of found items
    fn within(&self, query: &[N], radius: f64) -> Result<Vec<u32>> {
        if radius.is_nan() || radius < 0.0 {
            return Err(KDIndexError::InvalidRadius);
        }
        let mut result: Vec<u32> = vec![];
        if self.is_empty() {
            return Ok(result);
        }
        check_dim(self.dim(), query.len())?;
        check_ordered(query)?;

        let dim = self.dim();
        let indices = self.indices();
        let r2 = radius * radius;

        let mut stack: TinyVec<[Span; 16]> = TinyVec::new();
        stack.push(Span::root(self.num_items()));

        while let Some(span) = stack.pop() {
            let m = span.median();
            let pivot = self.slot_coords(m);
            if sq_dist(query, pivot) <= r2 {
                result.push(indices.get(m));
            }

            // queue search in halves that intersect the query ball
            let axis = span.axis(dim);
            let q = query[axis].as_f64();
            let v = pivot[axis].as_f64();
            if q - radius <= v {
                stack.extend(span.left());
            }
            if q + radius >= v {
                stack.extend(span.right());
            }
        }

        Ok(result)
    }

    /// Access the root node of the KDTree for manual traversal.
    ///
    /// Returns `None` for an empty tree.
    fn root(&self) -> Option<Node<'_, N, Self>> {
        Node::from_root(self)
    }

    /// The number of levels of the tree; `0` for an empty tree.
    fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<Node<'_, N, Self>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            height = height.max(node.depth() + 1);
            stack.extend(node.left_child());
            stack.extend(node.right_child());
        }
        height
    }

    /// Nearest-neighbor search for many queries at once, spread over the rayon thread pool.
    ///
    /// Every query is validated before any search starts.
    #[cfg(feature = "rayon")]
    fn par_nearest_neighbors(&self, queries: &[Point<N>]) -> Result<Vec<Option<Neighbor>>>
    where
        Self: Sync,
    {
        use rayon::prelude::*;

        if !self.is_empty() {
            for query in queries {
                check_dim(self.dim(), query.dim())?;
            }
        }
        queries
            .par_iter()
            .map(|query| self.nearest_neighbor(query.coords()))
            .collect()
    }
}

impl<N: IndexableNum> KDTreeIndex<N> for KDTree<N> {
    fn coords(&self) -> &[N] {
        &self.coords
    }

    fn indices(&self) -> Indices<'_> {
        self.ids.as_indices()
    }

    fn metadata(&self) -> &KDTreeMetadata {
        &self.metadata
    }
}

/// Reject query coordinates that cannot be compared, such as NaN.
fn check_ordered<N: IndexableNum>(query: &[N]) -> Result<()> {
    match query.iter().position(|c| c.is_unordered()) {
        Some(axis) => Err(KDIndexError::InvalidCoordinate { axis }),
        None => Ok(()),
    }
}

/// Range search returning kd-sorted slots rather than insertion ids.
fn range_slots<N: IndexableNum, T: KDTreeIndex<N>>(
    tree: &T,
    rect: &Rect<N>,
) -> Result<(Vec<usize>, SearchStats)> {
    let mut stats = SearchStats::default();
    let mut result: Vec<usize> = vec![];
    if tree.is_empty() {
        return Ok((result, stats));
    }
    check_dim(tree.dim(), rect.dim())?;

    let dim = tree.dim();
    let lower = rect.lower().coords();
    let upper = rect.upper().coords();

    // Use TinyVec to avoid heap allocations
    let mut stack: TinyVec<[Span; 16]> = TinyVec::new();
    stack.push(Span::root(tree.num_items()));

    while let Some(span) = stack.pop() {
        stats.nodes_visited += 1;

        let m = span.median();
        let pivot = tree.slot_coords(m);
        if rect.contains_coords(pivot) {
            result.push(m);
        }

        // a subtree can only hold matches on the side of the pivot the rectangle reaches
        let axis = span.axis(dim);
        if pivot[axis] < lower[axis] {
            stack.extend(span.right());
        } else if pivot[axis] > upper[axis] {
            stack.extend(span.left());
        } else {
            stack.extend(span.right());
            stack.extend(span.left());
        }
    }

    trace!(
        "range query visited {} of {} nodes, {} matches",
        stats.nodes_visited,
        tree.num_items(),
        result.len()
    );
    Ok((result, stats))
}

/// Nearest-neighbor search returning the kd-sorted slot and squared distance of the best match.
fn nearest_slot<N: IndexableNum, T: KDTreeIndex<N>>(
    tree: &T,
    query: &[N],
) -> Result<(Option<(usize, f64)>, SearchStats)> {
    let mut stats = SearchStats::default();
    if tree.is_empty() {
        return Ok((None, stats));
    }
    check_dim(tree.dim(), query.len())?;
    check_ordered(query)?;

    let dim = tree.dim();
    let mut best = Best::default();

    let mut stack = vec![Visit::Descend(Span::root(tree.num_items()))];
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Descend(span) => {
                stats.nodes_visited += 1;
                let pivot = tree.slot_coords(span.median());
                let axis = span.axis(dim);

                // the pivot is evaluated only after the near side has been searched
                stack.push(Visit::Backtrack(span));
                let near = if query[axis] < pivot[axis] {
                    span.left()
                } else {
                    span.right()
                };
                stack.extend(near.map(Visit::Descend));
            }
            Visit::Backtrack(span) => {
                let m = span.median();
                let pivot = tree.slot_coords(m);
                let axis = span.axis(dim);

                best.offer(m, sq_dist(query, pivot));

                let plane_dist = query[axis].as_f64() - pivot[axis].as_f64();
                if plane_dist * plane_dist < best.dist_sq {
                    let far = if query[axis] < pivot[axis] {
                        span.right()
                    } else {
                        span.left()
                    };
                    stack.extend(far.map(Visit::Descend));
                }
            }
        }
    }

    trace!(
        "nearest query visited {} of {} nodes",
        stats.nodes_visited,
        tree.num_items()
    );
    Ok((best.slot.map(|slot| (slot, best.dist_sq)), stats))
}

/// A pending step of the nearest-neighbor traversal.
#[derive(Debug, Clone, Copy)]
enum Visit {
    /// Search this subtree, near side first
    Descend(Span),
    /// The near side of this subtree is done: evaluate its pivot and maybe the far side
    Backtrack(Span),
}

/// Best candidate found so far by one nearest-neighbor query.
#[derive(Debug, Clone, Copy)]
struct Best {
    slot: Option<usize>,
    dist_sq: f64,
}

impl Default for Best {
    fn default() -> Self {
        Self {
            slot: None,
            dist_sq: f64::INFINITY,
        }
    }
}

impl Best {
    #[inline]
    fn offer(&mut self, slot: usize, dist_sq: f64) {
        if self.slot.is_none() || dist_sq < self.dist_sq {
            self.slot = Some(slot);
            self.dist_sq = dist_sq;
        }
    }
}
