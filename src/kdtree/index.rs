use crate::error::Result;
use crate::indices::{Indices, OwnedIndices};
use crate::kdtree::KDTreeBuilder;
use crate::r#type::IndexableNum;

/// Common metadata to describe a KDTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KDTreeMetadata {
    pub(crate) dim: usize,
    pub(crate) num_items: usize,
}

impl KDTreeMetadata {
    /// The number of coordinates of every stored point.
    ///
    /// This is `0` for a tree built from an empty point sequence.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The number of items (and nodes) in this tree.
    pub fn num_items(&self) -> usize {
        self.num_items
    }
}

/// An immutable k-d tree over a static point set.
///
/// Points are stored kd-sorted in one flat coordinate buffer. The subtree occupying slots
/// `[start, end)` has its pivot at slot `start + (end - start) / 2`, its left subtree in
/// `[start, pivot)` and its right subtree in `(pivot, end)`.
///
/// Usually this will be created via [`KDTree::build`] or [`KDTreeBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum> {
    pub(crate) coords: Vec<N>,
    pub(crate) ids: OwnedIndices,
    pub(crate) metadata: KDTreeMetadata,
}

impl<N: IndexableNum> KDTree<N> {
    /// Build a tree from a sequence of points of equal dimensionality.
    ///
    /// An empty sequence yields an empty tree. Ids returned by queries are the positions of the
    /// points in this sequence.
    ///
    /// ```
    /// use kd_index::kdtree::{KDTree, KDTreeIndex};
    /// use kd_index::{Point, Rect};
    ///
    /// let tree = KDTree::build([[7, 2], [5, 4], [9, 6], [4, 7], [8, 1], [2, 3]]).unwrap();
    /// assert_eq!(tree.nearest(&Point::from([11, 10])).unwrap(), Some(Point::from([9, 6])));
    ///
    /// let rect = Rect::try_new([0, 0], [6, 6]).unwrap();
    /// let mut found = tree.range(&rect).unwrap();
    /// found.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(found, vec![Point::from([2, 3]), Point::from([5, 4])]);
    /// ```
    pub fn build<P, I>(points: I) -> Result<Self>
    where
        P: AsRef<[N]>,
        I: IntoIterator<Item = P>,
    {
        let mut points = points.into_iter().peekable();
        let Some(first) = points.peek() else {
            return Ok(Self::empty(0));
        };
        let dim = first.as_ref().len();

        let (lower, _) = points.size_hint();
        let mut builder = KDTreeBuilder::with_capacity(dim, lower);
        for point in points {
            builder.add(point.as_ref())?;
        }
        builder.finish()
    }

    pub(crate) fn empty(dim: usize) -> Self {
        Self {
            coords: vec![],
            ids: OwnedIndices::U16(vec![]),
            metadata: KDTreeMetadata { dim, num_items: 0 },
        }
    }

    /// The compact insertion ids in kd-sorted order.
    pub fn ids(&self) -> Indices<'_> {
        self.ids.as_indices()
    }

    /// Consume the tree, returning the kd-sorted coordinate buffer.
    pub fn into_inner(self) -> Vec<N> {
        self.coords
    }
}
