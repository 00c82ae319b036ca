//! Utilities to traverse the KDTree structure.

use std::marker::PhantomData;

use crate::geometry::Point;
use crate::kdtree::KDTreeIndex;
use crate::r#type::IndexableNum;

/// The contiguous slots `[start, end)` occupied by one subtree of the kd-sorted arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) depth: usize,
}

impl Span {
    #[inline]
    pub(crate) fn root(num_items: usize) -> Self {
        Self {
            start: 0,
            end: num_items,
            depth: 0,
        }
    }

    /// Slot of this subtree's pivot.
    #[inline]
    pub(crate) fn median(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    /// The splitting axis at this depth.
    #[inline]
    pub(crate) fn axis(&self, dim: usize) -> usize {
        self.depth % dim
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    /// The subtree before the pivot, if non-empty.
    #[inline]
    pub(crate) fn left(&self) -> Option<Self> {
        let m = self.median();
        (m > self.start).then_some(Self {
            start: self.start,
            end: m,
            depth: self.depth + 1,
        })
    }

    /// The subtree after the pivot, if non-empty.
    #[inline]
    pub(crate) fn right(&self) -> Option<Self> {
        let m = self.median();
        (m + 1 < self.end).then_some(Self {
            start: m + 1,
            end: self.end,
            depth: self.depth + 1,
        })
    }
}

/// A node in the KDTree: one stored point and its (possibly absent) left and right subtrees.
///
/// Nodes borrow the tree and are only reachable top-down from [`KDTreeIndex::root`].
#[derive(Debug, Clone)]
pub struct Node<'a, N: IndexableNum, T: KDTreeIndex<N>> {
    /// The tree that this node is a reference onto
    tree: &'a T,
    span: Span,
    phantom: PhantomData<N>,
}

impl<'a, N: IndexableNum, T: KDTreeIndex<N>> Node<'a, N, T> {
    pub(crate) fn from_root(tree: &'a T) -> Option<Self> {
        if tree.is_empty() {
            return None;
        }
        Some(Self::new(tree, Span::root(tree.num_items())))
    }

    fn new(tree: &'a T, span: Span) -> Self {
        Self {
            tree,
            span,
            phantom: PhantomData,
        }
    }

    /// The coordinates of this node's pivot.
    pub fn coords(&self) -> &'a [N] {
        self.tree.slot_coords(self.span.median())
    }

    /// This node's pivot as an owned point.
    pub fn point(&self) -> Point<N> {
        Point::new(self.coords())
    }

    /// Insertion id of this node's pivot.
    pub fn id(&self) -> u32 {
        self.tree.indices().get(self.span.median())
    }

    /// The axis this node splits on.
    pub fn axis(&self) -> usize {
        self.span.axis(self.tree.dim())
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.span.depth
    }

    /// The number of points in the subtree rooted at this node, this node included.
    pub fn subtree_len(&self) -> usize {
        self.span.len()
    }

    /// The child subtree holding points sorted before the pivot on [`Node::axis`].
    pub fn left_child(&self) -> Option<Node<'a, N, T>> {
        self.span.left().map(|span| Self::new(self.tree, span))
    }

    /// The child subtree holding points sorted after the pivot on [`Node::axis`].
    pub fn right_child(&self) -> Option<Node<'a, N, T>> {
        self.span.right().map(|span| Self::new(self.tree, span))
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.span.len() == 1
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn left_subtree_is_never_smaller() {
        for n in 1..64 {
            let span = Span::root(n);
            let left = span.left().map_or(0, |s| s.len());
            let right = span.right().map_or(0, |s| s.len());
            assert_eq!(left + right + 1, n);
            assert!(left >= right);
            assert!(left - right <= 1);
        }
    }

    #[test]
    fn single_slot_is_a_leaf() {
        let span = Span::root(1);
        assert_eq!(span.median(), 0);
        assert!(span.left().is_none());
        assert!(span.right().is_none());
    }
}
