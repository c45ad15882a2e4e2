//! QuadTree container.
//!
//! Owns the root node and the configuration it was built with. The intended
//! usage is a full rebuild per tick: `clear`, `insert` every live item, then
//! run as many range queries as needed.

use crate::node::Node;
use crate::{Bounds, Positioned, QuadTreeError};
use tracing::debug;

/// Default cap on subdivision depth.
///
/// Without it, more than `capacity` coincident points would split forever.
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Shape of a tree, as reported by [`QuadTree::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    /// Total number of nodes, root included.
    pub node_count: usize,
    /// Nodes that have not been subdivided.
    pub leaf_count: usize,
    /// Items stored across all nodes.
    pub item_count: usize,
    /// Deepest node depth (root = 0).
    pub max_depth: u32,
}

/// Region quadtree over point items.
///
/// Each node holds up to `capacity` items before it splits into four equal
/// quadrants. Nodes never merge back; [`clear`](Self::clear) drops the whole
/// tree at once.
#[derive(Debug)]
pub struct QuadTree<T> {
    root: Node<T>,
    boundary: Bounds,
    capacity: usize,
    max_depth: u32,
    len: usize,
}

impl<T: Positioned> QuadTree<T> {
    /// Create a tree covering `boundary` with the default depth limit.
    pub fn new(boundary: Bounds, capacity: usize) -> Result<Self, QuadTreeError> {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Create a tree with an explicit depth limit.
    ///
    /// Nodes at `max_depth` never split; once full they reject further items.
    pub fn with_max_depth(
        boundary: Bounds,
        capacity: usize,
        max_depth: u32,
    ) -> Result<Self, QuadTreeError> {
        if capacity == 0 {
            return Err(QuadTreeError::InvalidCapacity(capacity));
        }
        if !boundary.is_valid() {
            return Err(QuadTreeError::InvalidBoundary(boundary));
        }

        Ok(Self {
            root: Node::new(boundary, capacity, 0),
            boundary,
            capacity,
            max_depth,
            len: 0,
        })
    }

    #[inline]
    pub fn boundary(&self) -> Bounds {
        self.boundary
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Number of items stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every node and item, keeping boundary, capacity and depth limit.
    pub fn clear(&mut self) {
        debug!("Clearing QuadTree ({} items)", self.len);
        self.root = Node::new(self.boundary, self.capacity, 0);
        self.len = 0;
    }

    /// Insert an item. Returns `false` if it lies outside the tree or the
    /// node it lands in is full at the depth limit.
    #[inline]
    pub fn insert(&mut self, item: T) -> bool {
        self.try_insert(item).is_ok()
    }

    /// Insert an item, handing it back on rejection.
    pub fn try_insert(&mut self, item: T) -> Result<(), T> {
        self.root.insert(item, self.max_depth)?;
        self.len += 1;
        Ok(())
    }

    /// Insert an item after checking that its position is finite.
    ///
    /// A NaN or infinite coordinate is reported as an error instead of a
    /// silent rejection. The item is dropped in that case.
    pub fn insert_checked(&mut self, item: T) -> Result<bool, QuadTreeError> {
        let (x, y) = (item.x(), item.y());
        if !x.is_finite() || !y.is_finite() {
            return Err(QuadTreeError::NonFinitePosition { x, y });
        }
        Ok(self.insert(item))
    }

    /// Find all items inside `range`, edges included.
    ///
    /// Order is deterministic: per node in insertion order, children in
    /// NE, NW, SE, SW order.
    pub fn query(&self, range: &Bounds) -> Vec<&T> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    /// Append all items inside `range` to `found`.
    pub fn query_into<'a>(&'a self, range: &Bounds, found: &mut Vec<&'a T>) {
        self.root.query(range, &mut |item| found.push(item));
    }

    /// Call `visit` for each item inside `range` without allocating.
    ///
    /// Returns how many nodes had their boundary tested, which is 1 when
    /// `range` misses the tree entirely.
    pub fn query_with<'a, F>(&'a self, range: &Bounds, mut visit: F) -> usize
    where
        F: FnMut(&'a T),
    {
        self.root.query(range, &mut visit)
    }

    /// Find all items inside the square of half extent `radius` around a point.
    #[inline]
    pub fn query_radius(&self, cx: f32, cy: f32, radius: f32) -> Vec<&T> {
        self.query(&Bounds::from_center(cx, cy, radius))
    }

    /// All stored items, in the same order a full-boundary query yields them.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.for_each(&mut |item| items.push(item));
        items.into_iter()
    }

    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats::default();
        self.root.collect_stats(&mut stats);
        stats
    }
}
