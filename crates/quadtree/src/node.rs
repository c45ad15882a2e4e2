//! Recursive quadtree node.

use crate::{Bounds, Positioned, QuadTreeStats};
use tracing::{trace, warn};

/// Children of an internal node, in NE, NW, SE, SW order.
type Children<T> = Box<[Node<T>; 4]>;

#[derive(Debug)]
enum NodeState<T> {
    /// Holds up to `capacity` items, no children yet.
    Leaf(Vec<T>),
    /// Split node. Keeps the items it held when it filled up; every later
    /// insert goes to one of the children.
    Internal { items: Vec<T>, children: Children<T> },
}

/// A single region of the tree.
#[derive(Debug)]
pub(crate) struct Node<T> {
    boundary: Bounds,
    capacity: usize,
    depth: u32,
    state: NodeState<T>,
}

impl<T: Positioned> Node<T> {
    pub(crate) fn new(boundary: Bounds, capacity: usize, depth: u32) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            state: NodeState::Leaf(Vec::with_capacity(capacity.min(64))),
        }
    }

    #[inline]
    fn items(&self) -> &[T] {
        match &self.state {
            NodeState::Leaf(items) | NodeState::Internal { items, .. } => items,
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf(_))
    }

    /// Insert an item, handing it back if neither this node nor any
    /// descendant accepts it.
    pub(crate) fn insert(&mut self, item: T, max_depth: u32) -> Result<(), T> {
        if !self.boundary.contains_point(item.x(), item.y()) {
            return Err(item);
        }

        if let NodeState::Leaf(items) = &mut self.state {
            if items.len() < self.capacity {
                items.push(item);
                return Ok(());
            }
        }

        if self.is_leaf() {
            if self.depth >= max_depth {
                warn!(
                    "QuadTree node at depth {} is full, rejecting item at ({}, {})",
                    self.depth,
                    item.x(),
                    item.y()
                );
                return Err(item);
            }
            self.subdivide();
        }

        let NodeState::Internal { children, .. } = &mut self.state else {
            return Err(item);
        };

        // Shared edges belong to every adjacent quadrant; the first one wins.
        let mut item = item;
        for child in children.iter_mut() {
            match child.insert(item, max_depth) {
                Ok(()) => return Ok(()),
                Err(rejected) => item = rejected,
            }
        }
        Err(item)
    }

    /// Split a full leaf into four quadrant children. No-op on internal nodes.
    fn subdivide(&mut self) {
        let NodeState::Leaf(items) = &mut self.state else {
            return;
        };
        let items = std::mem::take(items);
        let capacity = self.capacity;
        let depth = self.depth + 1;
        let children = Box::new(
            self.boundary
                .quadrants()
                .map(|quadrant| Node::new(quadrant, capacity, depth)),
        );
        trace!("Subdivided node {:?} at depth {}", self.boundary, self.depth);
        self.state = NodeState::Internal { items, children };
    }

    /// Call `visit` for every item inside `range`, walking NE, NW, SE, SW.
    ///
    /// Subtrees whose boundary does not touch `range` are skipped entirely.
    /// Returns the number of nodes whose boundary was tested.
    pub(crate) fn query<'a, F>(&'a self, range: &Bounds, visit: &mut F) -> usize
    where
        F: FnMut(&'a T),
    {
        if !range.intersects(&self.boundary) {
            return 1;
        }

        for item in self.items() {
            if range.contains_point(item.x(), item.y()) {
                visit(item);
            }
        }

        let mut visited = 1;
        if let NodeState::Internal { children, .. } = &self.state {
            for child in children.iter() {
                visited += child.query(range, visit);
            }
        }
        visited
    }

    /// Visit every stored item in query order.
    pub(crate) fn for_each<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a T),
    {
        self.items().iter().for_each(&mut *visit);
        if let NodeState::Internal { children, .. } = &self.state {
            for child in children.iter() {
                child.for_each(visit);
            }
        }
    }

    pub(crate) fn collect_stats(&self, stats: &mut QuadTreeStats) {
        stats.node_count += 1;
        stats.item_count += self.items().len();
        stats.max_depth = stats.max_depth.max(self.depth);
        match &self.state {
            NodeState::Leaf(_) => stats.leaf_count += 1,
            NodeState::Internal { children, .. } => {
                for child in children.iter() {
                    child.collect_stats(stats);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(capacity: usize) -> Node<(f32, f32)> {
        Node::new(Bounds::new(0.0, 0.0, 100.0, 100.0), capacity, 0)
    }

    #[test]
    fn test_leaf_until_capacity() {
        let mut n = node(2);
        assert!(n.insert((1.0, 1.0), 8).is_ok());
        assert!(n.insert((2.0, 2.0), 8).is_ok());
        assert!(n.is_leaf());
        assert!(n.insert((3.0, 3.0), 8).is_ok());
        assert!(!n.is_leaf());
        // Items held before the split stay at the parent.
        assert_eq!(n.items(), &[(1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_rejected_item_is_returned() {
        let mut n = node(1);
        assert_eq!(n.insert((101.0, 5.0), 8), Err((101.0, 5.0)));
        assert!(n.items().is_empty());
    }

    #[test]
    fn test_shared_edge_goes_to_first_quadrant() {
        let mut n = node(1);
        n.insert((10.0, 10.0), 8).unwrap();
        // (50, 50) lies on the corner shared by all four quadrants.
        n.insert((50.0, 50.0), 8).unwrap();
        let NodeState::Internal { children, .. } = &n.state else {
            panic!("node should have split");
        };
        assert_eq!(children[0].items(), &[(50.0, 50.0)]);
        assert!(children[1..].iter().all(|c| c.items().is_empty()));
    }

    #[test]
    fn test_subdivide_is_idempotent() {
        let mut n = node(1);
        n.insert((10.0, 10.0), 8).unwrap();
        n.subdivide();
        n.subdivide();
        let mut stats = QuadTreeStats::default();
        n.collect_stats(&mut stats);
        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.item_count, 1);
    }

    #[test]
    fn test_depth_guard_rejects() {
        let mut n = node(1);
        n.insert((10.0, 10.0), 0).unwrap();
        assert_eq!(n.insert((10.0, 10.0), 0), Err((10.0, 10.0)));
        assert!(n.is_leaf());
    }
}
