//! Brute-force range scan, the O(n) baseline the quadtree is checked against.

use quadtree::{Bounds, Positioned};

/// Return every item inside `range`, edges included, in slice order.
pub fn brute_force_query<'a, T: Positioned>(items: &'a [T], range: &Bounds) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| range.contains_point(item.x(), item.y()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadtree::QuadTree;

    #[test]
    fn test_scan_inclusive() {
        let points = [(0.0f32, 0.0f32), (25.0, 25.0), (25.1, 0.0)];
        let found = brute_force_query(&points, &Bounds::new(0.0, 0.0, 25.0, 25.0));
        assert_eq!(found, vec![&points[0], &points[1]]);
    }

    #[test]
    fn test_scan_agrees_with_tree() {
        let points: Vec<(f32, f32)> = (0..400)
            .map(|i| ((i * 37 % 101) as f32, (i * 53 % 97) as f32))
            .collect();
        let mut tree = QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 3).unwrap();
        for p in &points {
            tree.insert(p);
        }

        let range = Bounds::new(20.0, 30.0, 40.0, 15.0);
        let mut from_tree: Vec<(f32, f32)> = tree.query(&range).into_iter().map(|p| **p).collect();
        let mut from_scan: Vec<(f32, f32)> =
            brute_force_query(&points, &range).into_iter().copied().collect();
        from_tree.sort_by(|a, b| a.partial_cmp(b).unwrap());
        from_scan.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(from_tree, from_scan);
        assert!(!from_scan.is_empty());
    }
}
