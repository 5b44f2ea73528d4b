//! Component tests for `SpatialTree` - testing each method individually
//! This file provides granular test coverage to identify specific bugs

#[cfg(test)]
mod tests {
    use crate::spatial_tree::check_confinement;
    use crate::{Point, Rect, SpatialError, SpatialTree};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn tree_of(points: &[(f64, f64)]) -> SpatialTree {
        let mut tree = SpatialTree::new();
        for &(x, y) in points {
            tree.insert(p(x, y)).unwrap();
        }
        tree
    }

    // ============================================================================
    // BASIC INITIALIZATION TESTS
    // ============================================================================

    #[test]
    fn test_new_tree() {
        let tree = SpatialTree::new();
        assert!(tree.is_empty(), "New tree should be empty");
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_default_is_empty() {
        let tree = SpatialTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.iter().count(), 0);
    }

    // ============================================================================
    // INSERT OPERATION TESTS
    // ============================================================================

    #[test]
    fn test_insert_single_point() {
        let mut tree = SpatialTree::new();
        assert!(tree.insert(p(0.5, 0.5)).unwrap());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut tree = tree_of(&[(0.5, 0.5), (0.2, 0.8)]);
        assert!(!tree.insert(p(0.2, 0.8)).unwrap(), "Duplicate should not create a node");
        assert!(!tree.insert(p(0.5, 0.5)).unwrap());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.iter().count(), 2);
    }

    #[test]
    fn test_insert_same_x_different_y() {
        // Equal x goes right at the root, then splits on y
        let tree = tree_of(&[(0.5, 0.5), (0.5, 0.2), (0.5, 0.9)]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), 3);
        assert!(check_confinement(&tree));
    }

    #[test]
    fn test_insert_near_duplicate_is_distinct() {
        let mut tree = tree_of(&[(0.1, 0.1)]);
        assert!(tree.insert(p(0.1 + f64::EPSILON, 0.1)).unwrap());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_insert_negative_zero_matches_zero() {
        let mut tree = tree_of(&[(0.0, 0.0)]);
        assert!(!tree.insert(p(-0.0, -0.0)).unwrap());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_rejects_non_finite() {
        let mut tree = tree_of(&[(0.5, 0.5)]);
        for bad in [p(f64::NAN, 0.1), p(0.1, f64::NAN), p(f64::INFINITY, 0.0), p(0.0, f64::NEG_INFINITY)] {
            let err = tree.insert(bad).unwrap_err();
            assert!(err.is_invalid_argument());
            assert!(matches!(err, SpatialError::InvalidPoint { .. }));
        }
        assert_eq!(tree.len(), 1, "Failed inserts must not change the tree");
        assert!(check_confinement(&tree));
    }

    #[test]
    fn test_insert_rejects_out_of_range() {
        let mut tree = tree_of(&[(0.5, 0.5)]);
        for bad in [p(1e300, 1e300), p(-1e300, 0.0), p(0.0, Point::MAX_COORD * 2.0)] {
            assert!(matches!(tree.insert(bad), Err(SpatialError::InvalidPoint { .. })));
        }
        assert_eq!(tree.len(), 1);

        // The bound itself is still accepted
        assert!(tree.insert(p(Point::MAX_COORD, -Point::MAX_COORD)).unwrap());
        assert!(tree.contains(p(Point::MAX_COORD, -Point::MAX_COORD)).unwrap());
    }

    #[test]
    fn test_sorted_insertion_degenerates() {
        let points: Vec<(f64, f64)> = (0..64).map(|i| (i as f64, i as f64)).collect();
        let tree = tree_of(&points);
        assert_eq!(tree.len(), 64);
        assert_eq!(tree.height(), 64, "Sorted input builds a path");
        assert!(check_confinement(&tree));
    }

    // ============================================================================
    // CONTAINS OPERATION TESTS
    // ============================================================================

    #[test]
    fn test_contains_on_empty_tree() {
        let tree = SpatialTree::new();
        assert!(!tree.contains(p(0.0, 0.0)).unwrap());
    }

    #[test]
    fn test_contains_every_inserted_point() {
        let pts = [(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)];
        let tree = tree_of(&pts);
        for &(x, y) in &pts {
            assert!(tree.contains(p(x, y)).unwrap(), "Missing ({x}, {y})");
        }
    }

    #[test]
    fn test_contains_rejects_absent_points() {
        let tree = tree_of(&[(0.7, 0.2), (0.5, 0.4), (0.2, 0.3)]);
        assert!(!tree.contains(p(0.7, 0.4)).unwrap());
        assert!(!tree.contains(p(0.2, 0.2)).unwrap());
        assert!(!tree.contains(p(0.5, 0.5)).unwrap());
    }

    #[test]
    fn test_contains_rejects_non_finite() {
        let tree = tree_of(&[(0.5, 0.5)]);
        assert!(tree.contains(p(f64::NAN, 0.5)).is_err());
        assert!(tree.contains(p(0.5, f64::INFINITY)).is_err());
    }

    // ============================================================================
    // RANGE QUERY TESTS
    // ============================================================================

    fn sorted(mut v: Vec<Point>) -> Vec<Point> {
        v.sort();
        v
    }

    #[test]
    fn test_range_on_empty_tree() {
        let tree = SpatialTree::new();
        assert!(tree.range(&Rect::everything()).is_empty());
    }

    #[test]
    fn test_range_everything_returns_all_points() {
        let pts = [(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)];
        let tree = tree_of(&pts);
        let results = tree.range(&Rect::everything());
        assert_eq!(results.len(), pts.len());
    }

    #[test]
    fn test_range_edges_are_inclusive() {
        let tree = tree_of(&[(0.5, 0.5), (0.2, 0.2), (0.8, 0.8), (0.2, 0.8)]);
        let rect = Rect::new(0.2, 0.2, 0.5, 0.5).unwrap();
        assert_eq!(sorted(tree.range(&rect)), vec![p(0.2, 0.2), p(0.5, 0.5)]);
    }

    #[test]
    fn test_range_degenerate_rectangle() {
        let tree = tree_of(&[(0.5, 0.5), (0.5, 0.1), (0.5, 0.9), (0.3, 0.5)]);

        // Zero width: vertical segment x = 0.5
        let line = Rect::new(0.5, 0.0, 0.5, 1.0).unwrap();
        assert_eq!(sorted(tree.range(&line)), vec![p(0.5, 0.1), p(0.5, 0.5), p(0.5, 0.9)]);

        // Zero height
        let line = Rect::new(0.0, 0.5, 1.0, 0.5).unwrap();
        assert_eq!(sorted(tree.range(&line)), vec![p(0.3, 0.5), p(0.5, 0.5)]);

        // Single point
        let dot = Rect::new(0.5, 0.9, 0.5, 0.9).unwrap();
        assert_eq!(tree.range(&dot), vec![p(0.5, 0.9)]);
    }

    #[test]
    fn test_range_outside_all_points() {
        let tree = tree_of(&[(0.7, 0.2), (0.5, 0.4), (0.2, 0.3)]);
        let rect = Rect::new(2.0, 2.0, 3.0, 3.0).unwrap();
        assert!(tree.range(&rect).is_empty());
        let rect = Rect::new(-3.0, -3.0, -2.0, -2.0).unwrap();
        assert!(tree.range(&rect).is_empty());
    }

    #[test]
    fn test_range_into_clears_buffer() {
        let tree = tree_of(&[(0.7, 0.2), (0.5, 0.4)]);
        let mut results = vec![p(9.0, 9.0)];
        tree.range_into(&Rect::new(0.6, 0.0, 1.0, 1.0).unwrap(), &mut results);
        assert_eq!(results, vec![p(0.7, 0.2)]);
    }

    #[test]
    fn test_range_order_is_deterministic() {
        let tree = tree_of(&[(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)]);
        let rect = Rect::new(0.1, 0.1, 0.8, 0.8).unwrap();
        assert_eq!(tree.range(&rect), tree.range(&rect));
        assert_eq!(tree.range(&rect), tree.clone().range(&rect));
    }

    // ============================================================================
    // NEAREST QUERY TESTS
    // ============================================================================

    #[test]
    fn test_nearest_on_empty_tree() {
        let tree = SpatialTree::new();
        assert_eq!(tree.nearest(p(0.5, 0.5)).unwrap(), None);
    }

    #[test]
    fn test_nearest_single_point() {
        let tree = tree_of(&[(0.3, 0.3)]);
        assert_eq!(tree.nearest(p(100.0, -100.0)).unwrap(), Some(p(0.3, 0.3)));
    }

    #[test]
    fn test_nearest_exact_match() {
        let tree = tree_of(&[(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)]);
        assert_eq!(tree.nearest(p(0.4, 0.7)).unwrap(), Some(p(0.4, 0.7)));
    }

    #[test]
    fn test_nearest_across_splitting_line() {
        // Query falls right of the root split, but the answer is on the left
        let tree = tree_of(&[(0.5, 0.5), (0.49, 0.1), (0.9, 0.9)]);
        assert_eq!(tree.nearest(p(0.51, 0.1)).unwrap(), Some(p(0.49, 0.1)));
    }

    #[test]
    fn test_nearest_rejects_non_finite() {
        let tree = tree_of(&[(0.5, 0.5)]);
        let err = tree.nearest(p(f64::NAN, 0.0)).unwrap_err();
        assert!(err.is_invalid_argument());
        // Empty tree still reports the argument error, not "no result"
        assert!(SpatialTree::new().nearest(p(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_nearest_rejects_out_of_range_query() {
        let tree = tree_of(&[(0.5, 0.5)]);
        assert!(tree.nearest(p(1e300, 1e300)).is_err());
        assert!(tree.nearest(p(0.0, -1e200)).is_err());
    }

    #[test]
    fn test_nearest_with_extreme_coordinates() {
        // Squared distances here reach 1e300 and must stay comparable
        let m = Point::MAX_COORD;
        let tree = tree_of(&[(m, m), (-m, -m), (m, -m), (0.0, 0.0)]);
        assert_eq!(tree.nearest(p(m * 0.9, m * 0.9)).unwrap(), Some(p(m, m)));
        assert_eq!(tree.nearest(p(-m, -m * 0.8)).unwrap(), Some(p(-m, -m)));
        assert_eq!(tree.nearest(p(m * 0.1, -m * 0.2)).unwrap(), Some(p(0.0, 0.0)));
    }

    // ============================================================================
    // ITERATION TESTS
    // ============================================================================

    #[test]
    fn test_iter_is_preorder() {
        let tree = tree_of(&[(0.5, 0.5), (0.2, 0.2), (0.8, 0.8), (0.1, 0.9)]);
        let pts: Vec<Point> = tree.iter().collect();
        // root, left subtree (0.2,0.2 -> right 0.1,0.9), right subtree
        assert_eq!(pts, vec![p(0.5, 0.5), p(0.2, 0.2), p(0.1, 0.9), p(0.8, 0.8)]);
    }

    #[test]
    fn test_into_iterator_for_reference() {
        let tree = tree_of(&[(0.5, 0.5), (0.2, 0.2)]);
        let mut n = 0;
        for _ in &tree {
            n += 1;
        }
        assert_eq!(n, 2);
    }

    #[test]
    fn test_from_points() {
        let tree = SpatialTree::from_points([p(0.1, 0.1), p(0.2, 0.2), p(0.1, 0.1)]).unwrap();
        assert_eq!(tree.len(), 2);

        let err = SpatialTree::from_points([p(0.1, 0.1), p(f64::NAN, 0.0)]).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidPoint { .. }));
    }

    // ============================================================================
    // DEEP TREE TESTS
    // ============================================================================

    /// Sorted insertion turns the tree into a path as deep as it is long.
    fn diagonal(n: usize) -> SpatialTree {
        SpatialTree::from_points((0..n).map(|i| p(i as f64, i as f64))).unwrap()
    }

    #[test]
    fn test_drop_and_clone_deep_sorted_tree() {
        const N: usize = 50_000;

        // A small stack makes any recursion over the path overflow.
        let worker = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let tree = diagonal(N);
                assert_eq!(tree.len(), N);
                assert_eq!(tree.height(), N);
                assert!(tree.contains(p((N - 1) as f64, (N - 1) as f64)).unwrap());

                let copy = tree.clone();
                drop(tree);
                assert_eq!(copy.len(), N);
                assert_eq!(copy.height(), N);
                assert!(copy.iter().map(|pt| pt.x()).eq((0..N).map(|i| i as f64)));
                drop(copy);
            })
            .unwrap();
        worker.join().unwrap();
    }

    #[test]
    fn test_clone_is_independent() {
        let mut tree = tree_of(&[(0.5, 0.5), (0.2, 0.2), (0.8, 0.8), (0.1, 0.9)]);
        let copy = tree.clone();
        tree.insert(p(0.3, 0.3)).unwrap();

        assert_eq!(copy.len(), 4);
        assert!(!copy.contains(p(0.3, 0.3)).unwrap());
        assert_eq!(copy.iter().collect::<Vec<_>>(), vec![p(0.5, 0.5), p(0.2, 0.2), p(0.1, 0.9), p(0.8, 0.8)]);
        assert!(check_confinement(&copy));
    }

    #[test]
    fn test_debug_lists_points() {
        let tree = tree_of(&[(0.5, 0.5)]);
        let text = format!("{tree:?}");
        assert!(text.starts_with("SpatialTree"));
        assert!(text.contains("size: 1"));
        assert!(text.contains("0.5"));
    }

    // ============================================================================
    // THREADING TESTS
    // ============================================================================

    #[test]
    fn test_shared_behind_mutex() {
        use std::sync::{Arc, Mutex};

        let tree = Arc::new(Mutex::new(SpatialTree::new()));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tree = Arc::clone(&tree);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let pt = Point::new(t as f64, i as f64 / 50.0);
                        tree.lock().unwrap().insert(pt).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let tree = tree.lock().unwrap();
        assert_eq!(tree.len(), 200);
        assert!(check_confinement(&tree));
    }
}
