use super::index::MultigridNode;
use crate::boundary::{Boundary, Interval};
use crate::multigrid::Multigrid;
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::IndexableNum;

fn unit_boundary<const D: usize>() -> Boundary<D, f32> {
    Boundary::splat(Interval::new(0.0, 1.0))
}

/// Leaf indices and the free stack must partition the point pool: every slot
/// is owned by exactly one leaf or sits on the free stack, never both.
fn audit_partition<const D: usize, N: IndexableNum>(grid: &Multigrid<D, N>) -> bool {
    fn collect(node: &MultigridNode, seen: &mut [bool], ok: &mut bool) {
        match node {
            MultigridNode::Leaf(indices) => {
                for &index in indices.iter() {
                    if index >= seen.len() || seen[index] {
                        *ok = false;
                    } else {
                        seen[index] = true;
                    }
                }
            }
            MultigridNode::Internal(children) => {
                for child in children.values() {
                    collect(child, seen, ok);
                }
            }
        }
    }

    let mut seen = vec![false; grid.store.points.len()];
    let mut ok = true;
    for node in grid.root.values() {
        collect(node, &mut seen, &mut ok);
    }
    for &index in &grid.store.free_indices {
        if index >= seen.len() || seen[index] {
            ok = false;
        } else {
            seen[index] = true;
        }
    }
    ok && seen.iter().all(|&slot| slot)
}

#[test]
fn shared_first_coordinate_splits_on_the_second() {
    let mut grid = Multigrid::<4, f32>::with_parameters(unit_boundary(), 1000.0, 8);
    let points: Vec<_> = (0..9)
        .map(|i| Point::new([0.123, 0.05 * (i + 1) as f32, 0.5, 0.5]))
        .collect();

    for point in &points[..8] {
        assert!(grid.insert(point));
    }
    // Eight points share the dimension-0 cell: one root entry, still a leaf.
    assert_eq!(grid.root.len(), 1);
    assert!(matches!(
        grid.root.values().next(),
        Some(MultigridNode::Leaf(_))
    ));

    // The ninth overflows the leaf, which converts into a dimension-1
    // partition; the distinct second coordinates spread into one leaf each.
    assert!(grid.insert(&points[8]));
    assert_eq!(grid.root.len(), 1);
    assert!(matches!(
        grid.root.values().next(),
        Some(MultigridNode::Internal(_))
    ));
    assert_eq!(grid.num_buckets(), 9);

    for point in &points {
        assert!(grid.query(point));
    }
    assert!(audit_partition(&grid));
}

#[test]
fn leaves_at_maximum_depth_grow_past_the_bucket_size() {
    let mut grid = Multigrid::<2, f32>::with_parameters(unit_boundary(), 10.0, 2);
    // All five points land in grid cell (5, 5) at every level.
    let points: Vec<_> = (0..5)
        .map(|i| Point::new([0.55 + 0.002 * i as f32, 0.55]))
        .collect();

    for point in &points {
        assert!(grid.insert(point));
    }
    assert_eq!(grid.num_buckets(), 1);
    assert_eq!(grid.max_points_per_bucket(), 5);
    for point in &points {
        assert!(grid.query(point));
    }
    assert!(audit_partition(&grid));
}

#[test]
fn freed_slots_are_reused_most_recent_first() {
    let mut grid = Multigrid::<2, f32>::new(unit_boundary());
    let a = Point::new([0.1, 0.1]);
    let b = Point::new([0.2, 0.2]);
    let c = Point::new([0.3, 0.3]);
    assert!(grid.insert(&a));
    assert!(grid.insert(&b));
    assert!(grid.insert(&c));
    assert_eq!(grid.store.points.len(), 3);

    assert!(grid.remove(&a));
    assert!(grid.remove(&c));
    assert_eq!(grid.store.free_indices, vec![0, 2]);

    // The slot vacated last is handed out first, and the pool does not grow.
    let d = Point::new([0.4, 0.4]);
    assert!(grid.insert(&d));
    assert_eq!(grid.store.points.len(), 3);
    assert_eq!(grid.store.free_indices, vec![0]);
    assert_eq!(grid.num_points_stored(), 2);
    assert!(audit_partition(&grid));
}

#[test]
fn duplicate_insert_is_rejected_in_every_node_shape() {
    let mut grid = Multigrid::<4, f32>::with_parameters(unit_boundary(), 1000.0, 8);
    let points: Vec<_> = (0..9)
        .map(|i| Point::new([0.123, 0.05 * (i + 1) as f32, 0.5, 0.5]))
        .collect();
    for point in &points {
        assert!(grid.insert(point));
    }

    // Once against a deep leaf, once against a fresh shallow one.
    assert!(!grid.insert(&points[0]));
    assert!(grid.insert(&Point::new([0.9, 0.9, 0.9, 0.9])));
    assert!(!grid.insert(&Point::new([0.9, 0.9, 0.9, 0.9])));
    assert_eq!(grid.num_points_stored(), 10);
    assert!(audit_partition(&grid));
}

#[test]
fn remove_missing_point_returns_false() {
    let mut grid = Multigrid::<2, f32>::new(unit_boundary());
    assert!(!grid.remove(&Point::new([0.5, 0.5])));

    assert!(grid.insert(&Point::new([0.5, 0.5])));
    // Lands in the stored point's cell but matches nothing there.
    assert!(!grid.remove(&Point::new([0.5, 0.9])));
    assert_eq!(grid.num_points_stored(), 1);
}

#[test]
fn tolerant_equality_within_a_cell() {
    let mut grid = Multigrid::<2, f32>::with_parameters(unit_boundary(), 10.0, 8);
    let stored = Point::new([0.55, 0.55]);
    assert!(grid.insert(&stored));

    let drifted = Point::new([0.55 + 5.0e-8, 0.55]);
    let distinct = Point::new([0.55 + 2.0e-7, 0.55]);
    assert!(grid.query(&drifted));
    assert!(!grid.query(&distinct));
}

#[test]
fn clear_requires_a_fresh_boundary() {
    let mut grid = Multigrid::<2, f32>::new(unit_boundary());
    for i in 0..10 {
        assert!(grid.insert(&Point::new([0.05 * i as f32, 0.3])));
    }
    grid.clear(Boundary::splat(Interval::new(-1.0, 1.0)));

    assert_eq!(grid.num_points_stored(), 0);
    assert_eq!(grid.num_buckets(), 0);
    assert_eq!(grid.store.points.len(), 0);
    assert!(!grid.query(&Point::new([0.05, 0.3])));
    assert!(grid.insert(&Point::new([0.05, 0.3])));
}

#[test]
fn bucket_statistics() {
    let mut grid = Multigrid::<2, f32>::with_parameters(unit_boundary(), 10.0, 8);
    // Three points in cell (1, _), one in cell (7, _).
    assert!(grid.insert(&Point::new([0.11, 0.5])));
    assert!(grid.insert(&Point::new([0.12, 0.5])));
    assert!(grid.insert(&Point::new([0.13, 0.5])));
    assert!(grid.insert(&Point::new([0.71, 0.5])));

    assert_eq!(grid.num_points_stored(), 4);
    assert_eq!(grid.num_buckets(), 2);
    assert!((grid.avg_points_per_bucket() - 2.0).abs() < f64::EPSILON);
    assert_eq!(grid.min_points_per_bucket(), 1);
    assert_eq!(grid.max_points_per_bucket(), 3);
}
