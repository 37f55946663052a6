use fxhash::FxHashMap;
use grid_util::point::Point;
use itertools::Itertools;
use std::hash::Hash;

use crate::node::Role;
use crate::pathing_grid::PathingGrid;

/// Walks the predecessor map back from `end` and returns the route in start-to-end order,
/// without the start itself (which has no predecessor) but with `end`. Empty if `end` has no
/// predecessor.
pub fn route<N>(predecessors: &FxHashMap<N, N>, end: &N) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    if !predecessors.contains_key(end) {
        return Vec::new();
    }
    let mut path: Vec<N> = std::iter::successors(Some(end.clone()), |node| {
        predecessors.get(node).cloned()
    })
    // A well-formed map has no cycles; bound the walk anyway.
    .take(predecessors.len() + 1)
    .collect();
    // The last node visited is the start.
    path.pop();
    path.reverse();
    path
}

/// [route], additionally marking every cell on it as [Role::Path] for the renderer. The
/// start and end cells keep their roles.
pub fn reconstruct(
    grid: &mut PathingGrid,
    predecessors: &FxHashMap<Point, Point>,
    end: Point,
) -> Vec<Point> {
    let path = route(predecessors, &end);
    for &p in &path {
        grid.mark(p, Role::Path);
    }
    path
}

pub fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Checks that `path` leaves `start` and continues with single 4-neighbour moves.
pub fn is_contiguous(start: Point, path: &[Point]) -> bool {
    std::iter::once(&start)
        .chain(path)
        .tuple_windows()
        .all(|(a, b)| manhattan_distance(a, b) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing_grid::GridConfig;

    fn chain(points: &[Point]) -> FxHashMap<Point, Point> {
        points
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| (to, from))
            .collect()
    }

    #[test]
    fn walks_back_to_start() {
        let points = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(2, 1),
        ];
        let predecessors = chain(&points);
        let path = route(&predecessors, &Point::new(2, 1));
        assert_eq!(path, points[1..].to_vec());
        assert!(is_contiguous(points[0], &path));
    }

    #[test]
    fn empty_without_predecessor() {
        let predecessors = chain(&[Point::new(0, 0), Point::new(0, 1)]);
        assert!(route(&predecessors, &Point::new(5, 5)).is_empty());
        assert!(route(&predecessors, &Point::new(0, 0)).is_empty());
    }

    #[test]
    fn terminates_on_cycles() {
        let mut predecessors = FxHashMap::default();
        predecessors.insert(1, 2);
        predecessors.insert(2, 1);
        assert!(route(&predecessors, &1).len() <= 2);
    }

    #[test]
    fn marks_path_but_not_endpoints() {
        let mut grid = GridConfig::new(3).border(false).build().unwrap();
        let start = Point::new(0, 0);
        let end = Point::new(0, 2);
        grid.set_role(start, Role::Start).unwrap();
        grid.set_role(end, Role::End).unwrap();
        let predecessors = chain(&[start, Point::new(0, 1), end]);
        let first = reconstruct(&mut grid, &predecessors, end);
        assert_eq!(first, vec![Point::new(0, 1), end]);
        assert_eq!(grid.role(Point::new(0, 1)), Role::Path);
        assert_eq!(grid.role(start), Role::Start);
        assert_eq!(grid.role(end), Role::End);
        assert_eq!(reconstruct(&mut grid, &predecessors, end), first);
    }

    #[test]
    fn detects_gaps() {
        let start = Point::new(0, 0);
        assert!(!is_contiguous(start, &[Point::new(1, 1)]));
        assert!(is_contiguous(start, &[]));
    }
}
