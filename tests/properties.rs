use fxhash::FxHashMap;
use grid_search::{
    is_contiguous, manhattan_distance, route, search, ConfigurationError, GridConfig,
    GridSearchState, NoopObserver, PathingGrid, Role, SearchOutcome,
};
use grid_util::point::Point;
use rand::prelude::*;

fn open_grid(n: usize) -> PathingGrid {
    GridConfig::new(n).border(false).build().unwrap()
}

fn with_endpoints(mut grid: PathingGrid, start: Point, end: Point) -> PathingGrid {
    grid.set_role(start, Role::Start).unwrap();
    grid.set_role(end, Role::End).unwrap();
    grid
}

/// Without barriers the route is as long as the Manhattan distance.
#[test]
fn open_grid_paths_are_manhattan() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..200 {
        let n = rng.gen_range(2..12);
        let start = Point::new(rng.gen_range(0..n as i32), rng.gen_range(0..n as i32));
        let end = Point::new(rng.gen_range(0..n as i32), rng.gen_range(0..n as i32));
        if start == end {
            continue;
        }
        let mut grid = with_endpoints(open_grid(n), start, end);
        let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
        assert_eq!(run.outcome, SearchOutcome::Found);
        let path = run.path(&mut grid).unwrap();
        assert_eq!(path.len() as i32, manhattan_distance(&start, &end));
        assert!(is_contiguous(start, &path));
    }
}

#[test]
fn walled_off_end_is_not_found() {
    // A full column of barriers splits the grid in two.
    let start = Point::new(2, 0);
    let end = Point::new(2, 4);
    let mut grid = with_endpoints(open_grid(5), start, end);
    for row in 0..5 {
        grid.set_role(Point::new(row, 2), Role::Barrier).unwrap();
    }
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.outcome, SearchOutcome::NotFound);
    assert_eq!(run.state.distance(&end), None);
    assert!(run.state.is_complete());
    // Both left columns are settled.
    assert_eq!(run.steps, 10);
    assert!(run.path(&mut grid).is_none());
}

#[test]
fn repeated_runs_are_identical() {
    let start = Point::new(1, 1);
    let end = Point::new(6, 5);
    let mut grid = with_endpoints(open_grid(8), start, end);
    for p in [(2, 2), (3, 2), (4, 2), (4, 3), (4, 4), (2, 5), (3, 5)] {
        grid.set_role(Point::new(p.0, p.1), Role::Barrier).unwrap();
    }
    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut copy = grid.clone();
        let mut calls: usize = 0;
        let mut order = Vec::new();
        let mut observer = |_: &PathingGrid, state: &GridSearchState| {
            calls += 1;
            order.push(state.sequence());
        };
        let run = search(&mut copy, start, end, &mut observer).unwrap();
        runs.push((run.state.predecessors().clone(), calls, order, run.steps));
    }
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0].1, runs[0].3);
}

#[test]
fn reconstruction_is_idempotent() {
    let start = Point::new(0, 0);
    let end = Point::new(3, 3);
    let mut grid = with_endpoints(open_grid(4), start, end);
    grid.set_role(Point::new(1, 1), Role::Barrier).unwrap();
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    let first = run.path(&mut grid).unwrap();
    let second = run.path(&mut grid).unwrap();
    assert_eq!(first, second);
    assert_eq!(route(run.state.predecessors(), &end), first);
}

/// Distances seen between steps only ever go down.
#[test]
fn distances_never_increase() {
    let start = Point::new(0, 0);
    let end = Point::new(9, 9);
    let mut grid = with_endpoints(open_grid(10), start, end);
    for row in 1..9 {
        grid.set_role(Point::new(row, 4), Role::Barrier).unwrap();
    }
    let mut seen: FxHashMap<Point, u32> = FxHashMap::default();
    let mut observer = |_: &PathingGrid, state: &GridSearchState| {
        for (p, &d) in state.reached() {
            if let Some(&before) = seen.get(p) {
                assert!(d <= before);
            }
            seen.insert(*p, d);
        }
    };
    let run = search(&mut grid, start, end, &mut observer).unwrap();
    assert!(run.is_found());
    assert!(!seen.is_empty());
}

/// Two routes of equal length around a 2x2 block: the one through the neighbour that joined
/// the frontier first (down before right) wins.
#[test]
fn tie_break_prefers_earlier_enqueued() {
    let start = Point::new(0, 0);
    let end = Point::new(1, 1);
    let mut grid = with_endpoints(open_grid(2), start, end);
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.state.predecessor(&end), Some(&Point::new(1, 0)));
    assert_eq!(run.state.predecessor(&Point::new(0, 1)), Some(&start));
    assert_eq!(
        run.path(&mut grid).unwrap(),
        vec![Point::new(1, 0), end]
    );
}

#[test]
fn detour_around_barrier() {
    let start = Point::new(1, 1);
    let end = Point::new(1, 3);
    let mut grid = with_endpoints(open_grid(5), start, end);
    grid.set_role(Point::new(1, 2), Role::Barrier).unwrap();
    grid.set_role(Point::new(0, 2), Role::Barrier).unwrap();
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.outcome, SearchOutcome::Found);
    assert_eq!(run.distance(), Some(4));
    let path = run.path(&mut grid).unwrap();
    assert_eq!(
        path,
        vec![
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(2, 3),
            Point::new(1, 3)
        ]
    );
    assert_eq!(grid.role(Point::new(2, 2)), Role::Path);
}

#[test]
fn identical_endpoints_are_rejected() {
    let mut grid = open_grid(3);
    grid.set_role(Point::new(0, 0), Role::Start).unwrap();
    let before = grid.to_string();
    let p = Point::new(0, 0);
    let err = search(&mut grid, p, p, &mut NoopObserver).unwrap_err();
    assert_eq!(err, ConfigurationError::SameEndpoints(p));
    assert_eq!(grid.to_string(), before);
}

fn corridor() -> (PathingGrid, Point, Point) {
    // 12x12 with its border, and everything inside but row 1 walled up: a corridor of ten cells.
    let mut grid = PathingGrid::build(12, 8).unwrap();
    for row in 2..11 {
        for col in 1..11 {
            grid.set_role(Point::new(row, col), Role::Barrier).unwrap();
        }
    }
    let start = Point::new(1, 1);
    let end = Point::new(1, 10);
    (with_endpoints(grid, start, end), start, end)
}

#[test]
fn corridor_counts_every_enqueued_cell() {
    let (mut grid, start, end) = corridor();
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.outcome, SearchOutcome::Found);
    assert_eq!(run.path(&mut grid).unwrap().len(), 9);
    assert_eq!(run.state.sequence(), 10);
    assert_eq!(run.steps, 9);
}

#[test]
fn blocked_corridor() {
    let (mut grid, start, end) = corridor();
    grid.set_role(Point::new(1, 5), Role::Barrier).unwrap();
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.outcome, SearchOutcome::NotFound);
    assert_eq!(run.steps, 4);
    assert_eq!(run.state.sequence(), 4);
    assert_eq!(grid.count(Role::Visited), 3);
}

/// Painting a barrier between runs is picked up without any manual refresh.
#[test]
fn barrier_changes_apply_to_next_run() {
    let start = Point::new(0, 0);
    let end = Point::new(0, 2);
    let mut grid = with_endpoints(open_grid(3), start, end);
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.distance(), Some(2));

    grid.clear_search_marks();
    grid.set_role(Point::new(0, 1), Role::Barrier).unwrap();
    let run = search(&mut grid, start, end, &mut NoopObserver).unwrap();
    assert_eq!(run.distance(), Some(4));
}
