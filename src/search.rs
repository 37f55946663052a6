use grid_util::point::Point;
use log::{debug, info};

use crate::error::ConfigurationError;
use crate::node::Role;
use crate::path::reconstruct;
use crate::pathing_grid::PathingGrid;
use crate::uniform_cost::{SearchState, Step, UniformCostSearch};

/// Search bookkeeping on a grid: unit-step distances keyed by cell.
pub type GridSearchState = SearchState<Point, u32>;

/// Hooks a search run calls back into. The grid handed to [on_step](Self::on_step) shows the
/// frontier and visited marks as they are after the current node was expanded.
pub trait SearchObserver {
    /// Called once for every settled node, after its neighbours were relaxed.
    fn on_step(&mut self, grid: &PathingGrid, state: &GridSearchState);

    /// Polled once before each node is taken off the frontier.
    fn is_cancelled(&mut self) -> bool {
        false
    }

    fn with_cancel<F>(self, cancel: F) -> Cancellable<Self, F>
    where
        Self: Sized,
        F: FnMut() -> bool,
    {
        Cancellable {
            observer: self,
            cancel,
        }
    }
}

impl<F> SearchObserver for F
where
    F: FnMut(&PathingGrid, &GridSearchState),
{
    fn on_step(&mut self, grid: &PathingGrid, state: &GridSearchState) {
        self(grid, state)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_step(&mut self, _: &PathingGrid, _: &GridSearchState) {}
}

/// Pairs an observer with a cancellation query.
pub struct Cancellable<O, F> {
    observer: O,
    cancel: F,
}

impl<O, F> SearchObserver for Cancellable<O, F>
where
    O: SearchObserver,
    F: FnMut() -> bool,
{
    fn on_step(&mut self, grid: &PathingGrid, state: &GridSearchState) {
        self.observer.on_step(grid, state)
    }
    fn is_cancelled(&mut self) -> bool {
        (self.cancel)() || self.observer.is_cancelled()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found,
    /// The frontier emptied before the end was reached.
    NotFound,
    /// The observer asked to stop. The state is incomplete.
    Cancelled,
}

/// Everything a finished (or abandoned) search leaves behind.
#[derive(Clone, Debug)]
pub struct SearchRun {
    pub outcome: SearchOutcome,
    pub state: GridSearchState,
    pub start: Point,
    pub end: Point,
    /// Number of nodes settled, which equals the number of `on_step` calls.
    pub steps: usize,
}

impl SearchRun {
    pub fn is_found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }
    /// Distance to the end in unit steps, if the end was reached.
    pub fn distance(&self) -> Option<u32> {
        self.is_found()
            .then(|| self.state.distance(&self.end))
            .flatten()
    }
    /// Reconstructs and marks the route, but only for a successful run.
    pub fn path(&self, grid: &mut PathingGrid) -> Option<Vec<Point>> {
        self.is_found()
            .then(|| reconstruct(grid, self.state.predecessors(), self.end))
    }
}

/// Checks that `start` and `end` are the single start and end cells of the grid.
pub fn validate(grid: &PathingGrid, start: Point, end: Point) -> Result<(), ConfigurationError> {
    if start == end {
        return Err(ConfigurationError::SameEndpoints(start));
    }
    for (point, role) in [(start, Role::Start), (end, Role::End)] {
        if !grid.in_bounds(point) {
            return Err(ConfigurationError::OutOfBounds(point));
        }
        if grid.role(point).is_barrier() {
            return Err(ConfigurationError::BlockedEndpoint(point));
        }
        if grid.role(point) != role {
            return Err(ConfigurationError::MissingRole { point, role });
        }
    }
    for role in [Role::Start, Role::End] {
        let count = grid.count(role);
        if count != 1 {
            return Err(ConfigurationError::DuplicateRole { role, count });
        }
    }
    Ok(())
}

/// Runs a uniform-cost search from `start` to `end`, marking cells as they join the frontier
/// and as they are settled, and calling `observer` after every expansion. Neighbourhoods are
/// refreshed from the current barriers before the first step.
///
/// Exploration order is fully determined by the grid: among cells at equal distance, the one
/// that joined the frontier first is expanded first, and neighbours are generated down, up,
/// right, left.
pub fn search<O>(
    grid: &mut PathingGrid,
    start: Point,
    end: Point,
    observer: &mut O,
) -> Result<SearchRun, ConfigurationError>
where
    O: SearchObserver + ?Sized,
{
    validate(grid, start, end)?;
    grid.update_neighbours();
    debug!("Searching from {} to {}", start, end);

    let mut engine: UniformCostSearch<Point, u32> = UniformCostSearch::new(start, end);
    let mut steps = 0;
    let outcome = loop {
        if observer.is_cancelled() {
            break SearchOutcome::Cancelled;
        }
        let step = {
            let grid = &*grid;
            engine.step(|p| grid.cached_neighbours(*p).iter().map(|&n| (n, 1)))
        };
        match step {
            Step::Expanded { node, enqueued } => {
                for p in enqueued {
                    grid.mark(p, Role::Frontier);
                }
                steps += 1;
                observer.on_step(grid, engine.state());
                if node != start {
                    grid.mark(node, Role::Visited);
                }
            }
            Step::Reached(_) => break SearchOutcome::Found,
            Step::Exhausted => break SearchOutcome::NotFound,
        }
    };
    let state = engine.into_state();
    info!(
        "Search from {} to {}: {:?} after {} steps ({} cells enqueued)",
        start,
        end,
        outcome,
        steps,
        state.sequence()
    );
    Ok(SearchRun {
        outcome,
        state,
        start,
        end,
        steps,
    })
}
