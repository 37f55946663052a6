//! Random obstacle placement. Start and end are dropped at random interior cells a minimum
//! Manhattan distance apart, then barriers are scattered over the remaining interior until
//! the requested density is met. Nothing guarantees that the end stays reachable; the
//! returned [Maze] records whether it is.
use grid_util::point::Point;
use log::{info, warn};
use rand::Rng;

use crate::error::MazeError;
use crate::node::Role;
use crate::path::manhattan_distance;
use crate::pathing_grid::PathingGrid;
use crate::DEFAULT_DENSITY;

#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    /// Fraction of all n² cells to turn into barriers.
    pub density: f64,
    pub min_endpoint_distance: usize,
    /// Random draws allowed per placement before giving up.
    pub max_attempts: usize,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            density: DEFAULT_DENSITY,
            min_endpoint_distance: 40,
            max_attempts: 10_000,
        }
    }
}

impl MazeConfig {
    /// Scales the endpoint distance to the grid: four fifths of its side.
    pub fn for_size(n: usize) -> MazeConfig {
        MazeConfig {
            min_endpoint_distance: n * 4 / 5,
            ..MazeConfig::default()
        }
    }
    pub fn density(mut self, density: f64) -> MazeConfig {
        self.density = density;
        self
    }
    pub fn min_endpoint_distance(mut self, distance: usize) -> MazeConfig {
        self.min_endpoint_distance = distance;
        self
    }
    pub fn max_attempts(mut self, attempts: usize) -> MazeConfig {
        self.max_attempts = attempts;
        self
    }
    /// Barriers to place on an n×n grid: the density target, capped by the interior size.
    pub fn barrier_target(&self, n: usize) -> usize {
        let interior = n.saturating_sub(2).pow(2);
        let wanted = (self.density.clamp(0.0, 1.0) * (n * n) as f64).ceil() as usize;
        wanted.min(interior)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub start: Point,
    pub end: Point,
    pub barriers: Vec<Point>,
    /// Whether the end can still be reached from the start.
    pub connected: bool,
}

fn random_interior<R: Rng>(n: usize, rng: &mut R) -> Point {
    Point::new(
        rng.gen_range(1..=n as i32 - 2),
        rng.gen_range(1..=n as i32 - 2),
    )
}

/// Draws interior cells until one is empty and passes `accept`.
fn draw_empty<R, F>(
    grid: &PathingGrid,
    rng: &mut R,
    max_attempts: usize,
    accept: F,
) -> Option<Point>
where
    R: Rng,
    F: Fn(Point) -> bool,
{
    let n = grid.size();
    (0..max_attempts)
        .map(|_| random_interior(n, rng))
        .find(|&p| grid.role(p) == Role::Empty && accept(p))
}

/// Places a start, an end and random barriers on the interior of `grid`, which is expected to
/// be freshly built. Cells that are not empty are never chosen.
///
/// Nothing is painted when the endpoints cannot be drawn or the density target exceeds the free
/// interior. If barrier placement runs out of attempts, every cell painted so far is reset, so
/// on any error the grid holds the same roles as before the call.
pub fn generate<R: Rng>(
    grid: &mut PathingGrid,
    rng: &mut R,
    config: &MazeConfig,
) -> Result<Maze, MazeError> {
    let n = grid.size();
    if n < 4 {
        return Err(MazeError::GridTooSmall(n));
    }
    let attempts = config.max_attempts;

    let start = draw_empty(grid, rng, attempts, |_| true)
        .ok_or(MazeError::EndpointPlacement { attempts })?;
    let end = draw_empty(grid, rng, attempts, |p| {
        p != start && manhattan_distance(&p, &start) as usize >= config.min_endpoint_distance
    })
    .ok_or(MazeError::EndpointPlacement { attempts })?;

    let target = config.barrier_target(n);
    // Both endpoints are drawn from the empty interior and take two of its cells.
    let free = (1..n as i32 - 1)
        .flat_map(|row| (1..n as i32 - 1).map(move |col| Point::new(row, col)))
        .filter(|&p| grid.role(p) == Role::Empty)
        .count()
        - 2;
    if target > free {
        warn!("{target} barriers requested but only {free} interior cells are free");
        return Err(MazeError::BarrierPlacement { placed: 0, target });
    }

    grid.set_role(start, Role::Start)?;
    grid.set_role(end, Role::End)?;
    let mut barriers = Vec::with_capacity(target);
    while barriers.len() < target {
        match draw_empty(grid, rng, attempts, |_| true) {
            Some(p) => {
                grid.set_role(p, Role::Barrier)?;
                barriers.push(p);
            }
            None => {
                warn!(
                    "Gave up placing barriers after {attempts} attempts, resetting {} cells",
                    barriers.len() + 2
                );
                let placed = barriers.len();
                for p in barriers.into_iter().chain([start, end]) {
                    grid.reset(p)?;
                }
                return Err(MazeError::BarrierPlacement { placed, target });
            }
        }
    }

    grid.update();
    let connected = grid.reachable(&start, &end);
    info!(
        "Generated maze with {} barriers from {} to {} (connected: {})",
        barriers.len(),
        start,
        end,
        connected
    );
    Ok(Maze {
        start,
        end,
        barriers,
        connected,
    })
}
