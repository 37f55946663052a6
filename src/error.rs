use grid_util::point::Point;
use thiserror::Error;

use crate::node::Role;

/// Failures building or addressing a [PathingGrid](crate::PathingGrid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("cell size must be at least 1 pixel")]
    ZeroCellSize,
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
}

/// A search was requested on a grid that does not describe exactly one start and one end.
/// Raised before anything on the grid is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("start and end are the same cell {0}")]
    SameEndpoints(Point),
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("{0} is a barrier")]
    BlockedEndpoint(Point),
    #[error("{point} should carry role {role:?}")]
    MissingRole { point: Point, role: Role },
    #[error("found {count} cells with role {role:?}, expected exactly one")]
    DuplicateRole { role: Role, count: usize },
    #[error("no {0:?} cell has been placed")]
    MissingEndpoint(Role),
}

/// The random obstacle generator gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("a {0}x{0} grid has no room for two endpoints")]
    GridTooSmall(usize),
    #[error("no end cell at the required distance after {attempts} attempts")]
    EndpointPlacement { attempts: usize },
    #[error("placed {placed} of {target} barriers before running out of attempts")]
    BarrierPlacement { placed: usize, target: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}
