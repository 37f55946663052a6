//! # grid_search
//!
//! Shortest paths on a square grid with painted obstacles, computed by a
//! [uniform-cost search](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) that settles
//! one cell at a time so every step can be rendered. Movement is 4-directional with unit
//! cost. Ties between cells at equal distance are broken by the order in which they joined
//! the frontier, which makes every run on the same grid explore in the same order.
//!
//! The pieces, from the bottom up:
//! - [PathingGrid]: the n×n cells and their [Role]s, with 4-neighbourhoods derived from the
//!   current barriers and [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//!   for cheap reachability checks.
//! - [UniformCostSearch](uniform_cost::UniformCostSearch): the generic, incremental engine.
//! - [search()]: runs the engine on a grid, marks frontier and visited cells and reports back
//!   through a [SearchObserver] after each expansion.
//! - [reconstruct]: turns the predecessor map of a successful run into the route.
//! - [Session] and [maze]: the editing commands of an interactive front end.
pub mod error;
pub mod maze;
pub mod node;
pub mod path;
pub mod pathing_grid;
pub mod search;
pub mod session;
pub mod uniform_cost;

pub use error::{ConfigurationError, GridError, MazeError};
pub use maze::{Maze, MazeConfig};
pub use node::{Node, Role};
pub use path::{is_contiguous, manhattan_distance, reconstruct, route};
pub use pathing_grid::{GridConfig, PathingGrid};
pub use search::{
    search, Cancellable, GridSearchState, NoopObserver, SearchObserver, SearchOutcome, SearchRun,
};
pub use session::{Button, Session};

pub const DEFAULT_GRID_SIZE: usize = 50;
pub const DEFAULT_CELL_SIZE: u32 = 16;
pub const DEFAULT_DENSITY: f64 = 0.3;
/// Cells have at most four neighbours.
pub const N_NEIGHBOURS: usize = 4;
