use grid_util::point::Point;
use log::debug;
use rand::Rng;

use crate::error::{ConfigurationError, GridError, MazeError};
use crate::maze::{self, Maze, MazeConfig};
use crate::node::Role;
use crate::pathing_grid::{GridConfig, PathingGrid};
use crate::search::{search, SearchObserver, SearchRun};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Places the start, then the end, then barriers.
    Primary,
    /// Erases whatever is under the cursor.
    Secondary,
}

/// State of one interactive editing session: the grid plus which cells are the start and the
/// end. Replaces the grid wholesale on [clear](Self::clear) and [generate](Self::generate).
#[derive(Clone, Debug)]
pub struct Session {
    pub grid: PathingGrid,
    blank: PathingGrid,
    config: GridConfig,
    start: Option<Point>,
    end: Option<Point>,
}

impl Session {
    pub fn new(config: GridConfig) -> Result<Session, GridError> {
        let blank = config.build()?;
        Ok(Session {
            grid: blank.clone(),
            blank,
            config,
            start: None,
            end: None,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// The border ring is not editable when the grid was built with one.
    fn editable(&self, point: Point) -> bool {
        self.grid.in_bounds(point) && !(self.config.border && self.grid.is_border(point))
    }

    /// Places the start if there is none, otherwise the end if there is none, otherwise a
    /// barrier. Clicking an existing endpoint does nothing. Returns whether the grid changed.
    pub fn primary_click(&mut self, point: Point) -> bool {
        if !self.editable(point) {
            return false;
        }
        let role = if self.start.is_none() && Some(point) != self.end {
            self.start = Some(point);
            Role::Start
        } else if self.end.is_none() && Some(point) != self.start {
            self.end = Some(point);
            Role::End
        } else if Some(point) != self.start && Some(point) != self.end {
            Role::Barrier
        } else {
            return false;
        };
        self.grid.set_role(point, role).is_ok()
    }

    /// Resets the cell, forgetting it if it was the start or the end.
    pub fn secondary_click(&mut self, point: Point) -> bool {
        if !self.editable(point) {
            return false;
        }
        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        self.grid.reset(point).is_ok()
    }

    pub fn click_at_pixel(&mut self, px: u32, py: u32, button: Button) -> bool {
        match self.grid.cell_at(px, py) {
            Some(point) => match button {
                Button::Primary => self.primary_click(point),
                Button::Secondary => self.secondary_click(point),
            },
            None => false,
        }
    }

    /// Searches from the placed start to the placed end. Marks left by an earlier run are
    /// wiped first. On success the route is reconstructed, marked and returned as well.
    pub fn run<O>(
        &mut self,
        observer: &mut O,
    ) -> Result<(SearchRun, Option<Vec<Point>>), ConfigurationError>
    where
        O: SearchObserver + ?Sized,
    {
        let start = self
            .start
            .ok_or(ConfigurationError::MissingEndpoint(Role::Start))?;
        let end = self
            .end
            .ok_or(ConfigurationError::MissingEndpoint(Role::End))?;
        self.grid.clear_search_marks();
        let run = search(&mut self.grid, start, end, observer)?;
        let path = run.path(&mut self.grid);
        Ok((run, path))
    }

    /// Replaces the grid with a freshly built one and forgets both endpoints.
    pub fn clear(&mut self) {
        debug!("Clearing session grid");
        self.grid = self.blank.clone();
        self.start = None;
        self.end = None;
    }

    /// Clears the grid and fills it with a random maze. On failure the grid is left cleared.
    pub fn generate<R: Rng>(&mut self, rng: &mut R, config: &MazeConfig) -> Result<Maze, MazeError> {
        self.clear();
        match maze::generate(&mut self.grid, rng, config) {
            Ok(maze) => {
                self.start = Some(maze.start);
                self.end = Some(maze.end);
                Ok(maze)
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }
}
