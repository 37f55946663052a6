use crate::error::GridError;
use crate::node::{Node, Role};
use crate::{DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, N_NEIGHBOURS};
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

pub type Neighbours = SmallVec<[Point; N_NEIGHBOURS]>;

/// Row and column offsets in the order neighbours are produced: down, up, right, left.
/// Search tie-breaking depends on this order staying fixed.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); N_NEIGHBOURS] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Settings for building a [PathingGrid].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub size: usize,
    pub cell_size: u32,
    /// Whether the outermost ring of cells starts out as barriers.
    pub border: bool,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            border: true,
        }
    }
}

impl GridConfig {
    pub fn new(size: usize) -> GridConfig {
        GridConfig {
            size,
            ..GridConfig::default()
        }
    }
    pub fn cell_size(mut self, cell_size: u32) -> GridConfig {
        self.cell_size = cell_size;
        self
    }
    pub fn border(mut self, border: bool) -> GridConfig {
        self.border = border;
        self
    }
    pub fn build(&self) -> Result<PathingGrid, GridError> {
        PathingGrid::with_config(self)
    }
}

/// [PathingGrid] owns the roles of all n×n cells in a [SimpleGrid]. Points address cells as
/// (row, col): `x` is the row and `y` the column. Next to the roles it keeps a cached
/// 4-neighbourhood per cell, which is only valid until the next barrier change, and a
/// [UnionFind] over free cells for quick reachability checks.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: SimpleGrid<Role>,
    pub cell_size: u32,
    neighbours: Vec<Neighbours>,
    neighbours_dirty: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Builds an n×n grid whose border ring is made of barriers.
    pub fn build(n: usize, cell_size: u32) -> Result<PathingGrid, GridError> {
        GridConfig::new(n).cell_size(cell_size).build()
    }

    pub fn with_config(config: &GridConfig) -> Result<PathingGrid, GridError> {
        if config.size == 0 {
            return Err(GridError::EmptyGrid);
        }
        if config.cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        let n = config.size;
        let mut pathing_grid = PathingGrid {
            grid: SimpleGrid::new(n, n, Role::Empty),
            cell_size: config.cell_size,
            neighbours: vec![Neighbours::new(); n * n],
            neighbours_dirty: true,
            components: UnionFind::new(n * n),
            components_dirty: true,
        };
        if config.border {
            for i in 0..n {
                for j in 0..n {
                    if i == 0 || j == 0 || i == n - 1 || j == n - 1 {
                        pathing_grid.grid.set(i, j, Role::Barrier);
                    }
                }
            }
        }
        pathing_grid.update_neighbours();
        pathing_grid.generate_components();
        info!(
            "Built {n}x{n} grid with {}px cells (border: {})",
            config.cell_size, config.border
        );
        Ok(pathing_grid)
    }

    /// Number of rows, which equals the number of columns.
    pub fn size(&self) -> usize {
        self.grid.width()
    }
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        let n = self.size() as i32;
        point.x >= 0 && point.y >= 0 && point.x < n && point.y < n
    }
    /// Whether the point lies on the outermost ring of cells.
    pub fn is_border(&self, point: Point) -> bool {
        let last = self.size() as i32 - 1;
        self.in_bounds(point) && (point.x == 0 || point.y == 0 || point.x == last || point.y == last)
    }
    fn ix(&self, point: Point) -> usize {
        point.x as usize * self.size() + point.y as usize
    }
    fn check_bounds(&self, point: Point) -> Result<(), GridError> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(point))
        }
    }

    /// Role of an in-bounds cell; out-of-bounds points read as [Role::Barrier].
    pub fn role(&self, point: Point) -> Role {
        if self.in_bounds(point) {
            self.grid.get(point.x as usize, point.y as usize)
        } else {
            Role::Barrier
        }
    }
    pub fn node(&self, point: Point) -> Option<Node> {
        self.in_bounds(point).then(|| Node {
            point,
            role: self.role(point),
        })
    }
    pub fn is_free(&self, point: Point) -> bool {
        self.in_bounds(point) && !self.role(point).is_barrier()
    }

    /// Changes the role of a cell. Turning a cell into or out of a barrier invalidates the
    /// cached neighbourhoods, joins newly connected components and flags the components as
    /// dirty if they are (potentially) broken apart.
    pub fn set_role(&mut self, point: Point, role: Role) -> Result<(), GridError> {
        self.check_bounds(point)?;
        let was_barrier = self.role(point).is_barrier();
        self.grid.set(point.x as usize, point.y as usize, role);
        if was_barrier != role.is_barrier() {
            self.neighbours_dirty = true;
            if role.is_barrier() {
                self.components_dirty = true;
            } else {
                let p_ix = self.ix(point);
                for n in self.neighbours_of(point) {
                    let n_ix = self.ix(n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        Ok(())
    }
    pub fn reset(&mut self, point: Point) -> Result<(), GridError> {
        self.set_role(point, Role::Empty)
    }
    /// Paints a search mark. Endpoints and barriers keep their role, and since marks never
    /// block movement the neighbourhoods stay valid.
    pub(crate) fn mark(&mut self, point: Point, role: Role) {
        debug_assert!(role.is_search_mark());
        let current = self.role(point);
        if self.in_bounds(point) && !current.is_endpoint() && !current.is_barrier() {
            self.grid.set(point.x as usize, point.y as usize, role);
        }
    }

    /// Up to four in-bounds, non-barrier cells around `point`, ordered down, up, right, left.
    /// Computed from the current roles, never from the cache.
    pub fn neighbours_of(&self, point: Point) -> Neighbours {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dr, dc)| Point::new(point.x + dr, point.y + dc))
            .filter(|&p| self.is_free(p))
            .collect::<Neighbours>()
    }
    /// Recomputes every cached neighbourhood from the current barrier layout.
    pub fn update_neighbours(&mut self) {
        let n = self.size();
        let mut neighbours = Vec::with_capacity(n * n);
        for row in 0..n as i32 {
            for col in 0..n as i32 {
                neighbours.push(self.neighbours_of(Point::new(row, col)));
            }
        }
        self.neighbours = neighbours;
        self.neighbours_dirty = false;
        debug!("Refreshed neighbourhoods of {} cells", n * n);
    }
    /// Whether a barrier changed since the last [update_neighbours](Self::update_neighbours).
    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }
    /// Neighbourhood as of the last [update_neighbours](Self::update_neighbours).
    pub fn cached_neighbours(&self, point: Point) -> &[Point] {
        if self.in_bounds(point) {
            &self.neighbours[self.ix(point)]
        } else {
            &[]
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let n = self.size() as i32;
        (0..n).flat_map(move |row| (0..n).map(move |col| Point::new(row, col)))
    }
    pub fn count(&self, role: Role) -> usize {
        self.points().filter(|&p| self.role(p) == role).count()
    }
    /// First start and first end cell in row-major order.
    pub fn endpoints(&self) -> (Option<Point>, Option<Point>) {
        let start = self.points().find(|&p| self.role(p) == Role::Start);
        let end = self.points().find(|&p| self.role(p) == Role::End);
        (start, end)
    }
    /// Turns frontier, visited and path marks of an earlier run back into empty cells.
    pub fn clear_search_marks(&mut self) {
        let n = self.size();
        for i in 0..n {
            for j in 0..n {
                if self.grid.get(i, j).is_search_mark() {
                    self.grid.set(i, j, Role::Empty);
                }
            }
        }
    }

    /// Maps a pixel position to the cell drawn there. Rows run along the horizontal axis.
    pub fn cell_at(&self, px: u32, py: u32) -> Option<Point> {
        let point = Point::new((px / self.cell_size) as i32, (py / self.cell_size) as i32);
        self.in_bounds(point).then_some(point)
    }
    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, point: Point) -> (u32, u32) {
        (
            point.x as u32 * self.cell_size,
            point.y as u32 * self.cell_size,
        )
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.ix(*point))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_free(*start) && self.is_free(*goal) {
            !self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        let n = self.size();
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for row in 0..n as i32 {
            for col in 0..n as i32 {
                let point = Point::new(row, col);
                if !self.is_free(point) {
                    continue;
                }
                let parent_ix = self.ix(point);
                // Linking down and right covers every edge once.
                for p in [Point::new(row + 1, col), Point::new(row, col + 1)] {
                    if self.is_free(p) {
                        let ix = self.ix(p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.size();
        for row in 0..n {
            let line = (0..n)
                .map(|col| self.grid.get(row, col).symbol())
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
