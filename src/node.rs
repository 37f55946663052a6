use grid_util::point::Point;

/// What a cell currently is. Search marks (`Frontier`, `Visited`, `Path`) are cosmetic and
/// never affect adjacency; only `Barrier` does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    Frontier,
    Visited,
    Path,
}

impl Role {
    pub fn is_barrier(self) -> bool {
        self == Role::Barrier
    }
    pub fn is_endpoint(self) -> bool {
        matches!(self, Role::Start | Role::End)
    }
    /// Marks left behind by a search run.
    pub fn is_search_mark(self) -> bool {
        matches!(self, Role::Frontier | Role::Visited | Role::Path)
    }
    /// Single character used by the text renderer.
    pub fn symbol(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Barrier => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Frontier => 'o',
            Role::Visited => 'x',
            Role::Path => '*',
        }
    }
}

/// A cell of a [PathingGrid](crate::PathingGrid) together with its role at the time it was read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub point: Point,
    pub role: Role,
}

impl Node {
    pub fn row(&self) -> usize {
        self.point.x as usize
    }
    pub fn col(&self) -> usize {
        self.point.y as usize
    }
}
