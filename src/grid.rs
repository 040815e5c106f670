use core::fmt;
use core::str::FromStr;

use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::debug;
use petgraph::unionfind::UnionFind;
use rand::seq::index;
use rand::Rng;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::SearchError;
use crate::{Cost, Result, DEFAULT_CELL_COST, N_SMALLVEC_SIZE};

/// Semantic classification of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellRole {
    #[default]
    Empty,
    Source,
    Destination,
    Obstacle,
}

impl CellRole {
    fn symbol(self) -> char {
        match self {
            CellRole::Empty => '.',
            CellRole::Source => 'S',
            CellRole::Destination => 'D',
            CellRole::Obstacle => '#',
        }
    }
}

/// [Grid] is a fixed-shape map of cells, each holding a [CellRole] and a traversal cost paid when
/// the cell is entered. It keeps at most one source and at most one destination, and neither is
/// ever an obstacle. Both layers are stored as [SimpleValueGrid]s indexed by
/// `Point { x: col, y: row }`.
#[derive(Clone, Debug)]
pub struct Grid {
    roles: SimpleValueGrid<CellRole>,
    costs: SimpleValueGrid<Cost>,
    source: Option<Coord>,
    destination: Option<Coord>,
}

impl Grid {
    /// Creates a grid with every cell [CellRole::Empty] and of unit cost.
    pub fn new(rows: i32, cols: i32) -> Result<Grid> {
        if rows <= 0 || cols <= 0 || (rows as usize).checked_mul(cols as usize).is_none() {
            return Err(SearchError::InvalidDimensions { rows, cols });
        }
        let (width, height) = (cols as usize, rows as usize);
        Ok(Grid {
            roles: SimpleValueGrid::new(width, height, CellRole::Empty),
            costs: SimpleValueGrid::new(width, height, DEFAULT_CELL_COST),
            source: None,
            destination: None,
        })
    }

    pub fn rows(&self) -> i32 {
        self.roles.height() as i32
    }

    pub fn cols(&self) -> i32 {
        self.roles.width() as i32
    }

    pub fn cell_count(&self) -> usize {
        self.roles.width() * self.roles.height()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.roles.point_in_bounds(Point::from(coord))
    }

    /// Whether the coordinate is on the grid and not an obstacle.
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && self.roles.get_point(Point::from(coord)) != CellRole::Obstacle
    }

    /// Dense index of an in-bounds coordinate, used to key the union-find.
    fn index(&self, coord: Coord) -> usize {
        debug_assert!(self.in_bounds(coord));
        self.roles.get_ix_point(&Point::from(coord))
    }

    fn checked_point(&self, coord: Coord) -> Result<Point> {
        if self.in_bounds(coord) {
            Ok(Point::from(coord))
        } else {
            Err(SearchError::OutOfBounds {
                coord,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    pub fn role(&self, coord: Coord) -> Result<CellRole> {
        self.checked_point(coord).map(|p| self.roles.get_point(p))
    }

    pub fn cost(&self, coord: Coord) -> Result<Cost> {
        self.checked_point(coord).map(|p| self.costs.get_point(p))
    }

    /// Cost of entering an in-bounds cell.
    pub(crate) fn entry_cost(&self, coord: Coord) -> Cost {
        self.costs.get_point(Point::from(coord))
    }

    pub fn source(&self) -> Option<Coord> {
        self.source
    }

    pub fn destination(&self) -> Option<Coord> {
        self.destination
    }

    /// Both endpoints, or [SearchError::MissingEndpoint] naming which ones are placed.
    pub fn endpoints(&self) -> Result<(Coord, Coord)> {
        match (self.source, self.destination) {
            (Some(s), Some(d)) => Ok((s, d)),
            (s, d) => Err(SearchError::MissingEndpoint {
                source: s.is_some(),
                destination: d.is_some(),
            }),
        }
    }

    /// Sets the role of a cell. Any other holder of [CellRole::Source] or
    /// [CellRole::Destination] is cleared, and if this cell was itself an endpoint that role is
    /// removed from the grid first, so marking the source as an obstacle leaves the grid without a
    /// source.
    pub fn set_role(&mut self, coord: Coord, role: CellRole) -> Result<()> {
        let point = self.checked_point(coord)?;
        match self.roles.get_point(point) {
            CellRole::Source => self.source = None,
            CellRole::Destination => self.destination = None,
            _ => {}
        }
        let previous = match role {
            CellRole::Source => self.source.replace(coord),
            CellRole::Destination => self.destination.replace(coord),
            _ => None,
        };
        if let Some(previous) = previous {
            self.roles.set_point(Point::from(previous), CellRole::Empty);
        }
        self.roles.set_point(point, role);
        Ok(())
    }

    /// Like [set_role](Self::set_role), but refuses to turn the current source or destination
    /// into an obstacle.
    pub fn try_set_role(&mut self, coord: Coord, role: CellRole) -> Result<()> {
        let current = self.role(coord)?;
        if role == CellRole::Obstacle
            && matches!(current, CellRole::Source | CellRole::Destination)
        {
            return Err(SearchError::InvalidRole {
                coord,
                current,
                requested: role,
            });
        }
        self.set_role(coord, role)
    }

    pub fn clear_cell(&mut self, coord: Coord) -> Result<()> {
        self.set_role(coord, CellRole::Empty)
    }

    /// Largest cost a single cell may carry: a path through every cell of the grid at this cost
    /// still fits in [Cost].
    pub fn max_cell_cost(&self) -> Cost {
        (Cost::MAX as usize / self.cell_count()).max(1) as Cost
    }

    /// Sets the cost of entering a cell. Costs range from 1 to [max_cell_cost](Self::max_cell_cost).
    pub fn set_cost(&mut self, coord: Coord, cost: Cost) -> Result<()> {
        let point = self.checked_point(coord)?;
        if cost == 0 || cost > self.max_cell_cost() {
            return Err(SearchError::InvalidCost { coord, cost });
        }
        self.costs.set_point(point, cost);
        Ok(())
    }

    /// Resets every cell to an empty, unit-cost cell.
    pub fn clear(&mut self) {
        let (width, height) = (self.roles.width(), self.roles.height());
        self.roles = SimpleValueGrid::new(width, height, CellRole::Empty);
        self.costs = SimpleValueGrid::new(width, height, DEFAULT_CELL_COST);
        self.source = None;
        self.destination = None;
    }

    /// In-bounds, non-obstacle neighbours of a cell in the order up, down, left, right. A
    /// coordinate outside the grid has no neighbours. The iterator is lazy and can be cloned to
    /// restart it.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + Clone + '_ {
        let mut ordered = [None; 4];
        if self.in_bounds(coord) {
            for n in Point::from(coord).neumann_neighborhood_smallvec() {
                let n = Coord::from(n);
                let slot = match (n.row - coord.row, n.col - coord.col) {
                    (-1, 0) => 0,
                    (1, 0) => 1,
                    (0, -1) => 2,
                    (0, 1) => 3,
                    _ => continue,
                };
                ordered[slot] = Some(n);
            }
        }
        ordered
            .into_iter()
            .flatten()
            .filter(move |&n| self.is_passable(n))
    }

    /// Passable neighbours paired with the cost of stepping onto them.
    pub(crate) fn neighborhood_points_and_cost(
        &self,
        pos: &Coord,
    ) -> SmallVec<[(Coord, Cost); N_SMALLVEC_SIZE]> {
        self.neighbors(*pos)
            .map(|p| (p, self.entry_cost(p)))
            .collect()
    }

    /// All cells with their role, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, CellRole)> + '_ {
        iproduct!(0..self.rows(), 0..self.cols()).map(move |(row, col)| {
            let coord = Coord::new(row, col);
            (coord, self.roles.get_point(Point::from(coord)))
        })
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells()
            .filter(|&(_, role)| role == CellRole::Obstacle)
            .count()
    }

    /// Replaces all obstacles by `obstacle_count` new ones placed uniformly at random, without
    /// replacement, on cells that are neither source nor destination. The count is clamped to
    /// `rows * cols - 2` so there is always room for both endpoints. Returns the number placed.
    pub fn randomize_obstacles<R: Rng + ?Sized>(
        &mut self,
        obstacle_count: i32,
        rng: &mut R,
    ) -> Result<usize> {
        if obstacle_count < 0 {
            return Err(SearchError::InvalidCount(obstacle_count));
        }
        let mut free = Vec::with_capacity(self.cell_count());
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            let point = Point::from(Coord::new(row, col));
            match self.roles.get_point(point) {
                CellRole::Obstacle => {
                    self.roles.set_point(point, CellRole::Empty);
                    free.push(point);
                }
                CellRole::Empty => free.push(point),
                CellRole::Source | CellRole::Destination => {}
            }
        }
        // At most two cells are endpoints, so `free` always holds at least `rows * cols - 2`.
        let amount = (obstacle_count as usize).min(self.cell_count().saturating_sub(2));
        for pick in index::sample(rng, free.len(), amount) {
            self.roles.set_point(free[pick], CellRole::Obstacle);
        }
        debug!(
            "Placed {} of {} requested obstacles on a {}x{} grid",
            amount,
            obstacle_count,
            self.rows(),
            self.cols()
        );
        Ok(amount)
    }

    /// Generates a [UnionFind] structure linking up 4-connected passable cells.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cell_count());
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            let point = Coord::new(row, col);
            if !self.is_passable(point) {
                continue;
            }
            let parent_ix = self.index(point);
            for n in [Coord::new(row + 1, col), Coord::new(row, col + 1)] {
                if self.is_passable(n) {
                    components.union(parent_ix, self.index(n));
                }
            }
        }
        components
    }

    /// Checks if two passable cells are on the same connected component.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        self.is_passable(*start)
            && self.is_passable(*goal)
            && self
                .components()
                .equiv(self.index(*start), self.index(*goal))
    }

    /// Total cost of following a path: the entry cost of every cell after the first. Saturates at
    /// [Cost::MAX].
    pub fn path_cost(&self, path: &[Coord]) -> Cost {
        path.iter()
            .skip(1)
            .filter(|&&c| self.in_bounds(c))
            .fold(0, |total: Cost, &c| total.saturating_add(self.entry_cost(c)))
    }

    fn row_string(&self, row: i32) -> String {
        (0..self.cols())
            .map(|col| {
                let point = Point::from(Coord::new(row, col));
                match (self.roles.get_point(point), self.costs.get_point(point)) {
                    (CellRole::Empty, cost @ 2..=9) => char::from_digit(cost, 10).unwrap_or('.'),
                    (role, _) => role.symbol(),
                }
            })
            .collect()
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.source == other.source
            && self.destination == other.destination
            && self
                .cells()
                .zip(other.cells())
                .all(|((c, a), (_, b))| a == b && self.entry_cost(c) == other.entry_cost(c))
    }
}

impl Eq for Grid {}

/// Renders one line per row: `.` empty, `#` obstacle, `S` source, `D` destination, and a digit
/// for empty cells with a traversal cost between 2 and 9.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", (0..self.rows()).map(|r| self.row_string(r)).join("\n"))
    }
}

/// Parses the format written by [Display](fmt::Display). Blank lines and surrounding whitespace
/// are ignored.
impl FromStr for Grid {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Grid> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<&str>>();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if let Some(ragged) = lines.iter().find(|l| l.chars().count() as i32 != cols) {
            return Err(SearchError::InvalidDimensions {
                rows,
                cols: ragged.chars().count() as i32,
            });
        }
        let mut grid = Grid::new(rows, cols)?;
        for (row, line) in lines.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let coord = Coord::new(row as i32, col as i32);
                let malformed = SearchError::MalformedMap { row, col, symbol };
                match symbol {
                    '.' => {}
                    '#' => grid.set_role(coord, CellRole::Obstacle)?,
                    'S' if grid.source.is_none() => grid.set_role(coord, CellRole::Source)?,
                    'D' if grid.destination.is_none() => {
                        grid.set_role(coord, CellRole::Destination)?
                    }
                    '1'..='9' => grid.set_cost(coord, symbol.to_digit(10).ok_or(malformed)?)?,
                    _ => return Err(malformed),
                }
            }
        }
        Ok(grid)
    }
}
