//! # grid_search
//!
//! The search engine behind a grid pathfinding visualizer. A [Grid] holds obstacles, a source and
//! a destination; a [SearchSession] runs one of the [Algorithm]s over a snapshot of it, either in
//! one go or one expansion at a time, reporting which cells became
//! [candidates](Progress::candidates) and which were [finalized](Progress::finalized) so that a
//! front end can animate the search.
//!
//! Movement is 4-directional. Cells carry a positive traversal cost paid on entry, 1 by default,
//! which Dijkstra, A* and Bellman-Ford take into account and breadth-first search ignores.
//!
//! ```
//! use grid_search::{Algorithm, CellRole, Coord, Grid, SearchSession, SearchStatus};
//!
//! let mut grid = Grid::new(5, 5).unwrap();
//! grid.set_role(Coord::new(0, 0), CellRole::Source).unwrap();
//! grid.set_role(Coord::new(4, 4), CellRole::Destination).unwrap();
//!
//! let mut session = SearchSession::new(&grid, Algorithm::AStar).unwrap();
//! let result = session.run_to_completion().unwrap();
//! assert_eq!(result.status, SearchStatus::Found);
//! assert_eq!(result.path.len(), 9);
//! ```
pub mod algorithm;
pub mod coord;
pub mod error;
pub mod grid;
pub mod session;
pub mod solver;

pub use algorithm::Algorithm;
pub use coord::Coord;
pub use error::SearchError;
pub use grid::{CellRole, Grid};
pub use session::{
    create_session, search, Progress, SearchResult, SearchSession, SearchStatus, SessionState,
};
pub use solver::{SearchStrategy, StepDelta};

/// Traversal cost of a cell and accumulated path cost.
pub type Cost = u32;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Cost of entering a cell that was never given an explicit cost.
pub const DEFAULT_CELL_COST: Cost = 1;

/// Inline capacity of neighbour buffers; a cell has at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;
