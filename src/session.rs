//! Stateful, resumable searches.
//!
//! A [SearchSession] snapshots a [Grid] and drives one [SearchStrategy] over it through the states
//! `Idle -> Running -> Completed | Failed`. Hosts either call [advance](SearchSession::advance)
//! once per frame and repaint the reported cells, or call
//! [run_to_completion](SearchSession::run_to_completion) to get the answer straight away.
use log::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::coord::Coord;
use crate::error::SearchError;
use crate::grid::Grid;
use crate::solver::SearchStrategy;
use crate::{Cost, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, strategy not initialized yet.
    Idle,
    Running,
    /// The destination was finalized and a path is available.
    Completed,
    /// The frontier ran dry before reaching the destination.
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStatus {
    Found,
    Unreachable,
    NotRun,
}

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Source to destination, both included. Empty unless [SearchStatus::Found].
    pub path: Vec<Coord>,
    /// Cells in the order they were finalized.
    pub explored: Vec<Coord>,
    /// Sum of the entry costs along `path`.
    pub cost: Option<Cost>,
}

impl SearchResult {
    pub fn not_run() -> SearchResult {
        SearchResult {
            status: SearchStatus::NotRun,
            path: Vec::new(),
            explored: Vec::new(),
            cost: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Number of moves along the path.
    pub fn hops(&self) -> Option<usize> {
        self.is_found().then(|| self.path.len().saturating_sub(1))
    }
}

/// Cells to repaint after one [advance](SearchSession::advance).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub candidates: Vec<Coord>,
    pub finalized: Vec<Coord>,
    /// Session state after the step.
    pub state: SessionState,
}

pub struct SearchSession {
    grid: Grid,
    algorithm: Algorithm,
    strategy: Box<dyn SearchStrategy>,
    state: SessionState,
    explored: Vec<Coord>,
    steps: usize,
    result: SearchResult,
}

impl SearchSession {
    /// Snapshots `grid` and prepares a search with the given algorithm. Edits made to `grid`
    /// afterwards do not affect the session.
    pub fn new(grid: &Grid, algorithm: Algorithm) -> Result<SearchSession> {
        let (source, destination) = grid.endpoints()?;
        info!(
            "Created {} session from {} to {} on a {}x{} grid",
            algorithm,
            source,
            destination,
            grid.rows(),
            grid.cols()
        );
        Ok(SearchSession {
            grid: grid.clone(),
            algorithm,
            strategy: algorithm.solver(),
            state: SessionState::Idle,
            explored: Vec::new(),
            steps: 0,
            result: SearchResult::not_run(),
        })
    }

    /// Performs one step of the strategy, initializing it first if the session is idle.
    pub fn advance(&mut self) -> Result<Progress> {
        match self.state {
            SessionState::Completed | SessionState::Failed => {
                return Err(SearchError::SessionFinished)
            }
            SessionState::Idle => {
                self.strategy.initialize(&self.grid)?;
                self.state = SessionState::Running;
            }
            SessionState::Running => {}
        }
        let delta = self.strategy.step(&self.grid);
        self.steps += 1;
        self.explored.extend_from_slice(&delta.finalized);
        debug!(
            "Step {}: {} candidates, {} finalized",
            self.steps,
            delta.candidates.len(),
            delta.finalized.len()
        );
        if self.strategy.is_done() {
            self.finish();
        }
        Ok(Progress {
            candidates: delta.candidates,
            finalized: delta.finalized,
            state: self.state,
        })
    }

    fn finish(&mut self) {
        let path = if self.strategy.reached_destination() {
            self.strategy.path()
        } else {
            None
        };
        self.result = match path {
            Some(path) => {
                let cost = self.grid.path_cost(&path);
                info!(
                    "{} found a path of {} cells (cost {}) after {} steps",
                    self.algorithm,
                    path.len(),
                    cost,
                    self.steps
                );
                self.state = SessionState::Completed;
                SearchResult {
                    status: SearchStatus::Found,
                    path,
                    explored: self.explored.clone(),
                    cost: Some(cost),
                }
            }
            None => {
                if let Ok((source, destination)) = self.grid.endpoints() {
                    if self.grid.reachable(&source, &destination) {
                        warn!(
                            "{} did not reach {} although it shares a component with {}",
                            self.algorithm, destination, source
                        );
                    }
                }
                info!(
                    "{} exhausted the frontier after {} steps: destination unreachable",
                    self.algorithm, self.steps
                );
                self.state = SessionState::Failed;
                SearchResult {
                    status: SearchStatus::Unreachable,
                    path: Vec::new(),
                    explored: self.explored.clone(),
                    cost: None,
                }
            }
        };
    }

    /// Advances until the session is completed or failed. Stepping manually with
    /// [advance](Self::advance) yields the same result.
    pub fn run_to_completion(&mut self) -> Result<&SearchResult> {
        while !self.state.is_terminal() {
            self.advance()?;
        }
        Ok(&self.result)
    }

    /// The final result, or a [SearchStatus::NotRun] result while the search is unfinished.
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The grid snapshot the session searches.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Cells finalized so far, in order.
    pub fn explored(&self) -> &[Coord] {
        &self.explored
    }
}

/// Creates a [SearchSession] over a snapshot of `grid`.
pub fn create_session(grid: &Grid, algorithm: Algorithm) -> Result<SearchSession> {
    SearchSession::new(grid, algorithm)
}

/// Runs a whole search in one call.
pub fn search(grid: &Grid, algorithm: Algorithm) -> Result<SearchResult> {
    let mut session = SearchSession::new(grid, algorithm)?;
    session.run_to_completion().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellRole;

    #[test]
    fn walks_through_states() {
        let grid: Grid = "S.D".parse().unwrap();
        let mut session = SearchSession::new(&grid, Algorithm::BreadthFirst).unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.result().status, SearchStatus::NotRun);

        let first = session.advance().unwrap();
        assert_eq!(first.state, SessionState::Running);
        assert_eq!(first.finalized, vec![Coord::new(0, 0)]);
        assert_eq!(first.candidates, vec![Coord::new(0, 1)]);

        session.advance().unwrap();
        let last = session.advance().unwrap();
        assert_eq!(last.state, SessionState::Completed);
        assert!(session.is_done());
        assert_eq!(session.steps(), 3);
        assert_eq!(session.result().cost, Some(2));
        assert_eq!(session.result().hops(), Some(2));
        assert_eq!(session.explored(), session.result().explored.as_slice());
        assert_eq!(session.advance(), Err(SearchError::SessionFinished));
    }

    #[test]
    fn requires_both_endpoints() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_role(Coord::new(0, 0), CellRole::Source).unwrap();
        assert!(matches!(
            SearchSession::new(&grid, Algorithm::Dijkstra),
            Err(SearchError::MissingEndpoint {
                source: true,
                destination: false
            })
        ));
    }

    /// The session keeps searching its snapshot even if the caller edits the grid.
    #[test]
    fn grid_is_snapshotted() {
        let mut grid: Grid = "S..\n...\n..D".parse().unwrap();
        let mut session = SearchSession::new(&grid, Algorithm::AStar).unwrap();
        session.advance().unwrap();
        for col in 0..3 {
            grid.set_role(Coord::new(1, col), CellRole::Obstacle).unwrap();
        }
        let result = session.run_to_completion().unwrap();
        assert!(result.is_found());
        assert_eq!(session.grid().obstacle_count(), 0);
    }

    #[test]
    fn run_to_completion_is_idempotent() {
        let grid: Grid = "S#D".parse().unwrap();
        let mut session = SearchSession::new(&grid, Algorithm::BellmanFord).unwrap();
        let first = session.run_to_completion().unwrap().clone();
        assert_eq!(first.status, SearchStatus::Unreachable);
        assert_eq!(first.cost, None);
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.run_to_completion().unwrap(), &first);
    }
}
