//! Step-wise search strategies over a [Grid].
//!
//! Every strategy keeps its own frontier and a [search tree](tree::SearchTree) of discovered
//! cells, and advances by one expansion unit per [step](SearchStrategy::step) so a host can
//! repaint between steps.
use crate::{coord::Coord, grid::Grid, Result};

pub mod astar;
pub mod bellman_ford;
pub(crate) mod best_first;
pub mod bfs;
pub mod dijkstra;
pub(crate) mod tree;

/// Cells whose visual state changed during one step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepDelta {
    /// Newly discovered cells, now queued on the frontier.
    pub candidates: Vec<Coord>,
    /// Cells whose cost became final during this step.
    pub finalized: Vec<Coord>,
}

impl StepDelta {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.finalized.is_empty()
    }
}

/// Common interface of the search algorithms. The same grid must be passed to
/// [initialize](Self::initialize) and every subsequent [step](Self::step); a
/// [SearchSession](crate::session::SearchSession) guarantees this by owning a snapshot.
pub trait SearchStrategy {
    /// Resets the strategy and seeds the frontier with the grid's source. Fails with
    /// [MissingEndpoint](crate::SearchError::MissingEndpoint) unless both endpoints are placed.
    fn initialize(&mut self, grid: &Grid) -> Result<()>;

    /// Performs one expansion unit. Once [is_done](Self::is_done) holds this returns an empty
    /// delta.
    fn step(&mut self, grid: &Grid) -> StepDelta;

    /// True once the destination is finalized or the frontier ran dry.
    fn is_done(&self) -> bool;

    fn reached_destination(&self) -> bool;

    /// Source to destination path through the predecessor links, if the destination was reached.
    fn path(&self) -> Option<Vec<Coord>>;
}
