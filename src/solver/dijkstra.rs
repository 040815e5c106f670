use crate::{coord::Coord, grid::Grid, Cost, Result};

use super::best_first::BestFirstSearch;
use super::{SearchStrategy, StepDelta};

/// Uniform-cost search keyed on accumulated traversal cost. Cells of equal cost are expanded in
/// the order they were discovered.
pub struct DijkstraSolver {
    search: BestFirstSearch<Cost>,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver {
            search: BestFirstSearch::new(),
        }
    }

    /// Best known cost from the source to a discovered cell.
    pub fn distance(&self, coord: &Coord) -> Option<Cost> {
        self.search.cost_of(coord)
    }
}

impl Default for DijkstraSolver {
    fn default() -> DijkstraSolver {
        DijkstraSolver::new()
    }
}

impl SearchStrategy for DijkstraSolver {
    fn initialize(&mut self, grid: &Grid) -> Result<()> {
        let (source, destination) = grid.endpoints()?;
        self.search.start(source, destination, 0);
        Ok(())
    }

    fn step(&mut self, grid: &Grid) -> StepDelta {
        self.search.step(|node| grid.neighborhood_points_and_cost(node), |_| 0)
    }

    fn is_done(&self) -> bool {
        self.search.is_done()
    }

    fn reached_destination(&self) -> bool {
        self.search.reached()
    }

    fn path(&self) -> Option<Vec<Coord>> {
        self.search.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_util::drain;

    /// Asserts that the cheap detour is preferred over the expensive straight line.
    #[test]
    fn prefers_cheaper_detour() {
        // |S9D|
        // |...|
        let grid: Grid = "S9D\n...".parse().unwrap();
        let mut solver = DijkstraSolver::new();
        drain(&mut solver, &grid);
        assert!(solver.reached_destination());
        let path = solver.path().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(grid.path_cost(&path), 4);
        assert_eq!(solver.distance(&Coord::new(0, 2)), Some(4));
    }

    #[test]
    fn missing_destination_is_rejected() {
        let grid: Grid = "S..".parse().unwrap();
        let err = DijkstraSolver::new().initialize(&grid).unwrap_err();
        assert_eq!(err.code(), "MISSING_ENDPOINT");
    }

    /// Cells are finalized in non-decreasing cost order.
    #[test]
    fn finalization_order_is_monotone() {
        let grid: Grid = "S.3.\n.#2.\n.1.D".parse().unwrap();
        let mut solver = DijkstraSolver::new();
        let order = drain(&mut solver, &grid);
        let costs = order
            .iter()
            .map(|c| solver.distance(c).unwrap())
            .collect::<Vec<_>>();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(order.last(), Some(&Coord::new(2, 3)));
    }
}
