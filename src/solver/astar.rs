use crate::{coord::Coord, grid::Grid, Cost, Result};

use super::best_first::BestFirstSearch;
use super::{SearchStrategy, StepDelta};

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the
/// destination as heuristic. Every cell costs at least 1 to enter, so the heuristic is admissible
/// on the 4-connected grid. Ties on estimated cost go to the cell closest to the destination.
pub struct AstarSolver {
    search: BestFirstSearch<Cost>,
    destination: Coord,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            search: BestFirstSearch::new(),
            destination: Coord::default(),
        }
    }

    pub fn heuristic(&self, p: &Coord) -> Cost {
        manhattan_heuristic(p, &self.destination)
    }
}

fn manhattan_heuristic(p: &Coord, destination: &Coord) -> Cost {
    p.manhattan_distance(destination).unsigned_abs()
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl SearchStrategy for AstarSolver {
    fn initialize(&mut self, grid: &Grid) -> Result<()> {
        let (source, destination) = grid.endpoints()?;
        self.destination = destination;
        self.search.start(source, destination, self.heuristic(&source));
        Ok(())
    }

    fn step(&mut self, grid: &Grid) -> StepDelta {
        let destination = self.destination;
        self.search.step(
            |node| grid.neighborhood_points_and_cost(node),
            |p| manhattan_heuristic(p, &destination),
        )
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
    use crate::solver::dijkstra::DijkstraSolver;
    use crate::solver::test_util::drain;

    /// Asserts that the case in which the grid is a single corridor is handled correctly.
    #[test]
    fn corridor() {
        let grid: Grid = "S...D".parse().unwrap();
        let mut solver = AstarSolver::new();
        let order = drain(&mut solver, &grid);
        assert_eq!(order.len(), 5);
        assert_eq!(solver.path().unwrap().len(), 5);
    }

    /// Asserts that the optimal 4 step solution is found around an obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  D|
        let grid: Grid = "S..\n.#.\n..D".parse().unwrap();
        let mut solver = AstarSolver::new();
        drain(&mut solver, &grid);
        let path = solver.path().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(2, 2)));
    }

    /// The heuristic should make A* finalize no more cells than Dijkstra on an open grid.
    #[test]
    fn explores_less_than_dijkstra() {
        let grid: Grid = "S.......\n........\n........\n.......D".parse().unwrap();
        let mut astar = AstarSolver::new();
        let mut dijkstra = DijkstraSolver::new();
        let astar_order = drain(&mut astar, &grid);
        let dijkstra_order = drain(&mut dijkstra, &grid);
        assert!(astar_order.len() < dijkstra_order.len());
        assert_eq!(
            grid.path_cost(&astar.path().unwrap()),
            grid.path_cost(&dijkstra.path().unwrap())
        );
    }

    #[test]
    fn weighted_optimal() {
        let grid: Grid = "S5.\n.5.\n..D".parse().unwrap();
        let mut solver = AstarSolver::new();
        drain(&mut solver, &grid);
        assert_eq!(grid.path_cost(&solver.path().unwrap()), 4);
    }
}
