use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::solver::{
    astar::AstarSolver, bellman_ford::BellmanFordSolver, bfs::BfsSolver,
    dijkstra::DijkstraSolver, SearchStrategy,
};

/// The implemented search algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    Dijkstra,
    AStar,
    BreadthFirst,
    BellmanFord,
}

impl Algorithm {
    /// All algorithms in the order a selector would list them.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::BreadthFirst,
        Algorithm::BellmanFord,
    ];

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's",
            Algorithm::AStar => "A*",
            Algorithm::BreadthFirst => "Breadth First",
            Algorithm::BellmanFord => "Bellman-Ford",
        }
    }

    /// A fresh, uninitialized strategy for this algorithm.
    pub fn solver(self) -> Box<dyn SearchStrategy> {
        match self {
            Algorithm::Dijkstra => Box::new(DijkstraSolver::new()),
            Algorithm::AStar => Box::new(AstarSolver::new()),
            Algorithm::BreadthFirst => Box::new(BfsSolver::new()),
            Algorithm::BellmanFord => Box::new(BellmanFordSolver::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the labels as well as short names (`dijkstra`, `astar`, `bfs`, `bellman_ford`, ...),
/// ignoring case, spaces, dashes and underscores.
impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Algorithm, SearchError> {
        let key = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '\''))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "dijkstra" | "dijkstras" => Ok(Algorithm::Dijkstra),
            "a*" | "astar" => Ok(Algorithm::AStar),
            "breadthfirst" | "bfs" => Ok(Algorithm::BreadthFirst),
            "bellmanford" => Ok(Algorithm::BellmanFord),
            _ => Err(SearchError::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}
