use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;

use crate::{coord::Coord, grid::Grid, Cost, Result};

use super::tree::{SearchTree, TreeNode};
use super::{SearchStrategy, StepDelta};

/// Bellman-Ford relaxation. One step is a full pass over every edge of the grid in row-major
/// order. The search ends after the first pass that relaxes nothing, or after `rows * cols - 1`
/// passes; every reached cell is then reported as finalized at once, in discovery order.
pub struct BellmanFordSolver {
    tree: SearchTree<Cost>,
    passes: usize,
    max_passes: usize,
    converged: bool,
    destination: Option<Coord>,
    reached: Option<usize>,
}

impl BellmanFordSolver {
    pub fn new() -> BellmanFordSolver {
        BellmanFordSolver {
            tree: SearchTree::new(),
            passes: 0,
            max_passes: 0,
            converged: false,
            destination: None,
            reached: None,
        }
    }

    /// Number of relaxation passes performed so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Current distance estimate of a cell, [None] while it is still infinite.
    pub fn distance(&self, coord: &Coord) -> Option<Cost> {
        self.tree.nodes.get(coord).map(|node| node.cost)
    }

    /// Relaxes every outgoing edge of every reached cell once. Returns whether anything improved.
    fn relax_all(&mut self, grid: &Grid, delta: &mut StepDelta) -> bool {
        let mut relaxed = false;
        for (u, _) in grid.cells() {
            let Some((u_index, _, &TreeNode { cost: du, .. })) = self.tree.nodes.get_full(&u)
            else {
                continue;
            };
            for (v, w) in grid.neighborhood_points_and_cost(&u) {
                let new_cost = du.saturating_add(w);
                match self.tree.nodes.entry(v) {
                    Vacant(e) => {
                        e.insert(TreeNode {
                            parent: u_index,
                            cost: new_cost,
                            closed: false,
                        });
                        delta.candidates.push(v);
                        relaxed = true;
                    }
                    Occupied(mut e) => {
                        let known = e.get_mut();
                        if new_cost < known.cost {
                            known.cost = new_cost;
                            known.parent = u_index;
                            relaxed = true;
                        }
                    }
                }
            }
        }
        relaxed
    }
}

impl Default for BellmanFordSolver {
    fn default() -> BellmanFordSolver {
        BellmanFordSolver::new()
    }
}

impl SearchStrategy for BellmanFordSolver {
    fn initialize(&mut self, grid: &Grid) -> Result<()> {
        let (source, destination) = grid.endpoints()?;
        self.tree.reset(source, 0);
        self.passes = 0;
        self.max_passes = grid.cell_count().saturating_sub(1);
        self.converged = false;
        self.destination = Some(destination);
        self.reached = None;
        Ok(())
    }

    fn step(&mut self, grid: &Grid) -> StepDelta {
        let mut delta = StepDelta::default();
        if self.converged {
            return delta;
        }
        self.passes += 1;
        let relaxed = self.relax_all(grid, &mut delta);
        if !relaxed || self.passes >= self.max_passes {
            debug!(
                "Bellman-Ford stopped after {} passes ({} cells reached)",
                self.passes,
                self.tree.nodes.len()
            );
            self.converged = true;
            for (coord, node) in self.tree.nodes.iter_mut() {
                node.closed = true;
                delta.finalized.push(*coord);
            }
            self.reached = self
                .destination
                .and_then(|destination| self.tree.index_of(&destination));
        }
        delta
    }

    fn is_done(&self) -> bool {
        self.converged
    }

    fn reached_destination(&self) -> bool {
        self.reached.is_some()
    }

    fn path(&self) -> Option<Vec<Coord>> {
        self.reached.map(|index| self.tree.reverse_path(index))
    }
}
