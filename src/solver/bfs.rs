use std::collections::VecDeque;

use indexmap::map::Entry::Vacant;

use crate::{coord::Coord, grid::Grid, Result};

use super::tree::{SearchTree, TreeNode};
use super::{SearchStrategy, StepDelta};

/// Breadth-first search. Every move counts as one hop regardless of cell cost, and a FIFO queue
/// expands cells layer by layer, so the returned path has the fewest possible hops.
pub struct BfsSolver {
    queue: VecDeque<usize>,
    tree: SearchTree<u32>,
    destination: Option<Coord>,
    reached: Option<usize>,
}

impl BfsSolver {
    pub fn new() -> BfsSolver {
        BfsSolver {
            queue: VecDeque::new(),
            tree: SearchTree::new(),
            destination: None,
            reached: None,
        }
    }

    /// Hop count from the source to a discovered cell.
    pub fn hops(&self, coord: &Coord) -> Option<u32> {
        self.tree.nodes.get(coord).map(|node| node.cost)
    }
}

impl Default for BfsSolver {
    fn default() -> BfsSolver {
        BfsSolver::new()
    }
}

impl SearchStrategy for BfsSolver {
    fn initialize(&mut self, grid: &Grid) -> Result<()> {
        let (source, destination) = grid.endpoints()?;
        self.queue.clear();
        self.destination = Some(destination);
        self.reached = None;
        let root = self.tree.reset(source, 0);
        self.queue.push_back(root);
        Ok(())
    }

    fn step(&mut self, grid: &Grid) -> StepDelta {
        let mut delta = StepDelta::default();
        if self.reached.is_some() {
            return delta;
        }
        let Some(index) = self.queue.pop_front() else {
            return delta;
        };
        let (node, hops) = match self.tree.nodes.get_index_mut(index) {
            Some((node, entry)) => {
                entry.closed = true;
                (*node, entry.cost)
            }
            None => return delta,
        };
        delta.finalized.push(node);
        if self.destination == Some(node) {
            self.reached = Some(index);
            return delta;
        }
        for n in grid.neighbors(node) {
            // Cells are marked on discovery, so each one enters the queue once.
            if let Vacant(e) = self.tree.nodes.entry(n) {
                self.queue.push_back(e.index());
                e.insert(TreeNode {
                    parent: index,
                    cost: hops.saturating_add(1),
                    closed: false,
                });
                delta.candidates.push(n);
            }
        }
        delta
    }

    fn is_done(&self) -> bool {
        self.reached.is_some() || self.queue.is_empty()
    }

    fn reached_destination(&self) -> bool {
        self.reached.is_some()
    }

    fn path(&self) -> Option<Vec<Coord>> {
        self.reached.map(|index| self.tree.reverse_path(index))
    }
}
