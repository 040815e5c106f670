//! A resumable variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html):
//! the search loop is unrolled into [BestFirstSearch::step], which expands a single node per call
//! so that Dijkstra and A* can be watched as they run.
use indexmap::map::Entry::{Occupied, Vacant};
use num_traits::{SaturatingAdd, Zero};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::tree::{SearchTree, TreeNode};
use super::StepDelta;
use crate::coord::Coord;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    heuristic: K,
    cost: K,
    seq: usize,
    index: usize,
}

impl<K: Ord> Eq for SmallestCostHolder<K> {}

impl<K: Ord> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: orders per smallest estimated cost, then smallest heuristic,
        // then earliest insertion.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub(crate) struct BestFirstSearch<C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    tree: SearchTree<C>,
    seq: usize,
    goal: Option<Coord>,
    reached: Option<usize>,
}

impl<C: Zero + SaturatingAdd + Ord + Copy> BestFirstSearch<C> {
    pub fn new() -> BestFirstSearch<C> {
        BestFirstSearch {
            to_see: BinaryHeap::new(),
            tree: SearchTree::new(),
            seq: 0,
            goal: None,
            reached: None,
        }
    }

    pub fn start(&mut self, start: Coord, goal: Coord, start_heuristic: C) {
        self.to_see.clear();
        self.seq = 0;
        self.goal = Some(goal);
        self.reached = None;
        let index = self.tree.reset(start, Zero::zero());
        self.push(index, Zero::zero(), start_heuristic);
    }

    fn push(&mut self, index: usize, cost: C, heuristic: C) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost: cost.saturating_add(&heuristic),
            heuristic,
            cost,
            seq: self.seq,
            index,
        });
        self.seq += 1;
    }

    /// Finalizes the cheapest open node and relaxes its successors. Outdated heap entries are
    /// discarded on the way, so one call finalizes at most one node. Costs saturate instead of
    /// wrapping.
    pub fn step<FN, IN, FH>(&mut self, mut successors: FN, mut heuristic: FH) -> StepDelta
    where
        FN: FnMut(&Coord) -> IN,
        IN: IntoIterator<Item = (Coord, C)>,
        FH: FnMut(&Coord) -> C,
    {
        let mut delta = StepDelta::default();
        if self.reached.is_some() {
            return delta;
        }
        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            let node = {
                let Some((node, entry)) = self.tree.nodes.get_index_mut(index) else {
                    continue;
                };
                // A node may have been pushed several times if a cheaper way to it was found.
                // Only the entry carrying its current cost counts.
                if entry.closed || cost > entry.cost {
                    continue;
                }
                entry.closed = true;
                *node
            };
            delta.finalized.push(node);
            if self.goal == Some(node) {
                self.reached = Some(index);
                return delta;
            }
            for (successor, move_cost) in successors(&node) {
                let new_cost = cost.saturating_add(&move_cost);
                let n = match self.tree.nodes.entry(successor) {
                    Vacant(e) => {
                        let n = e.index();
                        e.insert(TreeNode {
                            parent: index,
                            cost: new_cost,
                            closed: false,
                        });
                        delta.candidates.push(successor);
                        n
                    }
                    Occupied(mut e) => {
                        let known = e.get_mut();
                        if known.closed || known.cost <= new_cost {
                            continue;
                        }
                        known.cost = new_cost;
                        known.parent = index;
                        e.index()
                    }
                };
                let h = heuristic(&successor);
                self.push(n, new_cost, h);
            }
            return delta;
        }
        delta
    }

    pub fn is_done(&self) -> bool {
        self.reached.is_some() || self.to_see.is_empty()
    }

    pub fn reached(&self) -> bool {
        self.reached.is_some()
    }

    pub fn path(&self) -> Option<Vec<Coord>> {
        self.reached.map(|index| self.tree.reverse_path(index))
    }

    /// Accumulated cost of a discovered cell.
    pub fn cost_of(&self, coord: &Coord) -> Option<C> {
        self.tree.nodes.get(coord).map(|node| node.cost)
    }
}
