use fxhash::FxBuildHasher;
use indexmap::IndexMap;

use crate::coord::Coord;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the root node.
pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TreeNode<C> {
    pub parent: usize,
    pub cost: C,
    pub closed: bool,
}

/// Predecessor tree of a search. Nodes are kept in discovery order, so a node's index in the map
/// doubles as its handle in the frontier.
#[derive(Clone, Debug)]
pub(crate) struct SearchTree<C> {
    pub nodes: FxIndexMap<Coord, TreeNode<C>>,
}

impl<C: Copy> SearchTree<C> {
    pub fn new() -> SearchTree<C> {
        SearchTree {
            nodes: FxIndexMap::default(),
        }
    }

    /// Clears the tree and inserts `root`, returning its index.
    pub fn reset(&mut self, root: Coord, cost: C) -> usize {
        self.nodes.clear();
        self.nodes
            .insert_full(
                root,
                TreeNode {
                    parent: NO_PARENT,
                    cost,
                    closed: false,
                },
            )
            .0
    }

    pub fn index_of(&self, coord: &Coord) -> Option<usize> {
        self.nodes.get_index_of(coord)
    }

    /// Walks the parent links from `end` back to the root and returns the path root first.
    pub fn reverse_path(&self, end: usize) -> Vec<Coord> {
        let mut path = std::iter::successors(self.nodes.get_index(end), |(_, node)| {
            self.nodes.get_index(node.parent)
        })
        .map(|(coord, _)| *coord)
        .collect::<Vec<Coord>>();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_path_follows_parents() {
        let mut tree: SearchTree<u32> = SearchTree::new();
        let root = tree.reset(Coord::new(0, 0), 0);
        let (a, _) = tree.nodes.insert_full(
            Coord::new(0, 1),
            TreeNode {
                parent: root,
                cost: 1,
                closed: false,
            },
        );
        tree.nodes.insert(
            Coord::new(5, 5),
            TreeNode {
                parent: root,
                cost: 1,
                closed: false,
            },
        );
        let (b, _) = tree.nodes.insert_full(
            Coord::new(1, 1),
            TreeNode {
                parent: a,
                cost: 2,
                closed: false,
            },
        );
        assert_eq!(
            tree.reverse_path(b),
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
        assert_eq!(tree.reverse_path(root), vec![Coord::new(0, 0)]);
        assert_eq!(tree.index_of(&Coord::new(5, 5)), Some(2));
    }
}
