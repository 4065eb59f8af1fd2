use std::marker::PhantomData;

use ahash::AHashMap;
use derive_getters::Getters;

pub use node::{Coordinate, FragmentPair, NodeId, PathNode};

use crate::pairwise::nw::algo::{Branches, Tracer};
use crate::{Score, GAP};

mod node;
mod render;

/// What happens to graph nodes once no future cell can use them as a parent.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Retention {
    /// Reclaim a node as soon as its anti-diagonal successor was processed. Live memory is
    /// bounded by a band around the current row.
    #[default]
    Prune,
    /// Keep every node, including explicit gap-padding nodes along row 0 and column 0.
    /// Memory is unbounded: the number of distinct tied paths may grow combinatorially.
    Retain,
}

/// Counters describing the graph construction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Getters)]
pub struct Stats {
    created: usize,
    pruned: usize,
    peak_live: usize,
}

impl Stats {
    pub fn live(&self) -> usize {
        self.created - self.pruned
    }
}

/// Directed acyclic graph of every optimal backtrace path, overlaid on the score matrix.
///
/// Nodes live in an arena and are addressed by [`NodeId`]; a coordinate index guarantees at most
/// one node per matrix cell. The graph is built while the matrix is filled: it implements
/// [`Tracer`] and translates every winning recurrence branch into an edge.
pub struct PathGraph<S: Score> {
    seq1: Vec<u8>,
    seq2: Vec<u8>,
    retention: Retention,

    arena: Vec<Option<PathNode>>,
    index: AHashMap<Coordinate, NodeId>,
    leaves: Vec<NodeId>,
    stats: Stats,

    _phantom: PhantomData<S>,
}

impl<S: Score> PathGraph<S> {
    pub fn new(seq1: &[u8], seq2: &[u8], retention: Retention) -> Self {
        Self {
            seq1: seq1.to_vec(),
            seq2: seq2.to_vec(),
            retention,
            arena: Vec::new(),
            index: AHashMap::new(),
            leaves: Vec::new(),
            stats: Stats::default(),
            _phantom: Default::default(),
        }
    }

    pub fn seq1(&self) -> &[u8] {
        &self.seq1
    }

    pub fn seq2(&self) -> &[u8] {
        &self.seq2
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Live node by id, `None` if it was pruned.
    pub fn node(&self, id: NodeId) -> Option<&PathNode> {
        self.arena.get(id.index()).and_then(|x| x.as_ref())
    }

    /// Live node at the given matrix coordinate.
    pub fn find(&self, x: usize, y: usize) -> Option<&PathNode> {
        self.index
            .get(&Coordinate::new(x, y))
            .and_then(|id| self.node(*id))
    }

    /// Live nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.arena
            .iter()
            .enumerate()
            .filter_map(|(ind, node)| node.as_ref().map(|node| (NodeId::from(ind), node)))
    }

    /// Live nodes without parents: every fragment they hold starts at the matrix origin.
    pub fn roots(&self) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.nodes().filter(|(_, node)| node.is_root())
    }

    /// Designated terminals registered through [`PathGraph::add_leaf`].
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.leaves
            .iter()
            .filter_map(|id| self.node(*id).map(|node| (*id, node)))
    }

    /// Live nodes without children. Under pruning these include dead ends left behind by
    /// earlier rows, which are valid path terminals.
    pub fn terminals(&self) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.nodes().filter(|(_, node)| node.is_leaf())
    }

    pub fn parents(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.node(id)
            .map(|node| node.parents().as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.node(*id).map(|node| (*id, node)))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &PathNode)> + '_ {
        self.node(id)
            .map(|node| node.children().as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.node(*id).map(|node| (*id, node)))
    }

    /// Start a path at `(x, y)` on the first interior row or column through a diagonal step.
    /// The node is seeded with the all-gap alignment of the preceding prefix followed by the
    /// symbol pair at `(x, y)`.
    pub fn add_root(&mut self, x: usize, y: usize) {
        debug_assert!(x >= 1 && y >= 1 && (x == 1 || y == 1));
        let (s1, s2) = (self.seq1[y - 1], self.seq2[x - 1]);

        if self.retention == Retention::Retain && (x > 1 || y > 1) {
            // Materialize the padding chain and step diagonally off its end
            self.add_node(x, y, x - 1, y - 1, s1, s2);
            return;
        }

        let mut fragment = self.padding(x - 1, y - 1);
        fragment.push(s1, s2);

        let id = self.resolve(Coordinate::new(x, y));
        self.get_mut(id).add_fragment(fragment);
    }

    /// Extend every fragment stored at the parent by `(s1, s2)` and store the results at
    /// `(x, y)`, linking both nodes. Pass [`GAP`] for the sequence that does not advance.
    ///
    /// # Panics
    ///
    /// If the interior parent cell has no node. This happens only when cells are not reported in
    /// row-major order, which is a bug in the driving recurrence.
    pub fn add_node(&mut self, x: usize, y: usize, px: usize, py: usize, s1: u8, s2: u8) {
        let (node, parent) = (Coordinate::new(x, y), Coordinate::new(px, py));

        match self.index.get(&parent).copied() {
            Some(parent) => {
                self.link(node, parent, s1, s2);
            }
            None if parent.is_boundary() => match self.retention {
                Retention::Retain if parent != Coordinate::default() => {
                    let parent = self.boundary(parent);
                    self.link(node, parent, s1, s2);
                }
                _ => {
                    // Fold the unique all-gap prefix into the node, making it a path start
                    let mut fragment = self.padding(px, py);
                    fragment.push(s1, s2);

                    let id = self.resolve(node);
                    self.get_mut(id).add_fragment(fragment);
                }
            },
            None => unreachable!(
                "Parent {parent} of {node} is missing: cells must be reported in row-major order"
            ),
        }

        if self.retention == Retention::Prune {
            self.prune_diagonal(node);
        }
    }

    /// Register `(x, y)` as a designated terminal if it is present in the graph.
    pub fn add_leaf(&mut self, x: usize, y: usize) {
        if let Some(id) = self.index.get(&Coordinate::new(x, y)).copied() {
            if !self.leaves.contains(&id) {
                self.leaves.push(id);
            }
        }
    }

    fn link(&mut self, node: Coordinate, parent: NodeId, s1: u8, s2: u8) -> NodeId {
        let child = self.resolve(node);

        let extended: Vec<FragmentPair> = self
            .get(parent)
            .fragments()
            .iter()
            .map(|x| x.extended(s1, s2))
            .collect();

        let target = self.get_mut(child);
        for fragment in extended {
            target.add_fragment(fragment);
        }
        target.add_parent(parent);
        self.get_mut(parent).add_child(child);
        child
    }

    fn prune_diagonal(&mut self, node: Coordinate) {
        let Some(diagonal) = node.diagonal() else {
            return;
        };
        let Some(id) = self.index.get(&diagonal).copied() else {
            return;
        };
        if self.get(id).is_leaf() || self.leaves.contains(&id) {
            return;
        }

        self.index.remove(&diagonal);
        self.arena[id.index()] = None;
        self.stats.pruned += 1;
    }

    // Explicit padding nodes from the origin to the boundary coordinate (retention mode only)
    fn boundary(&mut self, coordinate: Coordinate) -> NodeId {
        debug_assert!(coordinate.is_boundary() && coordinate != Coordinate::default());

        let steps = coordinate.x.max(coordinate.y);
        let mut previous: Option<NodeId> = None;
        for step in 1..=steps {
            let (current, s1, s2) = if coordinate.x == 0 {
                (Coordinate::new(0, step), self.seq1[step - 1], GAP)
            } else {
                (Coordinate::new(step, 0), GAP, self.seq2[step - 1])
            };

            if let Some(id) = self.index.get(&current).copied() {
                previous = Some(id);
                continue;
            }

            previous = Some(match previous {
                Some(parent) => self.link(current, parent, s1, s2),
                None => {
                    let id = self.resolve(current);
                    self.get_mut(id).add_fragment(FragmentPair::padding(&[], &[]).extended(s1, s2));
                    id
                }
            });
        }

        match previous {
            Some(id) => id,
            None => unreachable!("Boundary coordinate {coordinate} has no padding steps"),
        }
    }

    // All-gap alignment ending at a boundary coordinate
    fn padding(&self, x: usize, y: usize) -> FragmentPair {
        debug_assert!(x == 0 || y == 0);
        FragmentPair::padding(&self.seq1[..y], &self.seq2[..x])
    }

    fn resolve(&mut self, coordinate: Coordinate) -> NodeId {
        if let Some(id) = self.index.get(&coordinate) {
            return *id;
        }

        let id = NodeId::from(self.arena.len());
        self.arena.push(Some(PathNode::new(coordinate)));
        self.index.insert(coordinate, id);

        self.stats.created += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.stats.live());
        id
    }

    fn get(&self, id: NodeId) -> &PathNode {
        match self.arena[id.index()].as_ref() {
            Some(node) => node,
            None => unreachable!("Node {id} was pruned while still referenced"),
        }
    }

    fn get_mut(&mut self, id: NodeId) -> &mut PathNode {
        match self.arena[id.index()].as_mut() {
            Some(node) => node,
            None => unreachable!("Node {id} was pruned while still referenced"),
        }
    }
}

impl<S: Score> Tracer for PathGraph<S> {
    type Score = S;

    fn fill_start(&mut self, rows: usize, cols: usize) {
        debug_assert_eq!((rows, cols), (self.seq2.len() + 1, self.seq1.len() + 1));
    }

    fn fill_end(&mut self, rows: usize, cols: usize) {
        self.add_leaf(rows - 1, cols - 1);
    }

    fn cell(&mut self, row: usize, col: usize, _: S, branches: Branches) {
        let (s1, s2) = (self.seq1[col - 1], self.seq2[row - 1]);

        if branches.contains(Branches::DIAGONAL) {
            if row == 1 || col == 1 {
                self.add_root(row, col);
            } else {
                self.add_node(row, col, row - 1, col - 1, s1, s2);
            }
        }
        if branches.contains(Branches::HORIZONTAL) {
            self.add_node(row, col, row, col - 1, s1, GAP);
        }
        if branches.contains(Branches::VERTICAL) {
            self.add_node(row, col, row - 1, col, GAP, s2);
        }
    }
}
