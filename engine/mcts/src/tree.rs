//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! The tree is built for one decision and dropped afterwards.

use games_connect4::{Board, Side};
use rand::Rng;

use crate::node::{MctsNode, NodeId};

/// UCT tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree rooted at `board`.
    pub fn new(board: Board) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(board)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child of `node_id` with the highest UCT score.
    /// Ties go to the earliest expanded child.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<(u8, NodeId)> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per child
        let parent_visits_ln = (node.visit_count as f64).ln();

        let mut best: Option<((u8, NodeId), f64)> = None;
        for &(column, id) in &node.children {
            let score = self.get(id).uct_score(parent_visits_ln, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some(((column, id), score)),
            }
        }

        best.map(|(child, _)| child)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, column: u8, board: Board, mover: Side) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, column, board, mover));

        let parent = self.get_mut(parent_id);
        parent.children.push((column, child_id));
        parent.untried.retain(|&c| c != column);

        child_id
    }

    /// Expand one random untried column of `node_id`.
    ///
    /// Returns `None` when the node has no playable untried column.
    pub fn expand<R: Rng + ?Sized>(&mut self, node_id: NodeId, rng: &mut R) -> Option<NodeId> {
        let node = self.get_mut(node_id);
        if node.is_fully_expanded() {
            return None;
        }

        let column = node.untried[rng.gen_range(0..node.untried.len())];
        let mover = node.board.side_to_move();
        let board = node.board.with_move(column as usize).ok()?;

        Some(self.add_child(node_id, column, board, mover))
    }

    /// Backpropagate a rollout sum from a leaf to the root.
    ///
    /// `reward` is side-B relative. It is first oriented to the leaf's mover,
    /// then negated at each level so every node accumulates value from the
    /// point of view of the side that moved into it.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;
        let mut delta = match self.get(leaf_id).mover {
            Side::B => reward,
            Side::A => -reward,
        };

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.value_sum += delta;

            // Negate for opponent's perspective
            delta = -delta;

            current_id = node.parent;
        }
    }

    /// Best root child by UCT, as used for the final decision.
    /// Returns None if the root has no children.
    pub fn best_action(&self, exploration: f64) -> Option<(u8, NodeId)> {
        self.select_child(self.root, exploration)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}
