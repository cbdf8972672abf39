//! UCT tree node representation.
//!
//! Each node owns the board reached by playing `column` from its parent and
//! the statistics backed up through it. `value_sum` is always from the point
//! of view of `mover`, the side that played into the node.

use games_connect4::{Board, Side, COLS};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Column that led to this node from parent
    pub column: u8,

    /// Position at this node
    pub board: Board,

    /// Side that made the move producing this node
    pub mover: Side,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of rollout results backed up through this node, mover-relative.
    pub value_sum: f64,

    /// Columns not yet expanded into children
    pub untried: Vec<u8>,

    /// Children: Vec of (column, NodeId) pairs.
    pub children: Vec<(u8, NodeId)>,
}

impl MctsNode {
    /// Create a new root node. Every column starts untried.
    pub fn new_root(board: Board) -> Self {
        Self {
            parent: NodeId::NONE,
            column: 0,
            board,
            // Nobody moved into the root; the previous mover is the opponent
            mover: board.side_to_move().opponent(),
            visit_count: 0,
            value_sum: 0.0,
            untried: (0..COLS as u8).collect(),
            children: Vec::new(),
        }
    }

    /// Create a new child node for the position after `column` was played.
    pub fn new_child(parent: NodeId, column: u8, board: Board, mover: Side) -> Self {
        Self {
            parent,
            column,
            board,
            mover,
            visit_count: 0,
            value_sum: 0.0,
            untried: (0..COLS as u8).collect(),
            children: Vec::new(),
        }
    }

    /// Mean value Q/N. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f64
        }
    }

    /// UCT score used by the parent to choose among its children.
    /// UCT = Q/N + C * sqrt(2 * ln(N_parent) / N)
    ///
    /// Unvisited nodes score +inf so each child is tried once before any is
    /// revisited. Takes a pre-computed `ln(N_parent)`.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        self.value_sum / n + exploration * (2.0 * parent_visits_ln / n).sqrt()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// True once no untried column is playable on this node's board.
    ///
    /// Illegal untried columns are pruned as a side effect.
    pub fn is_fully_expanded(&mut self) -> bool {
        let board = self.board;
        self.untried.retain(|&c| board.is_valid_move(c as usize));
        self.untried.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(Board::new());

        assert!(node.parent.is_none());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.untried, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(node.children.is_empty());
        assert_eq!(node.mover, Side::B);
    }

    #[test]
    fn test_mean_value() {
        let mut node = MctsNode::new_root(Board::new());
        assert!(node.mean_value().abs() < 1e-9);

        node.visit_count = 4;
        node.value_sum = 2.0;
        assert!((node.mean_value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_root(Board::new());
        assert_eq!(node.uct_score(1.0, 1.0), f64::INFINITY);

        node.visit_count = 10;
        node.value_sum = 5.0;

        // UCT = 0.5 + 1.0 * sqrt(2 * ln(100) / 10) = 0.5 + 0.9597 = 1.4597
        let ucb = node.uct_score((100f64).ln(), 1.0);
        assert!((ucb - 1.4597).abs() < 1e-3);

        // Pure exploitation
        let greedy = node.uct_score((100f64).ln(), 0.0);
        assert!((greedy - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_is_fully_expanded_prunes_full_columns() {
        let mut board = Board::new();
        for _ in 0..6 {
            board.play(0).unwrap();
        }

        let mut node = MctsNode::new_root(board);
        assert!(!node.is_fully_expanded());
        assert_eq!(node.untried, vec![1, 2, 3, 4, 5, 6]);

        node.untried = vec![0];
        assert!(node.is_fully_expanded());
        assert!(node.untried.is_empty());
    }
}
