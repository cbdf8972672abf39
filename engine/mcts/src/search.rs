//! UCT search implementation.
//!
//! Implements the core loop:
//! 1. Selection: descend with UCT until a node still has an untried legal column
//! 2. Expansion: add one random untried column as a new child
//! 3. Simulation: run parallel random rollouts from the new child
//! 4. Backpropagation: add the oriented rollout sum along the path to the root

use std::time::Instant;

use games_connect4::{Board, BoardError};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::rollout_parallel;
use crate::tree::MctsTree;

/// Errors that can occur during Monte Carlo search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("No legal moves available")]
    NoLegalMove,

    #[error("Rollout ended on a position that is not terminal")]
    NotTerminal,

    #[error("Search finished without expanding the root")]
    EmptyTree,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Visit statistics of one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub column: u8,
    pub visits: u32,
    /// Mean value from the point of view of the side to move at the root
    pub value: f64,
}

/// Result of a tree search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Column to play
    pub column: u8,

    /// Mean value of the chosen child
    pub value: f64,

    /// Iterations actually performed (equals the root visit count)
    pub iterations: u32,

    /// Per-child statistics in expansion order
    pub children: Vec<SearchStats>,
}

/// UCT search state for a single decision.
pub struct MctsSearch {
    tree: MctsTree,
    config: MctsConfig,
}

impl MctsSearch {
    /// Create a new search rooted at `board`.
    pub fn new(board: &Board, config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;

        if board.is_terminal() || board.legal_moves_mask() == 0 {
            return Err(SearchError::NoLegalMove);
        }

        Ok(Self {
            tree: MctsTree::new(*board),
            config,
        })
    }

    /// Run the search for the configured number of iterations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let mut iterations = 0u32;

        while iterations < self.config.iterations {
            if let Some(limit) = self.config.time_limit {
                if iterations > 0 && start.elapsed() >= limit {
                    debug!(iterations, "MCTS time limit reached");
                    break;
                }
            }

            self.iterate(rng)?;
            iterations += 1;
        }

        let (column, child_id) = self
            .tree
            .best_action(self.config.exploration)
            .ok_or(SearchError::EmptyTree)?;

        let root = self.tree.get(self.tree.root());
        let children = root
            .children
            .iter()
            .map(|&(column, id)| {
                let child = self.tree.get(id);
                SearchStats {
                    column,
                    visits: child.visit_count,
                    value: child.mean_value(),
                }
            })
            .collect();

        let stats = self.tree.stats();
        debug!(
            column,
            iterations,
            nodes = stats.total_nodes,
            depth = stats.max_depth,
            "MCTS search complete"
        );

        Ok(SearchResult {
            column,
            value: self.tree.get(child_id).mean_value(),
            iterations,
            children,
        })
    }

    /// Run a single iteration (select/expand -> simulate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let leaf_id = self.select(rng);
        let board = self.tree.get(leaf_id).board;

        let tally = rollout_parallel(
            &board,
            self.config.simulations,
            self.config.rollout_threads,
            rng,
        )?;

        self.tree.backpropagate(leaf_id, tally.score as f64);

        trace!(
            leaf = leaf_id.0,
            column = self.tree.get(leaf_id).column,
            score = tally.score,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root and return the node to simulate from.
    ///
    /// Stops at the first node that can still be expanded (returning the new
    /// child) or at a terminal node.
    fn select(&mut self, rng: &mut ChaCha20Rng) -> NodeId {
        let mut current = self.tree.root();

        loop {
            if self.tree.get(current).is_terminal() {
                return current;
            }

            if let Some(child) = self.tree.expand(current, rng) {
                return child;
            }

            match self.tree.select_child(current, self.config.exploration) {
                Some((_, child_id)) => current = child_id,
                None => return current,
            }
        }
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run a single search.
pub fn run_mcts(
    board: &Board,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(board, config)?;
    search.run(rng)
}
