//! Monte Carlo move selection for Connect 4.
//!
//! This crate provides two rollout-based engines over the bitboard
//! [`games_connect4::Board`]:
//!
//! - [`MonteCarloEngine`]: flat Monte Carlo. Every legal column is scored by
//!   the sum of random playouts from the position after it.
//! - [`MctsSearch`]: Monte Carlo Tree Search with the UCT selection rule,
//!   delegating each leaf evaluation to a batch of parallel rollouts.
//!
//! # Overview
//!
//! Each tree search iteration consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCT to balance exploration and
//!    exploitation
//! 2. **Expansion**: When a node still has an untried legal column, add one
//!    child for a random untried column
//! 3. **Simulation**: Play `simulations` random games from the new child,
//!    split across `rollout_threads` scoped workers
//! 4. **Backpropagation**: Update visit counts and value sums along the path
//!    from the new child to the root, flipping sign at each level
//!
//! # Usage
//!
//! ```rust,no_run
//! use games_connect4::Board;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::from_moves("3342").unwrap();
//! let config = MctsConfig::default().with_iterations(500);
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&board, config, &mut rng).unwrap();
//!
//! println!("Best column: {}", result.column);
//! println!("Iterations: {}", result.iterations);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Tree iterations per search (default: 1000)
//! - `simulations`: Rollouts per expanded node (default: 100)
//! - `exploration`: UCT constant C (default: 1.0)
//! - `rollout_threads`: Workers per rollout batch (default: 8)
//! - `time_limit`: Optional wall-clock budget
//!
//! # Architecture
//!
//! ```text
//! +-----------------------------------------------------------+
//! |                        MctsSearch                         |
//! |  +-------------+   +-----------------+   +-------------+  |
//! |  |  MctsTree   |   |     Board       |   |   rollout   |  |
//! |  |  (arena)    |   | (copy per node) |   | (scoped thr)|  |
//! |  +------+------+   +--------+--------+   +------+------+  |
//! |         |                   |                   |         |
//! |         v                   v                   v         |
//! |   select -> expand -> simulate -> backpropagate           |
//! +-----------------------------------------------------------+
//! ```

pub mod config;
pub mod flat;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use flat::{ColumnScore, MonteCarloEngine, MonteCarloResult};
pub use node::{MctsNode, NodeId};
pub use rollout::{rollout_parallel, rollout_serial, simulate_random_play, RolloutTally};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{MctsTree, TreeStats};
