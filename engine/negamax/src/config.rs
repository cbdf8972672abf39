//! Negamax configuration parameters.

use std::time::Duration;

use games_connect4::{Board, BOARD_SIZE};

use crate::tt::TranspositionTable;

/// Configuration for alpha-beta negamax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegamaxConfig {
    /// Plies to search. `None` solves to the end of the game.
    pub depth: Option<u32>,

    /// Slots in each transposition table.
    pub table_size: usize,

    /// Answer the first reply from the opening book without searching.
    pub use_opening_book: bool,

    /// Search each root column on its own thread.
    pub threaded: bool,

    /// Wall-clock budget. With a budget set the search deepens one ply at a
    /// time and answers with the deepest iteration that finished.
    pub time_limit: Option<Duration>,

    /// Node budget, counted over the whole search. Threads check it against
    /// their own count plus the nodes of earlier iterations.
    pub max_nodes: Option<u64>,
}

impl Default for NegamaxConfig {
    fn default() -> Self {
        Self {
            depth: Some(6),
            table_size: TranspositionTable::DEFAULT_SIZE,
            use_opening_book: true,
            threaded: false,
            time_limit: None,
            max_nodes: None,
        }
    }
}

impl NegamaxConfig {
    /// Config that searches to a fixed depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Config that searches to the end of the game.
    pub fn full_depth(mut self) -> Self {
        self.depth = None;
        self
    }

    pub fn with_table_size(mut self, size: usize) -> Self {
        self.table_size = size;
        self
    }

    pub fn with_opening_book(mut self, enabled: bool) -> Self {
        self.use_opening_book = enabled;
        self
    }

    pub fn with_threaded(mut self, threaded: bool) -> Self {
        self.threaded = threaded;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Whether either budget is set.
    pub fn is_budgeted(&self) -> bool {
        self.time_limit.is_some() || self.max_nodes.is_some()
    }

    /// Effective depth for `board`, never beyond the remaining plies.
    pub fn search_depth(&self, board: &Board) -> u32 {
        let remaining = (BOARD_SIZE - board.move_count()) as u32;
        self.depth.map_or(remaining, |d| d.min(remaining))
    }
}
