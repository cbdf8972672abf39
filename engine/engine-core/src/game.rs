//! Whole games between two strategies.

use games_connect4::{Board, Outcome, Side};
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::error::EngineError;
use crate::strategy::{choose_move, Strategy};

/// A finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Columns in the order they were played
    pub moves: Vec<u8>,
    pub outcome: Outcome,
    pub final_board: Board,
}

impl GameRecord {
    /// Move list in the `from_moves` notation, e.g. `"3342"`.
    pub fn move_string(&self) -> String {
        self.moves.iter().map(|c| char::from(b'0' + c)).collect()
    }
}

/// Play `board` out with `first` moving for side A and `second` for side B.
pub fn play_game(
    board: Board,
    first: &Strategy,
    second: &Strategy,
    rng: &mut ChaCha20Rng,
) -> Result<GameRecord, EngineError> {
    let mut board = board;
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let mover = board.side_to_move();
        let strategy = match mover {
            Side::A => first,
            Side::B => second,
        };

        let column = choose_move(&board, strategy, rng)?;
        board.play(column as usize)?;
        trace!(?mover, column, "Played");
        moves.push(column);
    }

    let outcome = board.outcome().ok_or(EngineError::NoLegalMove)?;
    Ok(GameRecord {
        moves,
        outcome,
        final_board: board,
    })
}
