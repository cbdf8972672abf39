//! Opening book for the first reply.

use games_connect4::Board;

/// Centre column.
const CENTER: usize = 3;

/// Column next to the centre, played when the centre opens.
const FLANK: usize = 2;

/// Book reply for the second ply; `None` at any other point of the game.
///
/// Takes the centre, or its left neighbour if the opponent already opened
/// there.
pub fn get_best_move_early_game(board: &Board) -> Option<usize> {
    if board.move_count() != 1 {
        return None;
    }

    let opener = board.side_to_move().opponent().piece();
    if board.get_piece(CENTER, 0) == opener {
        Some(FLANK)
    } else {
        Some(CENTER)
    }
}
