use super::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Build a bitboard from (column, row) cells.
fn cells(list: &[(usize, usize)]) -> u64 {
    list.iter()
        .fold(0u64, |acc, &(column, row)| acc | (1u64 << Board::index(column, row)))
}

#[test]
fn test_initial_state() {
    let board = Board::new();
    assert_eq!(board.occupant_a(), 0);
    assert_eq!(board.occupant_b(), 0);
    assert_eq!(board.move_count(), 0);
    assert_eq!(board.side_to_move(), Side::A);
    assert!(board.is_empty());
    assert!(!board.is_terminal());
    assert!(board.is_valid());
    assert_eq!(board.legal_moves_mask(), 0x7F);
    assert_eq!(board.legal_moves(), (0..COLS).collect::<Vec<_>>());
}

#[test]
fn test_play_stacks_and_alternates() {
    let mut board = Board::new();
    board.play(3).unwrap();
    board.play(3).unwrap();
    board.play(4).unwrap();

    assert_eq!(board.get_piece(3, 0), Piece::SideA);
    assert_eq!(board.get_piece(3, 1), Piece::SideB);
    assert_eq!(board.get_piece(4, 0), Piece::SideA);
    assert_eq!(board.get_piece(4, 1), Piece::Empty);
    assert_eq!(board.column_height(3), 2);
    assert_eq!(board.move_count(), 3);
    assert_eq!(board.side_to_move(), Side::B);
    assert!(board.is_valid());
}

#[test]
fn test_full_column_rejects_play() {
    let mut board = Board::new();
    for _ in 0..ROWS {
        board.play(3).unwrap();
    }

    assert!(!board.is_valid_move(3));
    assert_eq!(board.legal_moves_mask() & (1 << 3), 0);

    let before = board;
    assert_eq!(board.play(3), Err(BoardError::InvalidMove { column: 3 }));
    assert_eq!(board, before);
}

#[test]
fn test_out_of_range_column() {
    let mut board = Board::new();
    assert!(!board.is_valid_move(7));
    assert_eq!(board.play(7), Err(BoardError::InvalidMove { column: 7 }));
    assert!(board.is_empty());
}

#[test]
fn test_check_win_directions() {
    let horizontal = cells(&[(1, 2), (2, 2), (3, 2), (4, 2)]);
    let vertical = cells(&[(6, 0), (6, 1), (6, 2), (6, 3)]);
    let diagonal_up = cells(&[(0, 0), (1, 1), (2, 2), (3, 3)]);
    let diagonal_down = cells(&[(3, 5), (4, 4), (5, 3), (6, 2)]);

    for bitboard in [horizontal, vertical, diagonal_up, diagonal_down] {
        assert!(Board::check_win(bitboard));
        assert!(Board::check_win_fast(bitboard));
        assert!(Board::has_four(bitboard));
    }
}

#[test]
fn test_check_win_rejects_three() {
    assert!(!Board::check_win(0));
    assert!(!Board::check_win(cells(&[(0, 0), (1, 0), (2, 0)])));
    assert!(!Board::check_win(cells(&[(0, 0), (1, 0), (2, 0), (4, 0)])));
    assert!(!Board::check_win(cells(&[(0, 0), (1, 1), (2, 2), (4, 4)])));
}

#[test]
fn test_fast_check_false_positive_on_row_wrap() {
    // Columns 5 and 6 of the bottom row followed by columns 0 and 1 of row 1
    // are consecutive bit indices 5..=8.
    let wrapped = cells(&[(5, 0), (6, 0), (0, 1), (1, 1)]);

    assert!(Board::check_win_fast(wrapped));
    assert!(!Board::check_win(wrapped));
    assert!(!Board::has_four(wrapped));
}

#[test]
fn test_fast_check_never_misses_a_win() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..200 {
        let mut board = Board::new();
        while !board.is_terminal() {
            let column = *board.legal_moves().choose(&mut rng).unwrap();
            board.play(column).unwrap();

            for side in [Side::A, Side::B] {
                let bitboard = board.bitboard(side);
                if Board::check_win(bitboard) {
                    assert!(Board::check_win_fast(bitboard), "missed win:\n{}", board);
                }
            }
        }
    }
}

#[test]
fn test_horizontal_win_by_play() {
    // A: 0,1,2,3 on the bottom row; B stacks on top
    let board = Board::from_moves("0011223").unwrap();
    assert!(board.is_terminal());
    assert_eq!(board.winner(), Some(Side::A));
    assert_eq!(board.outcome(), Some(Outcome::Win(Side::A)));
}

#[test]
fn test_vertical_win_by_play() {
    let board = Board::from_moves("0101010").unwrap();
    assert_eq!(board.winner(), Some(Side::A));
}

#[test]
fn test_diagonal_win_by_play() {
    // A builds (0,0) (1,1) (2,2) (3,3)
    let board = Board::from_moves("0112122333").unwrap();
    assert!(!board.is_terminal());
    let board = board.with_move(3).unwrap();
    assert_eq!(board.winner(), Some(Side::A));
}

#[test]
fn test_side_b_win_reward() {
    // A stacks column 0
    let board = Board::from_moves("0102030").unwrap();
    assert_eq!(board.winner(), Some(Side::A));
    assert_eq!(Outcome::Win(Side::A).reward(), -1);

    // B completes the bottom row from column 1 to 4
    let board = Board::from_moves("61625364").unwrap();
    assert_eq!(board.winner(), Some(Side::B));
    assert_eq!(board.outcome().map(Outcome::reward), Some(1));
    assert_eq!(Outcome::Draw.reward(), 0);
}

#[test]
fn test_draw_board() {
    let grid = "\
O X O X O X O
X O X O X O X
O X O X O X O
O X O X O X O
X O X O X O X
X O X O X O X
";
    let board = Board::from_grid(grid).unwrap();

    assert!(board.is_full());
    assert!(board.is_terminal());
    assert_eq!(board.winner(), None);
    assert_eq!(board.outcome(), Some(Outcome::Draw));
    assert_eq!(board.legal_moves_mask(), 0);
}

#[test]
fn test_move_is_winning() {
    // A holds columns 0-2 on the bottom row, B sits on top of them
    let board = Board::from_moves("001122").unwrap();
    assert_eq!(board.side_to_move(), Side::A);

    assert_eq!(board.move_is_winning(3), Ok(true));
    assert_eq!(board.move_is_winning(4), Ok(false));
    assert_eq!(board.move_is_winning(9), Err(BoardError::InvalidMove { column: 9 }));

    // The check must not mutate the board
    assert_eq!(board.move_count(), 6);
}

#[test]
fn test_is_valid_rejects_floating_piece() {
    let mut board = Board::new();
    board.set_piece(2, 3, Piece::SideA).unwrap();
    assert!(!board.is_valid());

    board.set_piece(2, 0, Piece::SideB).unwrap();
    board.set_piece(2, 1, Piece::SideA).unwrap();
    board.set_piece(2, 2, Piece::SideB).unwrap();
    assert!(board.is_valid());
    assert_eq!(board.move_count(), 4);
}

#[test]
fn test_is_valid_rejects_bad_counts() {
    let mut board = Board::new();
    board.set_piece(0, 0, Piece::SideB).unwrap();
    assert!(!board.is_valid());

    board.set_piece(0, 0, Piece::SideA).unwrap();
    assert!(board.is_valid());

    board.set_piece(1, 0, Piece::SideA).unwrap();
    assert!(!board.is_valid());
}

#[test]
fn test_set_piece_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(
        board.set_piece(0, 6, Piece::SideA),
        Err(BoardError::OutOfBounds { column: 0, row: 6 })
    );
    assert_eq!(board.get_piece(0, 6), Piece::Empty);
    assert_eq!(board.get_piece(7, 0), Piece::Empty);
}

#[test]
fn test_from_bitboards() {
    let board = Board::from_bitboards(cells(&[(3, 0)]), cells(&[(3, 1)])).unwrap();
    assert_eq!(board, Board::from_moves("33").unwrap());

    assert!(Board::from_bitboards(1, 1).is_err());
    assert!(Board::from_bitboards(1u64 << 42, 0).is_err());
    assert!(Board::from_bitboards(cells(&[(0, 1)]), 0).is_err());
}

#[test]
fn test_from_moves_rejects_garbage() {
    assert!(matches!(Board::from_moves("38"), Err(BoardError::Parse(_))));
    assert!(matches!(Board::from_moves("3a"), Err(BoardError::Parse(_))));
    assert_eq!(
        Board::from_moves("0000000"),
        Err(BoardError::InvalidMove { column: 0 })
    );
    // Game already decided after the seventh move
    assert!(matches!(Board::from_moves("01010101"), Err(BoardError::Parse(_))));
}

#[test]
fn test_display_round_trip() {
    let board = Board::from_moves("3342215").unwrap();
    let text = board.to_string();

    assert!(text.ends_with("Side B to move (O)"));
    assert_eq!(text.lines().count(), ROWS + 1);
    assert_eq!(Board::from_grid(&text).unwrap(), board);
}

#[test]
fn test_from_grid_wrong_shape() {
    assert!(matches!(Board::from_grid(". . ."), Err(BoardError::Parse(_))));

    let short_row = "\
. . . . . . .
. . . . . . .
. . . . . . .
. . . . . . .
. . . . . . .
. . . X . .
";
    assert!(matches!(Board::from_grid(short_row), Err(BoardError::Parse(_))));
}

#[test]
fn test_random_games_stay_valid() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for _ in 0..100 {
        let mut board = Board::new();
        while !board.is_terminal() {
            assert!(board.is_valid());
            let column = *board.legal_moves().choose(&mut rng).unwrap();
            board.play(column).unwrap();
        }

        assert!(board.is_valid());
        assert!(board.winner().is_some() || board.is_full());
        assert!(board.move_count() <= BOARD_SIZE);
    }
}
