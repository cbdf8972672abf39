//! Connect 4 board shared by the move engines
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! # Board Layout
//!
//! Each side owns one bitboard. Bit `column + row * 7` is set when that side
//! has a disc in the cell, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Side A always moves on even ply counts. The automated player is side B, so
//! rollout rewards are expressed from B's point of view.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::{Board, Side};
//!
//! let mut board = Board::new();
//! board.play(3).unwrap();
//! assert_eq!(board.side_to_move(), Side::B);
//! assert!(board.is_valid_move(3));
//! ```

use std::fmt;

use thiserror::Error;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Every cell of the grid.
pub const FULL_MASK: u64 = (1u64 << BOARD_SIZE) - 1;

/// Direction vectors: horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Errors raised by board operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid move: column {column} is full or out of range")]
    InvalidMove { column: usize },

    #[error("Cell ({column}, {row}) is outside the board")]
    OutOfBounds { column: usize, row: usize },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First mover
    A,
    /// Second mover (the automated player)
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn piece(self) -> Piece {
        match self {
            Side::A => Piece::SideA,
            Side::B => Piece::SideB,
        }
    }
}

/// Occupant of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    SideA,
    SideB,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    /// Score from side B's point of view: +1 B wins, -1 A wins, 0 draw.
    pub fn reward(self) -> i32 {
        match self {
            Outcome::Win(Side::B) => 1,
            Outcome::Win(Side::A) => -1,
            Outcome::Draw => 0,
        }
    }
}

/// Two stacked bitboards plus a ply counter.
///
/// `Board` is `Copy`; search code branches by copying the value before each
/// hypothetical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    occupant_a: u64,
    occupant_b: u64,
    move_count: u8,
}

impl Board {
    /// Create an empty board with side A to move.
    pub const fn new() -> Self {
        Self {
            occupant_a: 0,
            occupant_b: 0,
            move_count: 0,
        }
    }

    /// Convert column and row to bit index
    #[inline]
    pub const fn index(column: usize, row: usize) -> usize {
        column + row * COLS
    }

    #[inline]
    const fn bit(column: usize, row: usize) -> u64 {
        1u64 << Self::index(column, row)
    }

    /// Build a board from raw bitboards, e.g. a vision snapshot.
    ///
    /// The move counter is derived from the piece counts and the result must
    /// satisfy [`Board::is_valid`].
    pub fn from_bitboards(occupant_a: u64, occupant_b: u64) -> Result<Self, BoardError> {
        if (occupant_a | occupant_b) & !FULL_MASK != 0 {
            return Err(BoardError::InvalidPosition(
                "bits set outside the 7x6 grid".to_string(),
            ));
        }

        let board = Self {
            occupant_a,
            occupant_b,
            move_count: (occupant_a.count_ones() + occupant_b.count_ones()) as u8,
        };

        if !board.is_valid() {
            return Err(BoardError::InvalidPosition(format!(
                "a={:#x} b={:#x} breaks gravity, overlaps or turn order",
                occupant_a, occupant_b
            )));
        }

        Ok(board)
    }

    /// Build a board by replaying a sequence of column digits, e.g. `"3342"`.
    pub fn from_moves(moves: &str) -> Result<Self, BoardError> {
        let mut board = Board::new();

        for ch in moves.chars().filter(|c| !c.is_whitespace()) {
            let column = ch
                .to_digit(10)
                .map(|d| d as usize)
                .filter(|&d| d < COLS)
                .ok_or_else(|| BoardError::Parse(format!("invalid column '{}'", ch)))?;

            if board.is_terminal() {
                return Err(BoardError::Parse(format!(
                    "move {} played after the game ended",
                    board.move_count + 1
                )));
            }

            board.play(column)?;
        }

        Ok(board)
    }

    /// Parse the grid produced by the `Display` impl (top row first).
    ///
    /// `X` marks side A, `O` side B and `.` an empty cell. Lines containing
    /// anything else (such as the turn indicator) are ignored.
    pub fn from_grid(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|cells| {
                !cells.is_empty()
                    && cells
                        .iter()
                        .all(|c| matches!(c, 'X' | 'x' | 'O' | 'o' | '.'))
            })
            .collect();

        if rows.len() != ROWS {
            return Err(BoardError::Parse(format!(
                "expected {} grid rows, found {}",
                ROWS,
                rows.len()
            )));
        }

        let mut occupant_a = 0u64;
        let mut occupant_b = 0u64;

        for (i, cells) in rows.iter().enumerate() {
            if cells.len() != COLS {
                return Err(BoardError::Parse(format!(
                    "grid row {} has {} cells, expected {}",
                    i,
                    cells.len(),
                    COLS
                )));
            }

            let row = ROWS - 1 - i;
            for (column, cell) in cells.iter().enumerate() {
                match cell {
                    'X' | 'x' => occupant_a |= Self::bit(column, row),
                    'O' | 'o' => occupant_b |= Self::bit(column, row),
                    _ => {}
                }
            }
        }

        Self::from_bitboards(occupant_a, occupant_b)
    }

    /// Drop a piece for the side to move into `column`.
    ///
    /// Fails with [`BoardError::InvalidMove`] when the column is full or out
    /// of range; the board is left untouched in that case.
    pub fn play(&mut self, column: usize) -> Result<(), BoardError> {
        if column >= COLS {
            return Err(BoardError::InvalidMove { column });
        }

        let occupied = self.occupied();
        for row in 0..ROWS {
            let bit = Self::bit(column, row);
            if occupied & bit == 0 {
                match self.side_to_move() {
                    Side::A => self.occupant_a |= bit,
                    Side::B => self.occupant_b |= bit,
                }
                self.move_count += 1;
                return Ok(());
            }
        }

        Err(BoardError::InvalidMove { column })
    }

    /// Copy of the board with `column` played.
    pub fn with_move(&self, column: usize) -> Result<Board, BoardError> {
        let mut next = *self;
        next.play(column)?;
        Ok(next)
    }

    /// A column is playable when it exists and its top cell is empty.
    #[inline]
    pub fn is_valid_move(&self, column: usize) -> bool {
        column < COLS && self.occupied() & Self::bit(column, ROWS - 1) == 0
    }

    /// Bit-mask of playable columns (bit i = column i).
    pub fn legal_moves_mask(&self) -> u8 {
        (0..COLS).fold(0u8, |mask, column| {
            if self.is_valid_move(column) {
                mask | (1u8 << column)
            } else {
                mask
            }
        })
    }

    /// Playable columns in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&c| self.is_valid_move(c)).collect()
    }

    /// Game over by a four-in-a-row for either side or a full board.
    ///
    /// Wins are checked before the draw, so a full board that also contains
    /// a four is reported as a win by [`Board::outcome`].
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// The side owning a four-in-a-row, if any.
    pub fn winner(&self) -> Option<Side> {
        if Self::has_four(self.occupant_a) {
            Some(Side::A)
        } else if Self::has_four(self.occupant_b) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(side) => Some(Outcome::Win(side)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Exhaustive four-in-a-row scan over every starting cell.
    ///
    /// This is the authoritative check used for terminal decisions.
    pub fn check_win(bitboard: u64) -> bool {
        let cell = |column: i32, row: i32| bitboard & Self::bit(column as usize, row as usize) != 0;

        for (dc, dr) in DIRECTIONS {
            for column in 0..COLS as i32 {
                for row in 0..ROWS as i32 {
                    let end_column = column + 3 * dc;
                    let end_row = row + 3 * dr;
                    if end_column >= COLS as i32 || end_row < 0 || end_row >= ROWS as i32 {
                        continue;
                    }

                    if (0..4).all(|k| cell(column + k * dc, row + k * dr)) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Shifted-AND win test (shifts 1, 7, 6, 8).
    ///
    /// The grid has no sentinel column, so runs that wrap from the end of one
    /// row into the start of the next are reported as wins. It never misses a
    /// real four, which makes it usable as a pre-filter for [`Board::check_win`]
    /// but not as a verdict on its own.
    pub fn check_win_fast(bitboard: u64) -> bool {
        let m = bitboard & (bitboard >> 7);
        if m & (m >> 14) != 0 {
            return true;
        }

        let m = bitboard & (bitboard >> 6);
        if m & (m >> 12) != 0 {
            return true;
        }

        let m = bitboard & (bitboard >> 8);
        if m & (m >> 16) != 0 {
            return true;
        }

        let m = bitboard & (bitboard >> 1);
        m & (m >> 2) != 0
    }

    /// Fast check first, confirmed by the exhaustive scan.
    #[inline]
    pub fn has_four(bitboard: u64) -> bool {
        Self::check_win_fast(bitboard) && Self::check_win(bitboard)
    }

    /// Whether dropping into `column` completes a four for the side to move.
    pub fn move_is_winning(&self, column: usize) -> Result<bool, BoardError> {
        let mover = self.side_to_move();
        let next = self.with_move(column)?;
        Ok(Self::check_win(next.bitboard(mover)))
    }

    /// Occupant of a cell. Cells outside the grid are empty.
    pub fn get_piece(&self, column: usize, row: usize) -> Piece {
        if column >= COLS || row >= ROWS {
            return Piece::Empty;
        }

        let bit = Self::bit(column, row);
        if self.occupant_a & bit != 0 {
            Piece::SideA
        } else if self.occupant_b & bit != 0 {
            Piece::SideB
        } else {
            Piece::Empty
        }
    }

    /// Overwrite a single cell. Used when transcribing a detected grid.
    ///
    /// The move counter follows the piece count; call [`Board::is_valid`]
    /// once the whole grid is in place.
    pub fn set_piece(&mut self, column: usize, row: usize, piece: Piece) -> Result<(), BoardError> {
        if column >= COLS || row >= ROWS {
            return Err(BoardError::OutOfBounds { column, row });
        }

        let bit = Self::bit(column, row);
        self.occupant_a &= !bit;
        self.occupant_b &= !bit;
        match piece {
            Piece::SideA => self.occupant_a |= bit,
            Piece::SideB => self.occupant_b |= bit,
            Piece::Empty => {}
        }
        self.move_count = (self.occupant_a.count_ones() + self.occupant_b.count_ones()) as u8;
        Ok(())
    }

    /// Structural sanity check: disjoint bitboards, no floating pieces,
    /// consistent move counter and piece counts that alternate starting with A.
    pub fn is_valid(&self) -> bool {
        let occupied = self.occupied();
        if self.occupant_a & self.occupant_b != 0 || occupied & !FULL_MASK != 0 {
            return false;
        }

        // Empty cells that have a piece directly above them
        let floating = (occupied >> COLS) & !occupied & FULL_MASK;
        if floating != 0 {
            return false;
        }

        let count_a = self.occupant_a.count_ones();
        let count_b = self.occupant_b.count_ones();
        if count_a < count_b || count_a > count_b + 1 {
            return false;
        }

        self.move_count as u32 == count_a + count_b
    }

    /// Side whose turn it is (A on even ply counts).
    #[inline]
    pub fn side_to_move(&self) -> Side {
        if self.move_count % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }

    #[inline]
    pub fn bitboard(&self, side: Side) -> u64 {
        match side {
            Side::A => self.occupant_a,
            Side::B => self.occupant_b,
        }
    }

    #[inline]
    pub fn occupant_a(&self) -> u64 {
        self.occupant_a
    }

    #[inline]
    pub fn occupant_b(&self) -> u64 {
        self.occupant_b
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupant_a | self.occupant_b
    }

    /// Plies played so far (0-42)
    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count as usize
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, column: usize) -> usize {
        (0..ROWS)
            .take_while(|&row| self.get_piece(column, row) != Piece::Empty)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    pub fn is_full(&self) -> bool {
        self.move_count as usize == BOARD_SIZE
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let line: Vec<&str> = (0..COLS)
                .map(|column| match self.get_piece(column, row) {
                    Piece::SideA => "X",
                    Piece::SideB => "O",
                    Piece::Empty => ".",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }

        match self.side_to_move() {
            Side::A => write!(f, "Side A to move (X)"),
            Side::B => write!(f, "Side B to move (O)"),
        }
    }
}

#[cfg(test)]
mod tests;
