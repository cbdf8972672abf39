//! Transposition table for memoizing terminal evaluations.
//!
//! A flat, direct-mapped array of packed `u64` entries. The low 56 bits hold
//! the key and the high 8 bits the stored value; a zero entry is an empty
//! slot. Each key maps to exactly one slot (`key % size`) and a later write
//! silently replaces whatever was there.

use games_connect4::Board;

const KEY_BITS: u32 = 56;
const KEY_MASK: u64 = (1u64 << KEY_BITS) - 1;

/// Fixed-capacity direct-mapped cache from board key to evaluated score.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<u64>,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl TranspositionTable {
    /// Slot count used when none is configured.
    pub const DEFAULT_SIZE: usize = 40_000;

    /// Create a table with `size` slots (at least one).
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![0; size.max(1)],
        }
    }

    /// Key of a position: the bitboard of the side to move.
    ///
    /// Positions that differ only in the opponent's pieces share a key.
    #[inline]
    pub fn get_key(board: &Board) -> u64 {
        board.bitboard(board.side_to_move())
    }

    /// Slot index of a key
    #[inline]
    pub fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Store `value` for `key`, replacing the slot's previous occupant.
    pub fn put(&mut self, key: u64, value: u8) {
        let idx = self.index(key);
        self.entries[idx] = (key & KEY_MASK) | ((value as u64) << KEY_BITS);
    }

    /// Value stored for `key`, if its slot currently holds that key.
    pub fn get(&self, key: u64) -> Option<u8> {
        let entry = self.entries[self.index(key)];
        if entry != 0 && entry & KEY_MASK == key & KEY_MASK {
            Some((entry >> KEY_BITS) as u8)
        } else {
            None
        }
    }

    pub fn contains(&self, key: u64) -> bool {
        self.get(key).is_some()
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        self.entries.fill(0);
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|&&e| e != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let mut table = TranspositionTable::new(101);
        assert!(!table.contains(42));
        assert_eq!(table.get(42), None);

        table.put(42, 17);
        assert!(table.contains(42));
        assert_eq!(table.get(42), Some(17));
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn test_collision_last_write_wins() {
        let mut table = TranspositionTable::new(10);
        assert_eq!(table.index(3), table.index(13));

        table.put(3, 5);
        table.put(13, 9);

        assert_eq!(table.get(13), Some(9));
        assert_eq!(table.get(3), None);
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn test_value_uses_high_byte() {
        let mut table = TranspositionTable::new(7);
        let key = (1u64 << 41) | 0b1011;
        table.put(key, 255);
        assert_eq!(table.get(key), Some(255));

        // A draw value of zero is still distinguishable from an empty slot
        table.put(6, 0);
        assert_eq!(table.get(6), Some(0));
    }

    #[test]
    fn test_clear() {
        let mut table = TranspositionTable::default();
        assert_eq!(table.size(), TranspositionTable::DEFAULT_SIZE);

        table.put(1, 1);
        table.put(2, 2);
        table.clear();
        assert!(!table.contains(1));
        assert_eq!(table.occupied(), 0);
    }

    #[test]
    fn test_key_is_side_to_move_bitboard() {
        let board = Board::from_moves("33").unwrap();
        // A to move: A's single piece at (3, 0)
        assert_eq!(TranspositionTable::get_key(&board), 1 << 3);

        let board = Board::from_moves("334").unwrap();
        // B to move: B's single piece at (3, 1)
        assert_eq!(TranspositionTable::get_key(&board), 1 << 10);
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let mut table = TranspositionTable::new(0);
        assert_eq!(table.size(), 1);
        table.put(99, 3);
        assert_eq!(table.get(99), Some(3));
    }
}
