//! Board rules - the Kalaha game state and move application
//!
//! The board is 14 seed counts in a flat fixed array for cheap cloning:
//! player 1's pits 1-6, player 1's store, player 2's pits 1-6, player 2's
//! store. The player to move next is carried alongside the counts.
//!
//! A [`Board`] is only ever constructed from the serialized line the server
//! sends in reply to `BOARD`; the search then clones it freely and applies
//! hypothetical moves to the clones. Rules implemented by [`Board::make_move`]:
//!
//! - **Sowing**: seeds from the chosen pit are dropped one-by-one
//!   counterclockwise; the opponent's store is always skipped.
//! - **Extra turn**: a last seed landing in the mover's own store keeps the
//!   turn with the mover.
//! - **Capture**: a last seed landing in one of the mover's own empty pits
//!   captures it together with the opposite pit's seeds, when the opposite
//!   pit is non-empty.
//! - **End sweep**: once either player's pits are all empty, the remaining
//!   pit seeds move to their owner's store and the game is over.
//!
//! Every legal move conserves the total seed count; `tests/board_tests.rs`
//! checks this, the board code itself trusts it.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Player, BOARD_SLOTS, PITS_PER_PLAYER};

/// Number of `;`-separated fields in a serialized board line:
/// 14 seed counts followed by the player to move.
pub const BOARD_LINE_FIELDS: usize = BOARD_SLOTS + 1;

/// Failure to parse a serialized board line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {BOARD_LINE_FIELDS} fields in board line, got {0}")]
    FieldCount(usize),
    #[error("invalid seed count {0:?} in board line")]
    SeedCount(String),
    #[error("invalid player id {0:?} in board line")]
    PlayerId(String),
}

/// Complete Kalaha position: all 14 seed counts plus the player to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array: p1 pits 1-6, p1 store, p2 pits 1-6, p2 store.
    slots: [u16; BOARD_SLOTS],
    next_player: Player,
}

/// Index of player 1's store in the flat array.
const STORE_ONE: usize = PITS_PER_PLAYER;
/// Index of player 2's store in the flat array.
const STORE_TWO: usize = BOARD_SLOTS - 1;

impl Board {
    /// Parse the server's serialized board line.
    ///
    /// Format: 15 `;`-separated fields - player 1's pits 1-6, player 1's
    /// store, player 2's pits 1-6, player 2's store, then the player to
    /// move (`1` or `2`).
    pub fn parse(line: &str) -> Result<Board, BoardError> {
        let fields: Vec<&str> = line.trim().split(';').collect();
        if fields.len() != BOARD_LINE_FIELDS {
            return Err(BoardError::FieldCount(fields.len()));
        }

        let mut slots = [0u16; BOARD_SLOTS];
        for (slot, field) in slots.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse()
                .map_err(|_| BoardError::SeedCount(field.to_string()))?;
        }

        let next_player = Player::from_str(fields[BOARD_SLOTS])
            .ok_or_else(|| BoardError::PlayerId(fields[BOARD_SLOTS].to_string()))?;

        Ok(Board { slots, next_player })
    }

    /// The player who moves next on this position.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// Seed count in `player`'s store.
    pub fn score(&self, player: Player) -> u16 {
        self.slots[Self::store_index(player)]
    }

    /// Total seeds across all pits and both stores. Conserved by every
    /// legal move; used by tests and never by the rules themselves.
    pub fn total_seeds(&self) -> u16 {
        self.slots.iter().sum()
    }

    /// Whether the game is over: both players' pits are empty (the end
    /// sweep in [`Board::make_move`] guarantees one side implies the other).
    pub fn game_ended(&self) -> bool {
        self.pits_empty(Player::One) && self.pits_empty(Player::Two)
    }

    /// Whether `ambo` (1-6) is a legal move for the player to move next.
    pub fn move_is_possible(&self, ambo: u8) -> bool {
        (1..=PITS_PER_PLAYER as u8).contains(&ambo)
            && self.slots[Self::pit_index(self.next_player, ambo)] > 0
    }

    /// Legal moves for the player to move next, ascending.
    pub fn legal_moves(&self) -> ArrayVec<u8, PITS_PER_PLAYER> {
        let mut moves = ArrayVec::new();
        for ambo in 1..=PITS_PER_PLAYER as u8 {
            if self.move_is_possible(ambo) {
                moves.push(ambo);
            }
        }
        moves
    }

    /// Apply `ambo` (1-6) for the player to move next, mutating in place:
    /// sowing, capture, extra turn, and the end-of-game sweep.
    ///
    /// Returns `false` (no mutation) when the move is not possible.
    pub fn make_move(&mut self, ambo: u8) -> bool {
        if !self.move_is_possible(ambo) {
            return false;
        }

        let mover = self.next_player;
        let own_store = Self::store_index(mover);
        let skipped_store = Self::store_index(mover.opponent());

        let start = Self::pit_index(mover, ambo);
        let mut seeds = self.slots[start];
        self.slots[start] = 0;

        // Sow counterclockwise, skipping the opponent's store.
        let mut pos = start;
        while seeds > 0 {
            pos = (pos + 1) % BOARD_SLOTS;
            if pos == skipped_store {
                continue;
            }
            self.slots[pos] += 1;
            seeds -= 1;
        }

        if pos == own_store {
            // Extra turn: mover goes again.
        } else {
            // Capture: last seed into an own pit that was empty, with the
            // opposite pit holding seeds.
            if Self::is_own_pit(mover, pos) && self.slots[pos] == 1 {
                let opposite = Self::opposite_pit(pos);
                if self.slots[opposite] > 0 {
                    self.slots[own_store] += self.slots[pos] + self.slots[opposite];
                    self.slots[pos] = 0;
                    self.slots[opposite] = 0;
                }
            }
            self.next_player = mover.opponent();
        }

        // End sweep: an empty side hands the other side's remaining pit
        // seeds to their owner's store.
        if self.pits_empty(Player::One) {
            self.sweep(Player::Two);
        } else if self.pits_empty(Player::Two) {
            self.sweep(Player::One);
        }

        true
    }

    /// Flat index of `player`'s pit `ambo` (1-6).
    fn pit_index(player: Player, ambo: u8) -> usize {
        let offset = ambo as usize - 1;
        match player {
            Player::One => offset,
            Player::Two => STORE_ONE + 1 + offset,
        }
    }

    fn store_index(player: Player) -> usize {
        match player {
            Player::One => STORE_ONE,
            Player::Two => STORE_TWO,
        }
    }

    fn is_own_pit(player: Player, index: usize) -> bool {
        match player {
            Player::One => index < STORE_ONE,
            Player::Two => (STORE_ONE + 1..STORE_TWO).contains(&index),
        }
    }

    /// Pit directly across the board: p1 pit k faces p2 pit 7-k.
    fn opposite_pit(index: usize) -> usize {
        2 * PITS_PER_PLAYER - index
    }

    fn pits_empty(&self, player: Player) -> bool {
        (1..=PITS_PER_PLAYER as u8).all(|ambo| self.slots[Self::pit_index(player, ambo)] == 0)
    }

    /// Move all of `player`'s remaining pit seeds into their store.
    fn sweep(&mut self, player: Player) {
        let store = Self::store_index(player);
        for ambo in 1..=PITS_PER_PLAYER as u8 {
            let pit = Self::pit_index(player, ambo);
            self.slots[store] += self.slots[pit];
            self.slots[pit] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opening position, player 1 to move.
    fn opening() -> Board {
        Board::parse("6;6;6;6;6;6;0;6;6;6;6;6;6;0;1").expect("opening board parses")
    }

    #[test]
    fn test_parse_opening_board() {
        let board = opening();
        assert_eq!(board.next_player(), Player::One);
        assert_eq!(board.score(Player::One), 0);
        assert_eq!(board.score(Player::Two), 0);
        assert_eq!(board.total_seeds(), 72);
        assert!(!board.game_ended());
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert_eq!(
            Board::parse("6;6;6;6;6;6;0;6;6;6;6;6;6;0"),
            Err(BoardError::FieldCount(14))
        );
        assert_eq!(Board::parse(""), Err(BoardError::FieldCount(1)));
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        assert_eq!(
            Board::parse("x;6;6;6;6;6;0;6;6;6;6;6;6;0;1"),
            Err(BoardError::SeedCount("x".to_string()))
        );
        assert_eq!(
            Board::parse("6;6;6;6;6;6;0;6;6;6;6;6;6;0;3"),
            Err(BoardError::PlayerId("3".to_string()))
        );
    }

    #[test]
    fn test_pit_indices_and_opposites() {
        assert_eq!(Board::pit_index(Player::One, 1), 0);
        assert_eq!(Board::pit_index(Player::One, 6), 5);
        assert_eq!(Board::pit_index(Player::Two, 1), 7);
        assert_eq!(Board::pit_index(Player::Two, 6), 12);
        // p1 pit 1 faces p2 pit 6 and vice versa.
        assert_eq!(Board::opposite_pit(0), 12);
        assert_eq!(Board::opposite_pit(12), 0);
        assert_eq!(Board::opposite_pit(5), 7);
    }

    #[test]
    fn test_sowing_reaches_own_store_and_grants_extra_turn() {
        let mut board = opening();
        // Pit 1 holds 6 seeds: they land in pits 2-6 and the store.
        assert!(board.make_move(1));
        assert_eq!(board.score(Player::One), 1);
        assert_eq!(board.next_player(), Player::One, "extra turn expected");
        assert_eq!(board.total_seeds(), 72);
    }

    #[test]
    fn test_sowing_past_store_switches_turn() {
        let mut board = opening();
        // Pit 2 holds 6 seeds: last seed falls into the opponent's pit 1.
        assert!(board.make_move(2));
        assert_eq!(board.score(Player::One), 1);
        assert_eq!(board.next_player(), Player::Two);
    }

    #[test]
    fn test_sowing_skips_opponent_store() {
        // 13 seeds in p1 pit 6 wrap the whole board; the opponent's store
        // must be skipped so the 13th seed returns to the starting pit.
        let mut board = Board::parse("0;0;0;0;0;13;0;1;1;1;1;1;1;0;1").expect("parses");
        assert!(board.make_move(6));
        assert_eq!(board.score(Player::Two), 0, "opponent store must be skipped");
        assert_eq!(board.total_seeds(), 19);
    }

    #[test]
    fn test_capture_takes_opposite_pit() {
        // P1 pit 1 holds 1 seed, pit 2 is empty; sowing lands in pit 2 and
        // captures the 4 seeds in the facing pit (p2 pit 5, index 11).
        let mut board = Board::parse("1;0;2;2;2;2;0;2;2;2;2;4;2;0;1").expect("parses");
        assert!(board.make_move(1));
        assert_eq!(board.score(Player::One), 5);
        assert_eq!(board.next_player(), Player::Two);
        assert_eq!(board.total_seeds(), 23);
    }

    #[test]
    fn test_no_capture_when_opposite_pit_empty() {
        let mut board = Board::parse("1;0;2;2;2;2;0;2;2;2;2;0;2;0;1").expect("parses");
        assert!(board.make_move(1));
        assert_eq!(board.score(Player::One), 0);
        assert_eq!(board.total_seeds(), 19);
    }

    #[test]
    fn test_end_sweep_collects_remaining_seeds() {
        // P1's only seed moves into the store, emptying p1's side; p2's
        // remaining seeds sweep into p2's store and the game ends.
        let mut board = Board::parse("0;0;0;0;0;1;10;3;3;3;3;3;3;10;1").expect("parses");
        assert!(board.make_move(6));
        assert!(board.game_ended());
        assert_eq!(board.score(Player::One), 11);
        assert_eq!(board.score(Player::Two), 28);
        assert_eq!(board.total_seeds(), 39);
    }

    #[test]
    fn test_illegal_move_leaves_board_untouched() {
        let mut board = Board::parse("0;6;6;6;6;6;0;6;6;6;6;6;6;0;1").expect("parses");
        let before = board.clone();
        assert!(!board.move_is_possible(1), "empty pit is not playable");
        assert!(!board.make_move(1));
        assert!(!board.make_move(0));
        assert!(!board.make_move(7));
        assert_eq!(board, before);
    }

    #[test]
    fn test_legal_moves_ascending() {
        let board = Board::parse("0;6;0;6;0;6;0;6;6;6;6;6;6;0;1").expect("parses");
        let moves: Vec<u8> = board.legal_moves().into_iter().collect();
        assert_eq!(moves, vec![2, 4, 6]);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = opening();
        let mut clone = board.clone();
        assert!(clone.make_move(2));
        assert_eq!(board, opening(), "original must not observe clone moves");
    }
}
