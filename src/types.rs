//! Shared types and constants
//!
//! Pure data structures used throughout the agent: player identities, game
//! outcomes, and board dimensions. No I/O and no external dependencies, so
//! they are usable from the board rules, the search, and the protocol client
//! alike.
//!
//! # Board Dimensions
//!
//! Standard Kalaha board:
//!
//! - **Pits per player**: 6 (called "ambos", numbered 1-6 away from the store)
//! - **Stores**: 1 per player
//! - **Starting seeds**: 6 per pit, 72 on the board in total

/// Number of seed-holding pits (ambos) per player.
pub const PITS_PER_PLAYER: usize = 6;

/// Seeds in each pit at the start of a game.
pub const STARTING_SEEDS: u16 = 6;

/// Total number of seed locations: both players' pits plus both stores.
pub const BOARD_SLOTS: usize = 2 * PITS_PER_PLAYER + 2;

/// One of the two players in a game.
///
/// The server assigns identities `1` and `2`; the numeric form is what goes
/// over the wire in `MOVE` commands and comes back from `NEXT_PLAYER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric identity as used by the wire protocol.
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a wire-protocol player id (`1` or `2`).
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Parse a decimal player id from a reply token.
    pub fn from_str(s: &str) -> Option<Player> {
        s.trim().parse::<u8>().ok().and_then(Player::from_id)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// How a finished game ended, from this agent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    /// Both stores hold the same number of seeds ("even game").
    Draw,
}
