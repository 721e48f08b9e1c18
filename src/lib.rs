//! Kalaha AI client.
//!
//! A network-attached agent for the two-player Kalaha board game: it
//! connects to the game server over TCP, learns its player identity, waits
//! for its turn, and plays a legal move chosen by a depth-bounded minimax
//! search with alpha-beta pruning.
//!
//! # Module Structure
//!
//! - [`types`]: player identities, outcomes, board constants
//! - [`board`]: the board rules - parsing, sowing, capture, extra turn
//! - [`engine`]: the decision engine - minimax with alpha-beta pruning
//! - [`protocol`]: wire commands and reply parsing
//! - [`client`]: the turn-taking session state machine
//! - [`error`]: the session's failure taxonomy

pub mod board;
pub mod client;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod types;

pub use board::{Board, BoardError};
pub use client::{ClientConfig, ProtocolClient, SessionState};
pub use engine::{minimax, select_move, NO_MOVE};
pub use error::ClientError;
pub use types::{GameOutcome, Player};
