//! Wire protocol vocabulary for the Kalaha game server
//!
//! The protocol is line-oriented plain text over TCP: one command per line,
//! one reply per line, newline-terminated.
//!
//! | Command sent    | Expected reply                  | Meaning                      |
//! |-----------------|---------------------------------|------------------------------|
//! | `HELLO`         | `<token> <playerId>`            | assign this session's player |
//! | `WINNER`        | `0` / `1` / `2` / anything else | even / p1 won / p2 won / game still running |
//! | `NEXT_PLAYER`   | player id, or not-full sentinel | whose turn is next           |
//! | `BOARD`         | serialized board line           | current board snapshot       |
//! | `MOVE <n> <id>` | accepted reply or `ERROR ...`   | submit move `n` (1-6)        |
//!
//! This module owns the command formatting and the reply parsing; the
//! session loop that decides what to send lives in [`crate::client`].

use std::fmt;

use crate::error::ClientError;
use crate::types::Player;

/// `NEXT_PLAYER` reply meaning the game has not started: the board is still
/// waiting for a second player to join.
pub const GAME_NOT_FULL: &str = "ERROR_GAME_NOT_FULL";

/// Prefix of every rejection reply to a `MOVE` command.
pub const ERROR_PREFIX: &str = "ERROR";

/// A command the client can send to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Winner,
    NextPlayer,
    Board,
    Move { ambo: u8, player: Player },
}

impl Command {
    /// Command keyword, for logs and error context.
    pub fn name(self) -> &'static str {
        match self {
            Command::Hello => "HELLO",
            Command::Winner => "WINNER",
            Command::NextPlayer => "NEXT_PLAYER",
            Command::Board => "BOARD",
            Command::Move { .. } => "MOVE",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move { ambo, player } => write!(f, "MOVE {ambo} {player}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parse the `HELLO` reply (`<token> <playerId>`) into the assigned identity.
pub fn parse_hello(reply: &str) -> Result<Player, ClientError> {
    let mut tokens = reply.split_whitespace();
    let _token = tokens.next();
    tokens
        .next()
        .and_then(Player::from_str)
        .ok_or_else(|| ClientError::MalformedReply {
            command: "HELLO",
            reply: reply.to_string(),
        })
}

/// Decoded `WINNER` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerReply {
    /// `0`: the game ended even.
    Even,
    /// `1` or `2`: that player won.
    Winner(Player),
    /// Any other value: the game is still running.
    InProgress,
}

/// Parse the `WINNER` reply. Never fails: the protocol defines every
/// non-terminal value as "game continues".
pub fn parse_winner(reply: &str) -> WinnerReply {
    match reply.trim() {
        "0" => WinnerReply::Even,
        "1" => WinnerReply::Winner(Player::One),
        "2" => WinnerReply::Winner(Player::Two),
        _ => WinnerReply::InProgress,
    }
}

/// Decoded `NEXT_PLAYER` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPlayerReply {
    /// The well-known sentinel: the game board is not full yet.
    BoardNotFull,
    Player(Player),
}

/// Parse the `NEXT_PLAYER` reply.
pub fn parse_next_player(reply: &str) -> Result<NextPlayerReply, ClientError> {
    let trimmed = reply.trim();
    if trimmed == GAME_NOT_FULL {
        return Ok(NextPlayerReply::BoardNotFull);
    }
    Player::from_str(trimmed)
        .map(NextPlayerReply::Player)
        .ok_or_else(|| ClientError::MalformedReply {
            command: "NEXT_PLAYER",
            reply: reply.to_string(),
        })
}

/// Whether a `MOVE` reply rejects the submitted move.
pub fn move_rejected(reply: &str) -> bool {
    reply.trim_start().starts_with(ERROR_PREFIX)
}
