//! Protocol client - the turn-taking session loop
//!
//! Owns the connection's lifecycle as an explicit state machine:
//!
//! ```text
//! Connecting -> Identifying -> Polling -> { MyTurn, WaitingOpponent } -> GameOver
//! ```
//!
//! The loop polls the server rather than waiting for pushes: every
//! iteration asks `WINNER`, then `NEXT_PLAYER`, and only on our own turn
//! fetches the board, runs the search, and submits the move. A rejected
//! move re-fetches the board before recomputing - the search is
//! deterministic, so resubmitting against the identical snapshot could
//! never produce a different move.
//!
//! One task runs everything: network round-trips and the recursive search
//! are sequential, so a move computation blocks further polling until it
//! completes. Every read is bounded by a timeout so a silent server ends
//! the session as a protocol failure instead of stalling it forever.

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::engine::{select_move, NO_MOVE};
use crate::error::ClientError;
use crate::protocol::{
    move_rejected, parse_hello, parse_next_player, parse_winner, Command, NextPlayerReply,
    WinnerReply,
};
use crate::types::{GameOutcome, Player};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Search depth in plies handed to the decision engine.
    pub depth: u32,
    /// Pause between poll iterations.
    pub poll_interval: Duration,
    /// Upper bound on waiting for any single reply.
    pub read_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            depth: 5,
            poll_interval: Duration::from_millis(100),
            read_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("KALAHA_HOST").unwrap_or(defaults.host);
        let port = env::var("KALAHA_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let depth = env::var("KALAHA_DEPTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.depth);
        let poll_interval = env::var("KALAHA_POLL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);
        let read_timeout = env::var("KALAHA_READ_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.read_timeout);

        Self {
            host,
            port,
            depth,
            poll_interval,
            read_timeout,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session lifecycle state. Replaces independently mutated running/connected
/// flags with one enumerated state and explicit transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket establishment in progress.
    Connecting,
    /// Connected; the assigned player identity is still unknown.
    Identifying,
    /// Identity known; querying game-over status and whose turn is next.
    Polling { me: Player },
    /// The server says it is our move.
    MyTurn { me: Player },
    /// The opponent moves next, or the board is not full yet.
    WaitingOpponent { me: Player },
    /// Terminal: outcome recorded, connection about to close.
    GameOver { outcome: GameOutcome },
}

/// TCP client driving one game session against the Kalaha server.
pub struct ProtocolClient {
    config: ClientConfig,
    reader: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
    state: SessionState,
}

impl ProtocolClient {
    /// Establish the socket. A failure here is fatal to startup: the
    /// session never reaches `Identifying` and there is no retry.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let addr = config.addr();
        info!(%addr, "connecting");

        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| ClientError::Connect { addr, source })?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            config,
            reader: BufReader::new(read_half).lines(),
            writer: write_half,
            state: SessionState::Connecting,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to its end and return the recorded outcome.
    ///
    /// Any I/O, timeout, or parse failure ends the session with an error;
    /// the caller surfaces it as a disconnect notice. Rejected moves are
    /// retried in-loop and never surface here.
    pub async fn run(&mut self) -> Result<GameOutcome, ClientError> {
        loop {
            match self.state {
                SessionState::Connecting => {
                    self.transition(SessionState::Identifying);
                }
                SessionState::Identifying => {
                    let me = self.identify().await?;
                    info!(player = %me, "identity assigned");
                    self.transition(SessionState::Polling { me });
                }
                SessionState::Polling { me } => {
                    let next = self.poll(me).await?;
                    self.transition(next);
                }
                SessionState::MyTurn { me } => {
                    self.play_turn(me).await?;
                    self.pause().await;
                    self.transition(SessionState::Polling { me });
                }
                SessionState::WaitingOpponent { me } => {
                    self.pause().await;
                    self.transition(SessionState::Polling { me });
                }
                SessionState::GameOver { outcome } => {
                    self.shutdown().await;
                    return Ok(outcome);
                }
            }
        }
    }

    /// Handshake: runs exactly once, fixing this session's identity.
    async fn identify(&mut self) -> Result<Player, ClientError> {
        let reply = self.request(Command::Hello).await?;
        parse_hello(&reply)
    }

    /// One poll iteration: game-over status first, then whose turn it is.
    async fn poll(&mut self, me: Player) -> Result<SessionState, ClientError> {
        let winner_reply = self.request(Command::Winner).await?;
        match parse_winner(&winner_reply) {
            WinnerReply::Even => {
                info!("even game");
                return Ok(SessionState::GameOver {
                    outcome: GameOutcome::Draw,
                });
            }
            WinnerReply::Winner(winner) => {
                let outcome = if winner == me {
                    info!("game won");
                    GameOutcome::Win
                } else {
                    info!("game lost");
                    GameOutcome::Loss
                };
                return Ok(SessionState::GameOver { outcome });
            }
            WinnerReply::InProgress => {}
        }

        let next_reply = self.request(Command::NextPlayer).await?;
        match parse_next_player(&next_reply)? {
            NextPlayerReply::BoardNotFull => {
                debug!("board not full yet");
                Ok(SessionState::WaitingOpponent { me })
            }
            NextPlayerReply::Player(next) if next == me => Ok(SessionState::MyTurn { me }),
            NextPlayerReply::Player(_) => Ok(SessionState::WaitingOpponent { me }),
        }
    }

    /// Fetch the board, search, submit. On rejection, re-fetch and
    /// recompute until the server accepts.
    async fn play_turn(&mut self, me: Player) -> Result<(), ClientError> {
        loop {
            let board_line = self.request(Command::Board).await?;
            let board = Board::parse(&board_line)?;

            let started = Instant::now();
            let ambo = select_move(&board, me, self.config.depth);
            let elapsed = started.elapsed();
            if ambo == NO_MOVE {
                return Err(ClientError::NoLegalMove);
            }

            let reply = self
                .request(Command::Move { ambo, player: me })
                .await?;
            if move_rejected(&reply) {
                warn!(ambo, %reply, "move rejected, re-fetching board");
                continue;
            }

            info!(ambo, elapsed_ms = elapsed.as_millis() as u64, "made move");
            return Ok(());
        }
    }

    /// Send one command line and read its reply line.
    async fn request(&mut self, command: Command) -> Result<String, ClientError> {
        let line = format!("{command}\n");
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        self.read_reply(command.name()).await
    }

    /// Read one reply line, bounded by the configured timeout.
    async fn read_reply(&mut self, command: &'static str) -> Result<String, ClientError> {
        let timeout = self.config.read_timeout;
        let next_line = tokio::time::timeout(timeout, self.reader.next_line())
            .await
            .map_err(|_| ClientError::ReadTimeout { command, timeout })?;
        match next_line? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(ClientError::Disconnected),
        }
    }

    /// Rate-limited polling: fixed pause between iterations.
    async fn pause(&self) {
        tokio::time::sleep(self.config.poll_interval).await;
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
    }

    /// Close the connection. A close failure is logged and changes nothing
    /// about the already-decided outcome.
    pub async fn shutdown(&mut self) {
        if let Err(err) = self.writer.shutdown().await {
            warn!(%err, "error closing connection");
        }
        info!("disconnected from server");
    }
}
