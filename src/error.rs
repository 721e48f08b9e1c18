//! Error taxonomy for the protocol client.
//!
//! Three outcomes exist and they are kept distinct instead of one broad
//! catch-all: a failure to establish the connection (fatal to startup), a
//! protocol failure mid-session (fatal to the session, surfaced as a
//! disconnect notice), and the rejected-move case, which is not an error at
//! all - the client retries it in-loop. A failed socket close is only ever
//! logged and never alters the session's outcome.

use std::time::Duration;

use thiserror::Error;

use crate::board::BoardError;

/// Fatal failures of a client session.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The socket could not be established; the session never started.
    #[error("unable to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an established connection.
    #[error("i/o failure during session: {0}")]
    Io(#[from] std::io::Error),

    /// The server stopped answering; a silent server must not stall the
    /// session forever.
    #[error("server did not reply to {command} within {timeout:?}")]
    ReadTimeout {
        command: &'static str,
        timeout: Duration,
    },

    /// The stream closed while a reply was expected.
    #[error("server closed the connection")]
    Disconnected,

    /// A reply that does not fit the protocol.
    #[error("malformed {command} reply: {reply:?}")]
    MalformedReply { command: &'static str, reply: String },

    /// The board line sent by the server did not parse.
    #[error("bad board line: {0}")]
    Board(#[from] BoardError),

    /// The search returned its no-move sentinel on our turn. The server
    /// said it is our move, so this is a logic error, not something to
    /// submit.
    #[error("no legal move found on own turn")]
    NoLegalMove,
}
