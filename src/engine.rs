//! Decision engine - depth-bounded minimax with alpha-beta pruning
//!
//! Pure functions of (board, agent identity, depth) with no I/O. Each
//! hypothetical move is applied to a clone of the position, so a single root
//! board spawns disposable descendants and the caller's board is never
//! mutated.
//!
//! The maximizing/minimizing role at every node follows whose turn it
//! actually is on that position (`next_player == agent`), not the parity of
//! the recursion depth. Kalaha's extra-turn rule means one player can move
//! several plies in a row, and those plies all belong to the same
//! maximizing (or minimizing) layer.

use crate::board::Board;
use crate::types::Player;

/// Sentinel returned by [`select_move`] when no move is legal. Callers must
/// treat it as a logic error, never submit it to the server.
pub const NO_MOVE: u8 = 0;

/// Pick the best move (1-6) for `player` on `board`, searching `depth` plies.
///
/// Candidates are tried in ascending order and compared with strict
/// greater-than, so between equally valued moves the lowest-numbered one
/// wins. Fully deterministic for a given board and depth.
///
/// `board` must be `player`'s turn with at least one legal move; otherwise
/// the [`NO_MOVE`] sentinel comes back.
pub fn select_move(board: &Board, player: Player, depth: u32) -> u8 {
    let mut best_move = NO_MOVE;
    let mut best_eval = i32::MIN;

    for ambo in board.legal_moves() {
        let mut child = board.clone();
        child.make_move(ambo);
        let eval = minimax(
            &child,
            player,
            depth.saturating_sub(1),
            i32::MIN,
            i32::MAX,
            child.next_player() == player,
        );
        if eval > best_eval {
            best_eval = eval;
            best_move = ambo;
        }
    }

    best_move
}

/// Evaluate `board` for `player` by recursive tree search with alpha-beta
/// pruning.
///
/// Leaf value (at `depth == 0` or a finished game) is the pure material
/// heuristic: `player`'s store minus the opponent's store. Pruning never
/// changes the returned evaluation, only the amount of work.
pub fn minimax(
    board: &Board,
    player: Player,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
) -> i32 {
    if depth == 0 || board.game_ended() {
        return evaluate(board, player);
    }

    if maximizing {
        let mut max_eval = i32::MIN;
        for ambo in board.legal_moves() {
            let mut child = board.clone();
            child.make_move(ambo);
            let eval = minimax(
                &child,
                player,
                depth - 1,
                alpha,
                beta,
                child.next_player() == player,
            );
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for ambo in board.legal_moves() {
            let mut child = board.clone();
            child.make_move(ambo);
            let eval = minimax(
                &child,
                player,
                depth - 1,
                alpha,
                beta,
                child.next_player() == player,
            );
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

/// Material heuristic: agent's store minus the opponent's store.
fn evaluate(board: &Board, player: Player) -> i32 {
    i32::from(board.score(player)) - i32::from(board.score(player.opponent()))
}
