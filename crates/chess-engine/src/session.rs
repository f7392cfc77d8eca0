//! Turn loop driving a [`Game`] through an external [`Controller`].
//!
//! The controller is whoever sits at the board: a console prompt, a test
//! script, or anything else that can pick squares. The session asks it for
//! input, feeds the answers to the game, and reports back what happened.

use chess_core::{CastleSide, Color, Move, PieceKind, Promotion, Square};
use thiserror::Error;
use tracing::info;

use crate::board::{Board, Piece};
use crate::game::{Game, MoveError, MoveReport};

/// Answer to a destination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Move the selected piece here.
    Square(Square),
    /// Drop the selection and pick another piece.
    CancelSelection,
}

/// Failures of the controller. These end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input closed")]
    InputClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of moves and sink for game notifications.
pub trait Controller {
    /// Asks `side` which square to move from.
    fn request_move_source(&mut self, side: Color) -> Result<Square, SessionError>;

    /// Asks where the selected piece should go.
    fn request_move_destination(&mut self, piece: &Piece) -> Result<Destination, SessionError>;

    /// Asks whether the king should castle with the rook on `rook`.
    fn request_castle_intent(&mut self, king: &Piece, rook: Square) -> Result<bool, SessionError>;

    /// Asks what a pawn reaching its last rank becomes.
    fn request_promotion_choice(&mut self, pawn: &Piece) -> Result<Promotion, SessionError>;

    /// Reports a committed move.
    fn notify_move_result(&mut self, description: &str, check: bool) -> Result<(), SessionError>;

    /// Reports the end of the game.
    fn notify_terminal(&mut self, winner: Color, ply: u32) -> Result<(), SessionError>;

    /// Reports a refused selection or move. The same side is asked again.
    fn notify_rejected(&mut self, error: &MoveError) -> Result<(), SessionError>;

    /// Offers a move that gets the side to move out of check. `piece` is
    /// the piece that would make it.
    fn notify_hint(&mut self, _piece: &Piece, _mv: Move) -> Result<(), SessionError> {
        Ok(())
    }

    /// Shows the board at the start of each turn and once the game ends.
    fn show_board(&mut self, _board: &Board) -> Result<(), SessionError> {
        Ok(())
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Color,
    pub ply: u32,
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Offer an escape move when the side to move starts its turn in check.
    pub hints: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions { hints: true }
    }
}

/// Plays `game` until checkmate.
///
/// Returns early only if the controller fails; rejected moves are reported
/// and asked again.
pub fn play<C: Controller + ?Sized>(
    game: &mut Game,
    controller: &mut C,
    options: SessionOptions,
) -> Result<Outcome, SessionError> {
    info!(fen = %game.to_fen(), "game started");

    loop {
        controller.show_board(game.board())?;

        if let Some(winner) = game.winner() {
            let ply = game.ply();
            controller.notify_terminal(winner, ply)?;
            info!(%winner, ply, "game over");
            return Ok(Outcome { winner, ply });
        }

        let side = game.side_to_move();
        if options.hints && game.is_check(side) {
            let hint = game
                .escape_hint()
                .and_then(|mv| game.board().piece_at(mv.from()).map(|p| (*p, mv)));
            if let Some((piece, mv)) = hint {
                controller.notify_hint(&piece, mv)?;
            }
        }

        let report = play_turn(game, controller)?;
        controller.notify_move_result(&report.description, report.check)?;
    }
}

/// Runs one turn: selection, destination, and the move itself.
fn play_turn<C: Controller + ?Sized>(
    game: &mut Game,
    controller: &mut C,
) -> Result<MoveReport, SessionError> {
    let side = game.side_to_move();

    'select: loop {
        let from = controller.request_move_source(side)?;
        let piece = match game.select(from) {
            Ok(piece) => *piece,
            Err(err) => {
                controller.notify_rejected(&err)?;
                continue 'select;
            }
        };

        loop {
            let to = match controller.request_move_destination(&piece)? {
                Destination::Square(to) => to,
                Destination::CancelSelection => continue 'select,
            };

            let result = if is_castle_request(game.board(), &piece, to) {
                let Some(castle_side) = CastleSide::from_rook_file(to.file()) else {
                    controller.notify_rejected(&MoveError::IllegalMove {
                        kind: piece.kind,
                        from,
                        to,
                    })?;
                    continue;
                };
                if !controller.request_castle_intent(&piece, to)? {
                    continue;
                }
                game.castle(castle_side)
            } else if game.can_move(from, to) && game.needs_promotion(from, to) {
                let choice = controller.request_promotion_choice(&piece)?;
                game.make_move(Move::promotion(from, to, choice))
            } else {
                game.make_move(Move::normal(from, to))
            };

            match result {
                Ok(report) => return Ok(report),
                Err(
                    err @ (MoveError::IllegalMove { .. }
                    | MoveError::CastleUnavailable { .. }
                    | MoveError::InvalidPromotionChoice { .. }),
                ) => {
                    controller.notify_rejected(&err)?;
                }
                Err(err) => {
                    controller.notify_rejected(&err)?;
                    continue 'select;
                }
            }
        }
    }
}

fn is_castle_request(board: &Board, piece: &Piece, to: Square) -> bool {
    piece.kind == PieceKind::King
        && board
            .piece_at(to)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == piece.color)
}
