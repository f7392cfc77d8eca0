//! Game state machine.
//!
//! [`Game`] owns the board, whose turn it is, the ply counter and the
//! cached king squares. Every move is tried on the live board, checked for
//! king exposure, and either committed or rolled back from a snapshot.

use chess_core::{
    CastleSide, CastlingRights, Color, Fen, FenError, Move, MoveFlag, PieceKind, Promotion, Square,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, Piece};
use crate::detect::{find_king_safe_move, is_attacked, is_checkmate};
use crate::execute;
use crate::legality::can_move_to;

/// Where the game stands between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the given side to move.
    AwaitingMove(Color),
    /// Checkmate was delivered; no further moves are accepted.
    Terminal { winner: Color },
}

/// Why castling was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CastleBlock {
    #[error("the king has already moved")]
    KingMoved,
    #[error("the rook is missing or has already moved")]
    RookUnavailable,
    #[error("{0} is occupied")]
    PathBlocked(Square),
    #[error("{0} is attacked")]
    SquareAttacked(Square),
}

/// Recoverable reasons a proposed move is refused.
///
/// None of these change the game state; the same side simply tries again.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The source square holds no piece of the side to move.
    #[error("no {side} piece on {square}")]
    InvalidSelection { square: Square, side: Color },
    /// The piece cannot reach the destination.
    #[error("{kind} at {from} cannot move to {to}")]
    IllegalMove {
        kind: PieceKind,
        from: Square,
        to: Square,
    },
    /// The move would leave the mover's own king attacked.
    #[error("cannot do this move, the {color} king would be in check")]
    KingExposed { color: Color },
    /// Castling preconditions are not met.
    #[error("cannot castle {side:?}: {reason}")]
    CastleUnavailable { side: CastleSide, reason: CastleBlock },
    /// A pawn reaching its last rank needs a choice, and only then.
    #[error("invalid promotion choice for move {mv}")]
    InvalidPromotionChoice { mv: Move },
    /// Checkmate has already ended the game.
    #[error("the game is over")]
    GameOver,
}

/// Positions the engine refuses to set up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("fullmove number {0} is out of range")]
    MoveNumberTooLarge(u32),
}

/// What a committed move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The move as played.
    pub mv: Move,
    /// Side that moved.
    pub color: Color,
    /// Kind of the piece that moved (the king, for castling).
    pub piece: PieceKind,
    /// Kind of the piece captured, if any.
    pub captured: Option<PieceKind>,
    /// Kind the pawn became, if the move promoted.
    pub promoted: Option<PieceKind>,
    /// True if the opponent's king is now attacked.
    pub check: bool,
    /// Set when the move delivered checkmate.
    pub winner: Option<Color>,
    /// Human-readable summary, e.g. "White Pawn at E2 moved to E4".
    pub description: String,
}

/// Copy of everything a tentative move may touch.
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    kings: [Square; 2],
}

/// A two-player game.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    ply: u32,
    kings: [Square; 2],
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game in the standard starting layout, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::startpos(),
            side_to_move: Color::White,
            ply: 1,
            kings: [Square::E1, Square::E8],
            status: GameStatus::AwaitingMove(Color::White),
        }
    }

    /// Creates a game from an arbitrary board.
    ///
    /// Each side must have exactly one king. A side already checkmated
    /// makes the game start in its terminal state.
    pub fn from_board(board: Board, side_to_move: Color, ply: u32) -> Result<Self, SetupError> {
        let mut kings = [Square::E1, Square::E8];
        for color in Color::ALL {
            let found: Vec<Square> = board
                .pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .map(|p| p.square)
                .collect();
            match found.as_slice() {
                [king] => kings[color.index()] = *king,
                _ => {
                    return Err(SetupError::KingCount {
                        color,
                        count: found.len(),
                    })
                }
            }
        }

        let mut game = Game {
            board,
            side_to_move,
            ply: ply.max(1),
            kings,
            status: GameStatus::AwaitingMove(side_to_move),
        };
        let king = game.king_square(side_to_move);
        if is_checkmate(&game.board, side_to_move, king) {
            game.status = GameStatus::Terminal {
                winner: side_to_move.opposite(),
            };
        }
        Ok(game)
    }

    /// Creates a game from a FEN string.
    ///
    /// Pieces standing on their opening squares count as unmoved, except that
    /// kings and rooks count as unmoved only while the castling field still
    /// grants the matching right.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let fen = Fen::parse(fen)?;
        let opening = Fen::default();
        let mut board = Board::empty();

        for &(sq, kind, color) in &fen.placement {
            let home = opening.piece_at(sq) == Some((kind, color));
            let unmoved = match kind {
                PieceKind::King => {
                    home && (fen.castling.allows(color, CastleSide::Kingside)
                        || fen.castling.allows(color, CastleSide::Queenside))
                }
                PieceKind::Rook => {
                    home && CastleSide::from_rook_file(sq.file())
                        .is_some_and(|side| fen.castling.allows(color, side))
                }
                _ => home,
            };
            let mut piece = Piece::new(kind, color, sq);
            piece.has_moved = !unmoved;
            board.place(piece);
        }

        let ply = fen
            .fullmove_number
            .saturating_sub(1)
            .checked_mul(2)
            .and_then(|n| n.checked_add(1 + u32::from(fen.active_color == Color::Black)))
            .filter(|&ply| ply < u32::MAX)
            .ok_or(SetupError::MoveNumberTooLarge(fen.fullmove_number))?;
        Self::from_board(board, fen.active_color, ply)
    }

    /// Renders the current position as FEN.
    ///
    /// Castling rights mirror the unmoved king/rook pairs. En passant is
    /// always `-` and the halfmove clock always 0.
    pub fn to_fen(&self) -> String {
        let mut castling = CastlingRights::NONE;
        for color in Color::ALL {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if self.castle_pieces_unmoved(color, side) {
                    castling.grant(color, side);
                }
            }
        }

        Fen {
            placement: self
                .board
                .pieces()
                .map(|p| (p.square, p.kind, p.color))
                .collect(),
            active_color: self.side_to_move,
            castling,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: (self.ply - 1) / 2 + 1,
        }
        .to_string()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the ply counter (1 before the first move).
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Returns the current state.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once checkmate has ended the game.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Terminal { .. })
    }

    /// Returns the winner, if the game is over.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Terminal { winner } => Some(winner),
            GameStatus::AwaitingMove(_) => None,
        }
    }

    /// Returns the cached square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Returns true if `color`'s king is attacked.
    pub fn is_check(&self, color: Color) -> bool {
        is_attacked(&self.board, color.opposite(), self.king_square(color))
    }

    /// Returns true if `color` is checkmated.
    pub fn is_checkmate(&self, color: Color) -> bool {
        is_checkmate(&self.board, color, self.king_square(color))
    }

    /// Returns a move for the side to move that leaves its king safe.
    pub fn escape_hint(&self) -> Option<Move> {
        let side = self.side_to_move;
        find_king_safe_move(&self.board, side, self.king_square(side))
    }

    /// Validates that `square` holds a piece of the side to move.
    pub fn select(&self, square: Square) -> Result<&Piece, MoveError> {
        let side = self.side_to_move;
        self.board
            .piece_at(square)
            .filter(|p| p.color == side)
            .ok_or(MoveError::InvalidSelection { square, side })
    }

    /// Returns true if the piece on `from` may move to `to`, ignoring king safety.
    pub fn can_move(&self, from: Square, to: Square) -> bool {
        can_move_to(&self.board, from, to)
    }

    /// Returns true if moving the piece on `from` to `to` is a pawn reaching
    /// its last rank, which requires a promotion choice.
    pub fn needs_promotion(&self, from: Square, to: Square) -> bool {
        self.board.piece_at(from).is_some_and(|p| {
            p.kind == PieceKind::Pawn && to.rank() == p.color.promotion_rank()
        })
    }

    /// Plays a move for the side to move.
    ///
    /// Castling flags are handed to [`Game::castle`]. On any error the game
    /// is left exactly as it was.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveReport, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if let Some(side) = mv.flag().castle_side() {
            return self.castle(side);
        }

        let mover = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());
        let piece = *self.select(from)?;
        let illegal = MoveError::IllegalMove {
            kind: piece.kind,
            from,
            to,
        };

        if !can_move_to(&self.board, from, to) {
            return Err(illegal);
        }

        let promotion = match (self.needs_promotion(from, to), mv.flag()) {
            (true, MoveFlag::Promote(choice)) => Some(choice),
            (false, MoveFlag::Normal) => None,
            _ => return Err(MoveError::InvalidPromotionChoice { mv }),
        };

        let snapshot = self.snapshot();
        let relocation = execute::relocate(&mut self.board, from, to).ok_or(illegal)?;
        if piece.kind == PieceKind::King {
            self.kings[mover.index()] = to;
        }

        if self.is_check(mover) {
            self.restore(snapshot);
            debug!(%mv, color = %mover, "rolled back: own king exposed");
            return Err(MoveError::KingExposed { color: mover });
        }

        let promoted = promotion.and_then(|choice| self.promote(to, choice));
        let mut description = format!(
            "{} {} at {} moved to {}",
            mover,
            piece.kind,
            upper(from),
            upper(to)
        );
        if let Some(kind) = promoted {
            description.push_str(&format!("\nPawn at {} promoted to a {}!", upper(to), kind));
        }

        Ok(self.finish_turn(MoveReport {
            mv,
            color: mover,
            piece: piece.kind,
            captured: relocation.captured.map(|p| p.kind),
            promoted,
            check: false,
            winner: None,
            description,
        }))
    }

    /// Castles the side to move on `side`.
    ///
    /// Requires an unmoved king on its home square, an unmoved rook on its
    /// origin square, empty squares between them, and no attack on the
    /// squares the king starts on, crosses, or lands on.
    pub fn castle(&mut self, side: CastleSide) -> Result<MoveReport, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let color = self.side_to_move;
        let refuse = |reason| MoveError::CastleUnavailable { side, reason };

        let king_from = CastleSide::king_origin(color);
        let king_ok = self
            .board
            .piece_at(king_from)
            .is_some_and(|p| p.kind == PieceKind::King && p.color == color && !p.has_moved);
        if !king_ok {
            return Err(refuse(CastleBlock::KingMoved));
        }

        let rook_from = side.rook_origin(color);
        let rook_ok = self
            .board
            .piece_at(rook_from)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color && !p.has_moved);
        if !rook_ok {
            return Err(refuse(CastleBlock::RookUnavailable));
        }

        if let Some(blocked) = squares_between(king_from, rook_from)
            .into_iter()
            .find(|&sq| self.board.is_occupied(sq))
        {
            return Err(refuse(CastleBlock::PathBlocked(blocked)));
        }

        let king_to = side.king_target(color);
        let king_path = [king_from, side.rook_target(color), king_to];
        if let Some(attacked) = king_path
            .into_iter()
            .find(|&sq| is_attacked(&self.board, color.opposite(), sq))
        {
            return Err(refuse(CastleBlock::SquareAttacked(attacked)));
        }

        let snapshot = self.snapshot();
        if execute::castle(&mut self.board, color, side).is_none() {
            self.restore(snapshot);
            return Err(refuse(CastleBlock::RookUnavailable));
        }
        self.kings[color.index()] = king_to;

        if self.is_check(color) {
            self.restore(snapshot);
            debug!(?side, %color, "rolled back castle: own king exposed");
            return Err(MoveError::KingExposed { color });
        }

        debug!(?side, %color, "castled");
        Ok(self.finish_turn(MoveReport {
            mv: Move::castle(color, side),
            color,
            piece: PieceKind::King,
            captured: None,
            promoted: None,
            check: false,
            winner: None,
            description: format!("{} castled!", color),
        }))
    }

    fn promote(&mut self, sq: Square, choice: Promotion) -> Option<PieceKind> {
        let promoted = execute::promote(&mut self.board, sq, choice)?;
        debug!(square = %sq, kind = %promoted.kind, "pawn promoted");
        Some(promoted.kind)
    }

    /// Passes the turn and looks for check and checkmate on the opponent.
    fn finish_turn(&mut self, mut report: MoveReport) -> MoveReport {
        let mover = report.color;
        let opponent = mover.opposite();
        self.side_to_move = opponent;
        self.ply = self.ply.saturating_add(1);
        debug!(mv = %report.mv, ply = self.ply, "committed");

        report.check = self.is_check(opponent);
        if report.check && self.is_checkmate(opponent) {
            info!(winner = %mover, ply = self.ply, "checkmate");
            self.status = GameStatus::Terminal { winner: mover };
            report.winner = Some(mover);
        } else {
            self.status = GameStatus::AwaitingMove(opponent);
        }
        report
    }

    fn castle_pieces_unmoved(&self, color: Color, side: CastleSide) -> bool {
        let unmoved = |sq: Square, kind: PieceKind| {
            self.board
                .piece_at(sq)
                .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
        };
        unmoved(CastleSide::king_origin(color), PieceKind::King)
            && unmoved(side.rook_origin(color), PieceKind::Rook)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            kings: self.kings,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.kings = snapshot.kings;
    }
}

/// Squares strictly between two squares on the same rank.
fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let (lo, hi) = if a.file_index() < b.file_index() {
        (a, b)
    } else {
        (b, a)
    };
    (lo.file_index() + 1..hi.file_index())
        .filter_map(|file| Square::at(file, a.rank_index()))
        .collect()
}

fn upper(sq: Square) -> String {
    sq.to_algebraic().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::normal(sq(from), sq(to))
    }

    fn assert_king_cache(game: &Game) {
        for color in Color::ALL {
            assert_eq!(
                Some(game.king_square(color)),
                game.board().find_king(color),
                "{} king cache",
                color
            );
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.ply(), 1);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::White));
        assert!(!game.is_over());
        assert!(!game.is_check(Color::White));
        assert_king_cache(&game);
    }

    #[test]
    fn from_fen_startpos_matches_new() {
        let game = Game::from_fen(Fen::STARTPOS).unwrap();
        assert_eq!(game.board(), Game::new().board());
        assert_eq!(game.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn first_move_passes_turn() {
        let mut game = Game::new();
        let report = game.make_move(mv("e2", "e4")).unwrap();
        assert_eq!(report.description, "White Pawn at E2 moved to E4");
        assert!(!report.check);
        assert_eq!(report.captured, None);
        assert_eq!(game.ply(), 2);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::Black));
        assert_eq!(
            game.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn wrong_side_is_invalid_selection() {
        let mut game = Game::new();
        let err = game.make_move(mv("e7", "e5")).unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidSelection {
                square: sq("e7"),
                side: Color::White
            }
        );
        assert!(matches!(
            game.select(sq("e4")),
            Err(MoveError::InvalidSelection { .. })
        ));
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn illegal_destination() {
        let mut game = Game::new();
        let err = game.make_move(mv("e2", "e5")).unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalMove {
                kind: PieceKind::Pawn,
                from: sq("e2"),
                to: sq("e5")
            }
        );
        assert_eq!(err.to_string(), "Pawn at e2 cannot move to e5");
    }

    #[test]
    fn pinned_piece_move_is_rolled_back() {
        // White bishop on d2 is pinned against the king by the black bishop on b4.
        let mut game = Game::from_fen("4k3/8/8/8/1b6/8/3B4/4K3 w - - 0 1").unwrap();
        let before_board = game.board().clone();
        let before_fen = game.to_fen();

        let err = game.make_move(mv("d2", "e3")).unwrap_err();
        assert_eq!(err, MoveError::KingExposed { color: Color::White });
        assert_eq!(game.board(), &before_board);
        assert_eq!(game.to_fen(), before_fen);
        assert_eq!(game.ply(), 1);
        assert_eq!(game.side_to_move(), Color::White);
        assert_king_cache(&game);

        // Capturing the pinning piece is fine.
        game.make_move(mv("d2", "b4")).unwrap();
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").unwrap();
        let before = game.board().clone();
        assert_eq!(
            game.make_move(mv("e1", "e2")).unwrap_err(),
            MoveError::KingExposed { color: Color::White }
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.king_square(Color::White), Square::E1);

        game.make_move(mv("e1", "f1")).unwrap();
        assert_eq!(game.king_square(Color::White), Square::F1);
        assert_king_cache(&game);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        game.make_move(mv("f2", "f3")).unwrap();
        game.make_move(mv("e7", "e5")).unwrap();
        game.make_move(mv("g2", "g4")).unwrap();
        let report = game.make_move(mv("d8", "h4")).unwrap();

        assert!(report.check);
        assert_eq!(report.winner, Some(Color::Black));
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(game.status(), GameStatus::Terminal { winner: Color::Black });
        assert_eq!(game.ply(), 5);
        assert_eq!(game.make_move(mv("a2", "a3")), Err(MoveError::GameOver));
    }

    #[test]
    fn check_without_mate_continues() {
        let mut game = Game::new();
        game.make_move(mv("e2", "e4")).unwrap();
        game.make_move(mv("f7", "f6")).unwrap();
        let report = game.make_move(mv("d1", "h5")).unwrap();

        assert!(report.check);
        assert_eq!(report.winner, None);
        assert!(game.is_check(Color::Black));
        assert_eq!(game.status(), GameStatus::AwaitingMove(Color::Black));
        assert_eq!(game.escape_hint(), Some(mv("g7", "g6")));
    }

    #[test]
    fn promotion_requires_choice() {
        let mut game = Game::from_fen("4k3/5P2/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(game.needs_promotion(sq("f7"), sq("f8")));
        assert_eq!(
            game.make_move(mv("f7", "f8")),
            Err(MoveError::InvalidPromotionChoice {
                mv: mv("f7", "f8")
            })
        );

        let report = game
            .make_move(Move::promotion(sq("f7"), sq("f8"), Promotion::Queen))
            .unwrap();
        assert_eq!(report.promoted, Some(PieceKind::Queen));
        assert_eq!(
            report.description,
            "White Pawn at F7 moved to F8\nPawn at F8 promoted to a Queen!"
        );
        assert!(report.check, "queen on f8 checks e8");

        let queen = game.board().piece_at(sq("f8")).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert!(queen.has_moved);
        assert!(game.board().piece_at(sq("f7")).is_none());
    }

    #[test]
    fn promotion_choice_on_ordinary_move_is_rejected() {
        let mut game = Game::new();
        let err = game
            .make_move(Move::promotion(sq("e2"), sq("e4"), Promotion::Rook))
            .unwrap_err();
        assert!(matches!(err, MoveError::InvalidPromotionChoice { .. }));
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn black_promotes_to_knight() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/1p6/4K3 b - - 0 1").unwrap();
        let report = game
            .make_move(Move::promotion(sq("b2"), Square::B1, Promotion::Knight))
            .unwrap();
        assert_eq!(report.promoted, Some(PieceKind::Knight));
        assert_eq!(
            game.board().piece_at(Square::B1).map(|p| p.kind),
            Some(PieceKind::Knight)
        );
    }

    #[test]
    fn castle_kingside() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let report = game.castle(CastleSide::Kingside).unwrap();
        assert_eq!(report.description, "White castled!");
        assert_eq!(report.mv, Move::castle(Color::White, CastleSide::Kingside));

        let king = game.board().piece_at(Square::G1).unwrap();
        let rook = game.board().piece_at(Square::F1).unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(king.has_moved && rook.has_moved);
        assert_eq!(game.king_square(Color::White), Square::G1);
        assert_eq!(game.ply(), 2);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_king_cache(&game);
    }

    #[test]
    fn castle_queenside_through_make_move() {
        let mut game = Game::from_fen("r3k3/8/8/8/8/8/8/4K3 b q - 0 1").unwrap();
        game.make_move(Move::castle(Color::Black, CastleSide::Queenside))
            .unwrap();
        assert_eq!(game.king_square(Color::Black), Square::C8);
        assert_eq!(
            game.board().piece_at(Square::D8).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(game.board().piece_at(Square::A8).is_none());
    }

    #[test]
    fn castle_refusals_leave_state_untouched() {
        let cases = [
            // kingside rook already moved
            ("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1", CastleBlock::RookUnavailable),
            // piece in the way
            ("4k3/8/8/8/8/8/8/4KB1R w K - 0 1", CastleBlock::PathBlocked(Square::F1)),
            // king in check
            ("4k3/8/8/8/8/8/8/r3K2R w K - 0 1", CastleBlock::SquareAttacked(Square::E1)),
            // passes through attack
            ("4kr2/8/8/8/8/8/8/4K2R w K - 0 1", CastleBlock::SquareAttacked(Square::F1)),
            // lands on attack
            ("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1", CastleBlock::SquareAttacked(Square::G1)),
        ];

        for (fen, reason) in cases {
            let mut game = Game::from_fen(fen).unwrap();
            let before = game.board().clone();
            let err = game.castle(CastleSide::Kingside).unwrap_err();
            assert_eq!(
                err,
                MoveError::CastleUnavailable {
                    side: CastleSide::Kingside,
                    reason
                },
                "{}",
                fen
            );
            assert_eq!(game.board(), &before, "{}", fen);
            assert_eq!(game.ply(), 1);
        }
    }

    #[test]
    fn moved_king_cannot_castle() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        game.make_move(mv("e1", "e2")).unwrap();
        game.make_move(mv("e8", "d8")).unwrap();
        game.make_move(mv("e2", "e1")).unwrap();
        game.make_move(mv("d8", "e8")).unwrap();
        assert_eq!(
            game.castle(CastleSide::Kingside).unwrap_err(),
            MoveError::CastleUnavailable {
                side: CastleSide::Kingside,
                reason: CastleBlock::KingMoved
            }
        );
    }

    #[test]
    fn castle_giving_check_is_reported() {
        let mut game = Game::from_fen("5k2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let report = game.castle(CastleSide::Kingside).unwrap();
        assert!(report.check, "rook on f1 checks f8");
        assert_eq!(report.winner, None);
    }

    #[test]
    fn setup_requires_one_king_each() {
        assert_eq!(
            Game::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            SetupError::KingCount {
                color: Color::Black,
                count: 0
            }
        );
        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").unwrap_err(),
            SetupError::KingCount {
                color: Color::White,
                count: 2
            }
        );
        assert!(matches!(
            Game::from_fen("not a fen"),
            Err(SetupError::Fen(_))
        ));
    }

    #[test]
    fn mated_setup_starts_terminal() {
        let game = Game::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.ply(), 2);
    }

    #[test]
    fn ply_from_fullmove_number() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 12").unwrap();
        assert_eq!(game.ply(), 24);
        assert!(game.to_fen().ends_with("b - - 0 12"));
    }

    #[test]
    fn huge_fullmove_number_is_refused() {
        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 4294967295").unwrap_err(),
            SetupError::MoveNumberTooLarge(u32::MAX)
        );
        assert_eq!(
            Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 2147483648").unwrap_err(),
            SetupError::MoveNumberTooLarge(1 << 31)
        );

        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 2147483647").unwrap();
        assert_eq!(game.ply(), u32::MAX - 1);
        assert!(game.to_fen().ends_with("b - - 0 2147483647"));
    }

    #[test]
    fn ply_counter_stops_at_its_ceiling() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::King, Color::White, Square::E1));
        board.place(Piece::new(PieceKind::King, Color::Black, Square::E8));
        let mut game = Game::from_board(board, Color::White, u32::MAX).unwrap();

        game.make_move(mv("e1", "e2")).unwrap();
        game.make_move(mv("e8", "e7")).unwrap();
        assert_eq!(game.ply(), u32::MAX);
        assert!(game.to_fen().ends_with(" 2147483648"));
    }

    #[test]
    fn fen_derives_unmoved_flags() {
        let game = Game::from_fen("r3k2r/pppppppp/8/8/4P3/8/PPPP1PPP/R3K2R w Kq - 0 1").unwrap();
        let board = game.board();
        assert!(!board.piece_at(Square::H1).unwrap().has_moved);
        assert!(board.piece_at(Square::A1).unwrap().has_moved);
        assert!(!board.piece_at(Square::E1).unwrap().has_moved);
        assert!(!board.piece_at(Square::A8).unwrap().has_moved);
        assert!(board.piece_at(Square::H8).unwrap().has_moved);
        assert!(board.piece_at(sq("e4")).unwrap().has_moved);
        assert!(!board.piece_at(sq("d2")).unwrap().has_moved);
        assert!(game.to_fen().contains(" Kq "));
    }

    #[test]
    fn capture_is_reported() {
        let mut game = Game::new();
        game.make_move(mv("e2", "e4")).unwrap();
        game.make_move(mv("d7", "d5")).unwrap();
        let report = game.make_move(mv("e4", "d5")).unwrap();
        assert_eq!(report.captured, Some(PieceKind::Pawn));
        assert_eq!(game.board().pieces_of(Color::Black).count(), 15);
    }

    #[test]
    fn squares_between_on_rank() {
        assert_eq!(
            squares_between(Square::E1, Square::H1),
            vec![Square::F1, Square::G1]
        );
        assert_eq!(
            squares_between(Square::E8, Square::A8),
            vec![Square::B8, Square::C8, Square::D8]
        );
    }
}
