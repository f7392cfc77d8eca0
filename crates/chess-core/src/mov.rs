//! Move representation.

use crate::{Color, File, ParseError, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Toward the H-file rook.
    Kingside,
    /// Toward the A-file rook.
    Queenside,
}

impl CastleSide {
    /// Returns the file the castling rook starts on.
    #[inline]
    pub const fn rook_file(self) -> File {
        match self {
            CastleSide::Kingside => File::H,
            CastleSide::Queenside => File::A,
        }
    }

    /// Returns the file the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::G,
            CastleSide::Queenside => File::C,
        }
    }

    /// Returns the file the rook lands on, next to the king.
    #[inline]
    pub const fn rook_target_file(self) -> File {
        match self {
            CastleSide::Kingside => File::F,
            CastleSide::Queenside => File::D,
        }
    }

    /// Returns the castling side whose rook starts on `file`, if any.
    #[inline]
    pub const fn from_rook_file(file: File) -> Option<Self> {
        match file {
            File::H => Some(CastleSide::Kingside),
            File::A => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Returns the home square of the king for `color`.
    #[inline]
    pub const fn king_origin(color: Color) -> Square {
        Square::new(File::E, color.back_rank())
    }

    /// Returns the starting square of this side's rook for `color`.
    #[inline]
    pub const fn rook_origin(self, color: Color) -> Square {
        Square::new(self.rook_file(), color.back_rank())
    }

    /// Returns where the king ends up after castling.
    #[inline]
    pub const fn king_target(self, color: Color) -> Square {
        Square::new(self.king_target_file(), color.back_rank())
    }

    /// Returns where the rook ends up after castling.
    #[inline]
    pub const fn rook_target(self, color: Color) -> Square {
        Square::new(self.rook_target_file(), color.back_rank())
    }
}

/// The piece kinds a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    /// All promotion choices.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    /// Returns the piece kind the pawn becomes.
    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Queen => PieceKind::Queen,
        }
    }

    /// Parses a promotion letter.
    ///
    /// Accepts `Q`, `R`, `B` and `N` in either case. `K` is also read as a
    /// knight, since a pawn can never promote to a king.
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(Promotion::Queen),
            'R' => Some(Promotion::Rook),
            'B' => Some(Promotion::Bishop),
            'N' | 'K' => Some(Promotion::Knight),
            _ => None,
        }
    }

    /// Returns the lowercase letter used in coordinate notation.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Promotion::Knight => 'n',
            Promotion::Bishop => 'b',
            Promotion::Rook => 'r',
            Promotion::Queen => 'q',
        }
    }
}

impl FromStr for Promotion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Promotion::from_char(c).ok_or_else(|| ParseError::InvalidPromotionChoice(s.to_string()))
            }
            _ => Err(ParseError::InvalidPromotionChoice(s.to_string())),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece_kind())
    }
}

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    /// Ordinary relocation or capture.
    Normal,
    /// Kingside castling; `from`/`to` are the king's squares.
    CastleKingside,
    /// Queenside castling; `from`/`to` are the king's squares.
    CastleQueenside,
    /// Pawn move onto the last rank, becoming the given piece.
    Promote(Promotion),
}

impl MoveFlag {
    /// Returns the promotion choice if this is a promotion move.
    #[inline]
    pub const fn promotion(self) -> Option<Promotion> {
        match self {
            MoveFlag::Promote(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the castling side if this is a castling move.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveFlag::CastleKingside => Some(CastleSide::Kingside),
            MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// A move request: source square, destination square and special flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move { from, to, flag }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Creates a promoting pawn move.
    #[inline]
    pub const fn promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Self::new(from, to, MoveFlag::Promote(promotion))
    }

    /// Creates the castling move for `color` on `side`.
    #[inline]
    pub const fn castle(color: Color, side: CastleSide) -> Self {
        let flag = match side {
            CastleSide::Kingside => MoveFlag::CastleKingside,
            CastleSide::Queenside => MoveFlag::CastleQueenside,
        };
        Self::new(CastleSide::king_origin(color), side.king_target(color), flag)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.flag.promotion() {
            Some(p) => format!("{}{}{}", self.from, self.to, p.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinate())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
