//! Board representation.
//!
//! The board is a 9x9 grid of [`Cell`]s indexed `[file][rank]` with 1-based
//! coordinates; row and column 0 exist only so that indices match square
//! names and are never read.

use chess_core::{Color, Fen, PieceKind, Square};

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// What kind of piece this is.
    pub kind: PieceKind,
    /// Which side owns it.
    pub color: Color,
    /// The square it currently occupies.
    pub square: Square,
    /// True once the piece has been relocated at least once.
    pub has_moved: bool,
    /// Shade of the cell the piece stands on.
    pub shaded: bool,
}

impl Piece {
    /// Creates an unmoved piece on `square`, carrying that square's initial shade.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
            shaded: Board::initial_shade(square),
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// No piece; `shaded` is rendering metadata only.
    Empty { shaded: bool },
    /// A piece stands here.
    Occupied(Piece),
}

impl Cell {
    /// Returns the piece in this cell, if any.
    #[inline]
    pub const fn piece(&self) -> Option<&Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            Cell::Empty { .. } => None,
        }
    }

    /// Returns true if no piece stands here.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty { .. })
    }

    /// Returns the shade of this cell.
    ///
    /// An occupied cell reports the shade its piece carries.
    #[inline]
    pub const fn shaded(&self) -> bool {
        match self {
            Cell::Empty { shaded } => *shaded,
            Cell::Occupied(piece) => piece.shaded,
        }
    }
}

/// The 8x8 playing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 9]; 9],
}

impl Board {
    /// Returns the shade a square has in a freshly laid out board.
    ///
    /// A1 is shaded and the pattern alternates from there.
    #[inline]
    pub const fn initial_shade(sq: Square) -> bool {
        (sq.file_index() + sq.rank_index()) % 2 == 0
    }

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        let mut cells = [[Cell::Empty { shaded: false }; 9]; 9];
        for sq in Square::all() {
            cells[sq.file_index() as usize][sq.rank_index() as usize] = Cell::Empty {
                shaded: Self::initial_shade(sq),
            };
        }
        Board { cells }
    }

    /// Creates the standard opening layout with all 32 pieces unmoved.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for (sq, kind, color) in Fen::default().placement {
            board.place(Piece::new(kind, color, sq));
        }
        board
    }

    /// Returns the cell at `sq`.
    #[inline]
    pub fn cell(&self, sq: Square) -> &Cell {
        &self.cells[sq.file_index() as usize][sq.rank_index() as usize]
    }

    #[inline]
    fn cell_mut(&mut self, sq: Square) -> &mut Cell {
        &mut self.cells[sq.file_index() as usize][sq.rank_index() as usize]
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cell(sq).piece()
    }

    /// Returns true if a piece stands on `sq`.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        !self.cell(sq).is_empty()
    }

    /// Puts `piece` on its square, replacing whatever was there.
    ///
    /// The piece adopts the shade of the cell it lands on.
    pub fn place(&mut self, mut piece: Piece) {
        let cell = self.cell_mut(piece.square);
        piece.shaded = cell.shaded();
        *cell = Cell::Occupied(piece);
    }

    /// Lifts the piece off `sq`, leaving an empty cell with the piece's shade.
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let cell = self.cell_mut(sq);
        let piece = *cell.piece()?;
        *cell = Cell::Empty {
            shaded: piece.shaded,
        };
        Some(piece)
    }

    /// Overwrites the piece on its own square without touching its shade.
    pub(crate) fn replace(&mut self, piece: Piece) {
        *self.cell_mut(piece.square) = Cell::Occupied(piece);
    }

    /// Iterates over every piece, file by file.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq))
    }

    /// Iterates over the pieces of one color, file by file.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// Finds the king of `color` by scanning the board.
    ///
    /// The game keeps its own king cache; this scan is for setup and checks.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}
