//! Text rendering of the board.

use chess_core::{Color, File, PieceKind, Rank, Square};
use chess_engine::{Board, Cell, Piece};

use crate::config::DisplayConfig;

const FILE_LEGEND: &str = "    a   b   c   d   e   f   g   h";

/// Draws the board with rank 8 at the top.
///
/// Each cell is four characters wide. Ranks are separated by a blank line.
pub fn render(board: &Board, display: &DisplayConfig) -> String {
    let mut out = String::from("\n");

    for rank in Rank::ALL.iter().rev() {
        if display.coordinates {
            out.push_str(&format!("{}: ", rank));
        }
        for file in File::ALL {
            let cell = board.cell(Square::new(file, *rank));
            out.push(' ');
            out.push(cell_glyph(cell, display));
            out.push_str("  ");
        }
        out.push_str("\n\n");
    }

    if display.coordinates {
        out.push_str(FILE_LEGEND);
        out.push('\n');
    }
    out
}

fn cell_glyph(cell: &Cell, display: &DisplayConfig) -> char {
    match cell {
        Cell::Occupied(piece) if display.unicode => unicode_glyph(piece),
        Cell::Occupied(piece) => piece.kind.to_fen_char(piece.color),
        Cell::Empty { shaded: true } if display.shade_empty => ':',
        Cell::Empty { .. } => '.',
    }
}

/// White pieces use the solid glyphs, which read as light on a dark terminal.
fn unicode_glyph(piece: &Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♟',
        (Color::White, PieceKind::Knight) => '♞',
        (Color::White, PieceKind::Bishop) => '♝',
        (Color::White, PieceKind::Rook) => '♜',
        (Color::White, PieceKind::Queen) => '♛',
        (Color::White, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::Knight) => '♘',
        (Color::Black, PieceKind::Bishop) => '♗',
        (Color::Black, PieceKind::Rook) => '♖',
        (Color::Black, PieceKind::Queen) => '♕',
        (Color::Black, PieceKind::King) => '♔',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> DisplayConfig {
        DisplayConfig {
            unicode: false,
            shade_empty: false,
            coordinates: true,
        }
    }

    #[test]
    fn test_startpos_letters() {
        let text = render(&Board::startpos(), &letters());
        let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();

        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0], "8:  r   n   b   q   k   b   n   r  ");
        assert_eq!(rows[4], "4:  .   .   .   .   .   .   .   .  ");
        assert_eq!(rows[7], "1:  R   N   B   Q   K   B   N   R  ");
        assert_eq!(rows[8], FILE_LEGEND);
    }

    #[test]
    fn test_startpos_unicode() {
        let display = DisplayConfig::default();
        let text = render(&Board::startpos(), &display);
        assert!(text.contains("1:  ♜   ♞   ♝   ♛   ♚   ♝   ♞   ♜  "));
        assert!(text.contains("7:  ♙   ♙   ♙   ♙   ♙   ♙   ♙   ♙  "));
    }

    #[test]
    fn test_shaded_empty_cells() {
        let display = DisplayConfig {
            unicode: false,
            shade_empty: true,
            coordinates: true,
        };
        let text = render(&Board::empty(), &display);
        // A1 is shaded, B1 is not.
        assert!(text.contains("1:  :   .   :   .   :   .   :   .  "));
        assert!(text.contains("8:  .   :   .   :   .   :   .   :  "));
    }

    #[test]
    fn test_without_coordinates() {
        let display = DisplayConfig {
            coordinates: false,
            ..letters()
        };
        let text = render(&Board::startpos(), &display);
        assert!(!text.contains(FILE_LEGEND));
        assert!(text.contains("\n r   n   b   q   k   b   n   r  \n"));
    }
}
