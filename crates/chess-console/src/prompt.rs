//! Line-oriented [`Controller`] reading answers from a `BufRead` and
//! writing prompts to a `Write`.

use std::io::{BufRead, Write};

use chess_core::{Color, Move, Promotion, Square};
use chess_engine::{Board, Controller, Destination, MoveError, Piece, SessionError};

use crate::config::DisplayConfig;
use crate::render::render;

/// Console player seat shared by both sides.
pub struct Prompt<R, W> {
    input: R,
    output: W,
    display: DisplayConfig,
    turn: Color,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W, display: DisplayConfig) -> Self {
        Prompt {
            input,
            output,
            display,
            turn: Color::White,
        }
    }

    /// Returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

fn upper(sq: Square) -> String {
    sq.to_algebraic().to_uppercase()
}

impl<R: BufRead, W: Write> Controller for Prompt<R, W> {
    fn request_move_source(&mut self, side: Color) -> Result<Square, SessionError> {
        self.turn = side;
        loop {
            write!(
                self.output,
                "It is {}'s turn. Enter the location of the piece you would like to move: ",
                side
            )?;
            match self.read_line()?.parse::<Square>() {
                Ok(sq) => return Ok(sq),
                Err(_) => writeln!(self.output, "Invalid input, try again!")?,
            }
        }
    }

    fn request_move_destination(&mut self, piece: &Piece) -> Result<Destination, SessionError> {
        writeln!(
            self.output,
            "{}'s {} at {} selected, Enter the location of square you would like to move to:",
            piece.color,
            piece.kind,
            upper(piece.square)
        )?;
        writeln!(self.output, "(Enter 'R' to change selected piece)")?;

        loop {
            let line = self.read_line()?;
            if line.eq_ignore_ascii_case("r") {
                return Ok(Destination::CancelSelection);
            }
            match line.parse::<Square>() {
                Ok(sq) => return Ok(Destination::Square(sq)),
                Err(_) => writeln!(self.output, "Invalid input, try again!")?,
            }
        }
    }

    fn request_castle_intent(&mut self, _king: &Piece, rook: Square) -> Result<bool, SessionError> {
        loop {
            write!(self.output, "Castle with the rook at {}? (y/n): ", upper(rook))?;
            match self.read_line()?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Invalid input, try again!")?,
            }
        }
    }

    fn request_promotion_choice(&mut self, _pawn: &Piece) -> Result<Promotion, SessionError> {
        loop {
            writeln!(
                self.output,
                "Pawn promotion! Pick which piece (Q, B, R, K) you would like:"
            )?;
            match self.read_line()?.parse::<Promotion>() {
                Ok(choice) => return Ok(choice),
                Err(_) => writeln!(self.output, "Invalid choice! Try again:")?,
            }
        }
    }

    fn notify_move_result(&mut self, description: &str, check: bool) -> Result<(), SessionError> {
        writeln!(self.output, "{}", description)?;
        if check {
            writeln!(self.output, "{}'s king is checked!", self.turn.opposite())?;
        }
        Ok(())
    }

    fn notify_terminal(&mut self, winner: Color, ply: u32) -> Result<(), SessionError> {
        writeln!(self.output, "CHECKMATE")?;
        writeln!(self.output, "{} is the winner after {} moves!", winner, ply)?;
        Ok(())
    }

    fn notify_rejected(&mut self, error: &MoveError) -> Result<(), SessionError> {
        match error {
            MoveError::InvalidSelection { .. } => {
                writeln!(self.output, "Invalid location, try again!")?
            }
            MoveError::IllegalMove { kind, from, to } => writeln!(
                self.output,
                "{} at {} cannot move to {}, try again!",
                kind,
                upper(*from),
                upper(*to)
            )?,
            MoveError::KingExposed { .. } => {
                writeln!(self.output, "Cannot do this move. Protect your king!")?
            }
            MoveError::CastleUnavailable { reason, .. } => {
                writeln!(self.output, "Cannot castle! ({})", reason)?
            }
            other => writeln!(self.output, "{}", other)?,
        }
        Ok(())
    }

    fn notify_hint(&mut self, piece: &Piece, mv: Move) -> Result<(), SessionError> {
        writeln!(
            self.output,
            "HINT! {} to {} can save you!",
            piece.kind,
            upper(mv.to())
        )?;
        Ok(())
    }

    fn show_board(&mut self, board: &Board) -> Result<(), SessionError> {
        write!(self.output, "{}", render(board, &self.display))?;
        Ok(())
    }
}
