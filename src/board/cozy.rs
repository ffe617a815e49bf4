use cozy_chess::{Board as CozyBoard, Color, Move, Piece};
use thiserror::Error;

use crate::search::zobrist;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}

/// Board adapter over cozy-chess. The search core only talks to positions
/// through this wrapper: legal move generation, reversible-by-value move
/// application, terminal predicates, and a stable 64-bit fingerprint.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b })
            .map_err(|e| BoardError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &CozyBoard {
        &self.board
    }

    pub fn fen(&self) -> String {
        format!("{}", self.board)
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Structural fingerprint: equal placement, side to move, castling and
    /// en-passant rights hash equally regardless of move order.
    pub fn hash(&self) -> u64 {
        zobrist::compute(&self.board)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| {
            for m in ml {
                moves.push(m);
            }
            false
        });
        moves
    }

    /// Loud moves for quiescence: captures plus promotions.
    pub fn legal_captures(&self) -> Vec<Move> {
        let mut moves = self.legal_moves();
        moves.retain(|&m| self.is_capture(m) || m.promotion.is_some());
        moves
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        if self.board.color_on(mv.to) == Some(!self.board.side_to_move()) {
            return true;
        }
        // En passant: a pawn changing file onto an empty square.
        self.board.piece_on(mv.from) == Some(Piece::Pawn)
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
    }

    /// The piece a capture removes (the en-passant victim is a pawn).
    /// None for quiet moves; castling is not a capture even though cozy-chess
    /// encodes it as king-takes-rook.
    pub fn victim_on(&self, mv: Move) -> Option<Piece> {
        if self.board.color_on(mv.to) == Some(!self.board.side_to_move()) {
            return self.board.piece_on(mv.to);
        }
        if self.is_capture(mv) {
            return Some(Piece::Pawn);
        }
        None
    }

    /// Apply a move generated for this position, returning the child. The
    /// parent is left untouched, so "undo" is dropping the child.
    pub fn apply(&self, mv: Move) -> Position {
        let mut child = self.board.clone();
        child.play(mv);
        Self { board: child }
    }

    /// Apply an externally-supplied move; rejects illegal moves instead of
    /// panicking.
    pub fn try_apply(&self, mv: Move) -> Result<Position, BoardError> {
        let mut child = self.board.clone();
        child
            .try_play(mv)
            .map_err(|_| BoardError::IllegalMove { mv: format!("{}", mv), fen: self.fen() })?;
        Ok(Self { board: child })
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), BoardError> {
        let mv = mv_uci
            .parse::<Move>()
            .map_err(|_| BoardError::IllegalMove { mv: mv_uci.to_string(), fen: self.fen() })?;
        *self = self.try_apply(mv)?;
        Ok(())
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Draws detectable from the position alone: stalemate, the 50-move rule,
    /// and king-vs-king(-plus-one-minor) material.
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.is_rule_draw()
    }

    /// Rule draws that need no move generation: 50-move rule and dead
    /// material.
    pub fn is_rule_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100 || self.insufficient_material()
    }

    fn insufficient_material(&self) -> bool {
        let pawns = self.board.pieces(Piece::Pawn);
        let majors = self.board.pieces(Piece::Rook) | self.board.pieces(Piece::Queen);
        if !pawns.is_empty() || !majors.is_empty() {
            return false;
        }
        let minors = self.board.pieces(Piece::Knight) | self.board.pieces(Piece::Bishop);
        minors.len() <= 1
    }
}
