use cozy_chess::{BitBoard, Board, Color, Piece};

use crate::board::Position;

const PAWN: i32 = 100;
const KNIGHT: i32 = 320;
const BISHOP: i32 = 330;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;

// Mate scores live in a reserved band far above any material score, scaled
// by distance so nearer mates dominate.
pub const MATE_SCORE: i32 = 30_000;
pub const DRAW_SCORE: i32 = 0;
const MATE_BAND: i32 = MATE_SCORE - 1_000;

/// Score for the side to move when it is checkmated `ply` plies from the root.
pub fn mated_in(ply: i32) -> i32 {
    -MATE_SCORE + ply
}

pub fn is_mate_score(cp: i32) -> bool {
    cp.abs() >= MATE_BAND
}

/// Static evaluator contract: centipawns from the side-to-move perspective,
/// deterministic, no side effects. Term weights are a pluggable strategy.
pub trait Evaluate {
    fn eval_cp(&self, pos: &Position) -> i32;
}

// Indexed by relative rank (rank 6 is one step from promotion).
const PASSED_PAWN_BONUS: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];
// Indexed by the number of isolated pawns a side has.
const ISOLATED_PAWN_PENALTY: [i32; 9] = [0, -10, -25, -50, -75, -75, -75, -75, -75];
const KING_SHIELD_BONUS: i32 = 6;

/// Material plus pawn structure and king pawn shield.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialEval;

impl Evaluate for MaterialEval {
    fn eval_cp(&self, pos: &Position) -> i32 {
        let board = pos.board();
        let score = side_score(board, Color::White) - side_score(board, Color::Black);
        if board.side_to_move() == Color::White {
            score
        } else {
            -score
        }
    }
}

/// Convenience entry point for the default evaluator.
pub fn eval_cp(pos: &Position) -> i32 {
    MaterialEval.eval_cp(pos)
}

fn side_score(board: &Board, color: Color) -> i32 {
    let us = board.colors(color);
    let mut score = (us & board.pieces(Piece::Pawn)).len() as i32 * PAWN
        + (us & board.pieces(Piece::Knight)).len() as i32 * KNIGHT
        + (us & board.pieces(Piece::Bishop)).len() as i32 * BISHOP
        + (us & board.pieces(Piece::Rook)).len() as i32 * ROOK
        + (us & board.pieces(Piece::Queen)).len() as i32 * QUEEN;

    let my_pawns = us & board.pieces(Piece::Pawn);
    let their_pawns = board.colors(!color) & board.pieces(Piece::Pawn);

    let mut file_counts = [0u8; 8];
    for sq in my_pawns {
        file_counts[sq.file() as usize] += 1;
    }

    let mut isolated = 0usize;
    for sq in my_pawns {
        let rank = sq.rank() as usize;
        let rel_rank = if color == Color::White { rank } else { 7 - rank };
        if is_passed(sq, color, their_pawns) {
            score += PASSED_PAWN_BONUS[rel_rank];
        }
        let file = sq.file() as usize;
        let left = file > 0 && file_counts[file - 1] > 0;
        let right = file < 7 && file_counts[file + 1] > 0;
        if !left && !right {
            isolated += 1;
        }
    }
    score += ISOLATED_PAWN_PENALTY[isolated.min(8)];

    score += king_shield(board, color, my_pawns);
    score
}

fn is_passed(sq: cozy_chess::Square, color: Color, their_pawns: BitBoard) -> bool {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    for opp in their_pawns {
        if (opp.file() as i32 - file).abs() > 1 {
            continue;
        }
        let ahead = match color {
            Color::White => (opp.rank() as i32) > rank,
            Color::Black => (opp.rank() as i32) < rank,
        };
        if ahead {
            return false;
        }
    }
    true
}

fn king_shield(board: &Board, color: Color, my_pawns: BitBoard) -> i32 {
    let king = board.king(color);
    let kf = king.file() as i32;
    let kr = king.rank() as i32;
    let mut shield = 0;
    for sq in my_pawns {
        if (sq.file() as i32 - kf).abs() > 1 {
            continue;
        }
        let forward = match color {
            Color::White => sq.rank() as i32 - kr,
            Color::Black => kr - sq.rank() as i32,
        };
        if (1..=2).contains(&forward) {
            shield += KING_SHIELD_BONUS;
        }
    }
    shield
}
