use cozy_chess::{Move, Piece};

use crate::board::Position;

// MVV-LVA: victim value dominates attacker value.
const MVV_LVA_FACTOR: i32 = 10;
// Keeps every capture ahead of every quiet-move heuristic score.
const CAPTURE_BASE: i32 = 10_000;
const PROMOTION_BONUS: i32 = 9_000;
const TT_MOVE_SCORE: i32 = 1_000_000;
const KILLER_PRIMARY: i32 = 900;
const KILLER_SECONDARY: i32 = 800;

// Coarse exchange values; the king is a cheap "attacker" but never a victim.
fn exchange_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight => 3,
        Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 9,
        Piece::King => 10,
    }
}

/// MVV-LVA score for a capture, None for quiet moves.
pub fn capture_score(pos: &Position, mv: Move) -> Option<i32> {
    let victim = pos.victim_on(mv)?;
    let attacker = pos.board().piece_on(mv.from)?;
    Some(CAPTURE_BASE + exchange_value(victim) * MVV_LVA_FACTOR - exchange_value(attacker))
}

/// Score used by quiescence: captures by MVV-LVA, promotions in the same band.
pub fn loud_score(pos: &Position, mv: Move) -> i32 {
    let mut score = capture_score(pos, mv).unwrap_or(0);
    if mv.promotion.is_some() {
        score += PROMOTION_BONUS;
    }
    score
}

/// From/to-square history counters for quiet-move ordering.
pub struct HistoryTable(Box<[[i32; 64]; 64]>);

impl HistoryTable {
    pub fn new() -> Self {
        Self(Box::new([[0; 64]; 64]))
    }

    pub fn clear(&mut self) {
        for row in self.0.iter_mut() {
            row.fill(0);
        }
    }

    pub fn get(&self, mv: Move) -> i32 {
        self.0[mv.from as usize][mv.to as usize]
    }

    pub fn bump(&mut self, mv: Move, depth: u32) {
        self.0[mv.from as usize][mv.to as usize] += (depth as i32) * (depth as i32);
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

fn score_move(
    pos: &Position,
    mv: Move,
    tt_move: Option<Move>,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }
    let mut score = loud_score(pos, mv);
    if killers[0] == Some(mv) {
        score += KILLER_PRIMARY;
    } else if killers[1] == Some(mv) {
        score += KILLER_SECONDARY;
    }
    score + history.get(mv)
}

/// Order best-guess-first: TT move, captures by MVV-LVA (promotions in the
/// same band), then quiets by killer/history score. The sort is stable, so
/// ties keep generation order and the ordering stays deterministic.
pub fn order_moves(
    pos: &Position,
    moves: &mut [Move],
    tt_move: Option<Move>,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) {
    moves.sort_by_key(|&m| -score_move(pos, m, tt_move, killers, history));
}

/// Quiescence ordering: loud moves only, highest MVV-LVA first.
pub fn order_captures(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&m| -loud_score(pos, m));
}
