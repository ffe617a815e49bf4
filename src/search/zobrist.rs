use cozy_chess::{Board, Color, Piece};
use std::sync::OnceLock;

// Key layout: 12 piece-square tables, one side-to-move key, one key per
// (color, wing) castling right, one key per en-passant file.
const PIECE_KEYS: usize = 12 * 64;
const CASTLE_KEYS: usize = 4;
const EP_KEYS: usize = 8;
const TOTAL_KEYS: usize = PIECE_KEYS + 1 + CASTLE_KEYS + EP_KEYS;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<[u64; TOTAL_KEYS]> = OnceLock::new();

fn table() -> &'static [u64; TOTAL_KEYS] {
    TABLE.get_or_init(|| {
        let mut t = [0u64; TOTAL_KEYS];
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

fn piece_index(color: Color, piece: Piece) -> usize {
    let c = if color == Color::White { 0 } else { 1 };
    c * 6 + piece as usize
}

/// Structural fingerprint of a position. Two boards reached by different
/// move orders hash equally iff placement, side to move, castling rights and
/// en-passant file all match.
pub fn compute(board: &Board) -> u64 {
    let t = table();
    let mut key = 0u64;
    for &color in &[Color::White, Color::Black] {
        for &piece in &Piece::ALL {
            let bb = board.colors(color) & board.pieces(piece);
            for sq in bb {
                key ^= t[piece_index(color, piece) * 64 + sq as usize];
            }
        }
    }
    if board.side_to_move() == Color::Black {
        key ^= t[PIECE_KEYS];
    }
    for &color in &[Color::White, Color::Black] {
        let rights = board.castle_rights(color);
        let base = PIECE_KEYS + 1 + if color == Color::White { 0 } else { 2 };
        if rights.short.is_some() {
            key ^= t[base];
        }
        if rights.long.is_some() {
            key ^= t[base + 1];
        }
    }
    if let Some(file) = board.en_passant() {
        key ^= t[PIECE_KEYS + 1 + CASTLE_KEYS + file as usize];
    }
    key
}
