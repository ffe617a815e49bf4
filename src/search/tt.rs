use cozy_chess::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: i32,
    pub best: Option<Move>,
    pub bound: Bound,
}

/// Lifetime policy for the table across driver invocations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TtLifetime {
    /// Keep entries across move decisions for the whole game.
    #[default]
    Persistent,
    /// Clear at the start of every move decision.
    PerMove,
}

const DEFAULT_ENTRIES: usize = 1 << 16;

/// Fixed-capacity transposition table. One entry per slot, always-replace on
/// store: a new write at a slot evicts whatever was there, regardless of
/// depth. A miss is a normal outcome, never an error.
pub struct Tt {
    slots: Vec<Option<Entry>>,
}

impl Default for Tt {
    fn default() -> Self {
        Self::with_capacity_entries(DEFAULT_ENTRIES)
    }
}

impl Tt {
    pub fn with_capacity_entries(entries: usize) -> Self {
        Self { slots: vec![None; entries.max(1)] }
    }

    pub fn with_capacity_mb(mb: usize) -> Self {
        // ~64 bytes per entry
        let entries = ((mb.saturating_mul(1024) * 1024) / 64).max(1);
        Self::with_capacity_entries(entries)
    }

    fn index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        let e = self.slots[self.index(key)]?;
        (e.key == key).then_some(e)
    }

    /// Stored best move for ordering, usable at any depth.
    pub fn hint(&self, key: u64) -> Option<Move> {
        self.get(key).and_then(|e| e.best)
    }

    /// A stored result is usable only if it was searched at least as deep as
    /// the query and its bound is conclusive for the current window: EXACT
    /// always, LOWER when it fails high, UPPER when it fails low.
    pub fn lookup(&self, key: u64, depth: u32, alpha: i32, beta: i32) -> Option<(i32, Option<Move>)> {
        let e = self.get(key)?;
        if e.depth < depth {
            return None;
        }
        let usable = match e.bound {
            Bound::Exact => true,
            Bound::Lower => e.score >= beta,
            Bound::Upper => e.score <= alpha,
        };
        usable.then_some((e.score, e.best))
    }

    pub fn store(&mut self, entry: Entry) {
        let idx = self.index(entry.key);
        self.slots[idx] = Some(entry);
    }
}
