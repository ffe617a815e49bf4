use std::time::{Duration, Instant};

use cozy_chess::Move;
use log::debug;

use crate::board::Position;
use crate::search::eval::{self, Evaluate, MaterialEval, DRAW_SCORE, MATE_SCORE};
use crate::search::ordering::{self, HistoryTable};
use crate::search::tt::{Bound, Entry, Tt, TtLifetime};

/// Limits and toggles for one move decision.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// Maximum iterative-deepening depth.
    pub depth: u32,
    /// Wall-clock budget; depth 1 always completes regardless.
    pub movetime: Option<Duration>,
    pub max_nodes: Option<u64>,
    pub use_tt: bool,
    pub tt_lifetime: TtLifetime,
    /// Extra plies quiescence may extend beyond the horizon.
    pub qsearch_depth: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 6,
            movetime: None,
            max_nodes: None,
            use_tt: true,
            tt_lifetime: TtLifetime::default(),
            qsearch_depth: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    /// None iff the root position is already terminal.
    pub bestmove: Option<Move>,
    pub score_cp: i32,
    pub nodes: u64,
    /// Deepest fully completed iteration this result came from.
    pub depth: u32,
}

// Cooperative cancellation: raised by the periodic budget check and
// propagated up through return values. Only the driver interprets it.
struct Aborted;

const TIME_CHECK_INTERVAL: u64 = 1024;
const MAX_PLY: usize = 128;

pub struct Searcher {
    tt: Tt,
    eval: Box<dyn Evaluate>,
    nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    use_tt: bool,
    qsearch_depth: u32,
    killers: Vec<[Option<Move>; 2]>,
    history: HistoryTable,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Box::new(MaterialEval))
    }
}

impl Searcher {
    pub fn new(eval: Box<dyn Evaluate>) -> Self {
        Self {
            tt: Tt::default(),
            eval,
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            use_tt: true,
            qsearch_depth: 8,
            killers: vec![[None; 2]; MAX_PLY],
            history: HistoryTable::new(),
        }
    }

    pub fn set_tt_capacity_mb(&mut self, mb: usize) {
        self.tt = Tt::with_capacity_mb(mb);
    }

    /// Force every probe to miss; the table is a cache, so results must not
    /// depend on it.
    pub fn set_use_tt(&mut self, use_tt: bool) {
        self.use_tt = use_tt;
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    pub fn tt_probe(&self, pos: &Position) -> Option<Entry> {
        self.tt.get(pos.hash())
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Iterative deepening driver: search depth 1, 2, ... until the depth
    /// cap or the budget is hit. An aborted iteration is discarded; the
    /// answer always comes from the last fully completed depth.
    pub fn search(&mut self, pos: &Position, params: SearchParams) -> SearchResult {
        self.nodes = 0;
        self.use_tt = params.use_tt;
        self.qsearch_depth = params.qsearch_depth;
        if params.tt_lifetime == TtLifetime::PerMove {
            self.tt.clear();
        }
        self.killers = vec![[None; 2]; MAX_PLY];
        self.history.clear();

        // Depth 1 runs unbudgeted so a non-terminal root always yields a move.
        self.deadline = None;
        self.node_limit = u64::MAX;
        let mut best = match self.root_search(pos, 1) {
            Ok(r) => r,
            Err(Aborted) => unreachable!("depth 1 runs without limits"),
        };
        if best.bestmove.is_none() {
            // Terminal root: report the terminal score, no move to give.
            best.nodes = self.nodes;
            return best;
        }
        debug!("depth 1 score {} nodes {}", best.score_cp, self.nodes);

        self.deadline = params.movetime.map(|d| Instant::now() + d);
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        for d in 2..=params.depth {
            if self.budget_exhausted() {
                break;
            }
            match self.root_search(pos, d) {
                Ok(r) => {
                    debug!("depth {} score {} nodes {}", d, r.score_cp, self.nodes);
                    best = r;
                }
                Err(Aborted) => {
                    debug!("depth {} aborted, keeping depth {}", d, best.depth);
                    break;
                }
            }
        }
        best.nodes = self.nodes;
        best
    }

    /// Fixed-depth search with no budget, for tests and benches.
    pub fn search_depth(&mut self, pos: &Position, depth: u32) -> SearchResult {
        self.deadline = None;
        self.node_limit = u64::MAX;
        match self.root_search(pos, depth.max(1)) {
            Ok(r) => r,
            Err(Aborted) => unreachable!("unbudgeted search cannot abort"),
        }
    }

    /// Full-window quiescence score of a position.
    pub fn qsearch_eval_cp(&mut self, pos: &Position) -> i32 {
        match self.qsearch(pos, -MATE_SCORE, MATE_SCORE, 0) {
            Ok(v) => v,
            Err(Aborted) => self.eval.eval_cp(pos),
        }
    }

    fn budget_exhausted(&self) -> bool {
        if self.nodes >= self.node_limit {
            return true;
        }
        matches!(self.deadline, Some(dl) if Instant::now() >= dl)
    }

    fn root_search(&mut self, pos: &Position, depth: u32) -> Result<SearchResult, Aborted> {
        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            let score = if pos.in_check() { eval::mated_in(0) } else { DRAW_SCORE };
            return Ok(SearchResult { bestmove: None, score_cp: score, nodes: self.nodes, depth });
        }

        let key = pos.hash();
        let hint = if self.use_tt { self.tt.hint(key) } else { None };
        let killers = self.killers[0];
        ordering::order_moves(pos, &mut moves, hint, &killers, &self.history);

        let mut alpha = -MATE_SCORE;
        let beta = MATE_SCORE;
        let mut best_score = -MATE_SCORE;
        let mut bestmove = None;
        for m in moves {
            let child = pos.apply(m);
            let score = -self.alphabeta(&child, depth - 1, -beta, -alpha, 1)?;
            if score > best_score {
                best_score = score;
                bestmove = Some(m);
            }
            if score > alpha {
                alpha = score;
            }
        }

        if self.use_tt {
            // Full window at the root, so the result is exact. This entry
            // seeds move ordering for the next iteration.
            self.tt.store(Entry { key, depth, score: best_score, best: bestmove, bound: Bound::Exact });
        }
        Ok(SearchResult { bestmove, score_cp: best_score, nodes: self.nodes, depth })
    }

    fn alphabeta(
        &mut self,
        pos: &Position,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> Result<i32, Aborted> {
        self.tick()?;

        if pos.is_rule_draw() {
            return Ok(DRAW_SCORE);
        }

        // A usable cached result answers the node before any move generation.
        let key = pos.hash();
        if self.use_tt {
            if let Some((score, _)) = self.tt.lookup(key, depth, alpha, beta) {
                return Ok(score);
            }
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            // Nearer mates score higher in magnitude.
            return Ok(if pos.in_check() { eval::mated_in(ply) } else { DRAW_SCORE });
        }

        // Horizon: resolve loud lines instead of trusting the static eval.
        if depth == 0 {
            return self.qsearch(pos, alpha, beta, 0);
        }

        let hint = if self.use_tt { self.tt.hint(key) } else { None };
        let killers = self.killer_slot(ply);
        ordering::order_moves(pos, &mut moves, hint, &killers, &self.history);

        let orig_alpha = alpha;
        let mut best = -MATE_SCORE;
        let mut best_move = None;
        for m in moves {
            let child = pos.apply(m);
            let score = -self.alphabeta(&child, depth - 1, -beta, -alpha, ply + 1)?;
            if score > best {
                best = score;
                best_move = Some(m);
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                // Beta cutoff: remember the refutation for later ordering.
                if !pos.is_capture(m) {
                    self.update_killers(ply, m);
                    self.history.bump(m, depth);
                }
                break;
            }
        }

        if self.use_tt {
            let bound = if best >= beta {
                Bound::Lower
            } else if best <= orig_alpha {
                Bound::Upper
            } else {
                Bound::Exact
            };
            self.tt.store(Entry { key, depth, score: best, best: best_move, bound });
        }
        Ok(best)
    }

    // Resolve capture chains before trusting the static eval. Stand pat is a
    // floor: the side to move may always decline to capture.
    fn qsearch(&mut self, pos: &Position, mut alpha: i32, beta: i32, qply: u32) -> Result<i32, Aborted> {
        self.tick()?;

        let stand = self.eval.eval_cp(pos);
        if stand >= beta {
            return Ok(beta);
        }
        if stand > alpha {
            alpha = stand;
        }
        if qply >= self.qsearch_depth {
            return Ok(alpha);
        }

        let mut caps = pos.legal_captures();
        ordering::order_captures(pos, &mut caps);
        for m in caps {
            let child = pos.apply(m);
            let score = -self.qsearch(&child, -beta, -alpha, qply + 1)?;
            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }
        Ok(alpha)
    }

    fn tick(&mut self) -> Result<(), Aborted> {
        self.nodes += 1;
        if self.nodes >= self.node_limit {
            return Err(Aborted);
        }
        if self.nodes % TIME_CHECK_INTERVAL == 0 {
            if let Some(dl) = self.deadline {
                if Instant::now() >= dl {
                    return Err(Aborted);
                }
            }
        }
        Ok(())
    }

    fn killer_slot(&self, ply: i32) -> [Option<Move>; 2] {
        let p = ply as usize;
        if p < self.killers.len() {
            self.killers[p]
        } else {
            [None, None]
        }
    }

    fn update_killers(&mut self, ply: i32, m: Move) {
        let p = ply as usize;
        if p >= self.killers.len() {
            return;
        }
        let slot = &mut self.killers[p];
        if slot[0] == Some(m) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(m);
    }
}
