use std::time::{Duration, Instant};

use skirmish::board::Position;
use skirmish::search::alphabeta::{SearchParams, Searcher};

#[test]
fn movetime_returns_quickly_with_move() {
    let pos = Position::startpos();
    let mut searcher = Searcher::default();
    let params = SearchParams {
        depth: 12,
        movetime: Some(Duration::from_millis(10)),
        ..Default::default()
    };
    let t0 = Instant::now();
    let res = searcher.search(&pos, params);
    let elapsed = t0.elapsed();
    assert!(res.bestmove.is_some(), "no bestmove under movetime");
    assert!(elapsed < Duration::from_millis(500), "search exceeded budget: {:?}", elapsed);
}

#[test]
fn zero_budget_still_yields_a_legal_move() {
    // Depth 1 always completes, so even an exhausted clock produces the
    // depth-1 answer rather than nothing.
    let pos = Position::startpos();
    let mut searcher = Searcher::default();
    let params = SearchParams {
        depth: 10,
        movetime: Some(Duration::ZERO),
        ..Default::default()
    };
    let res = searcher.search(&pos, params);
    let mv = res.bestmove.expect("fallback move expected");
    assert!(pos.legal_moves().contains(&mv));
    assert_eq!(res.depth, 1, "only depth 1 can complete on a zero budget");
}

#[test]
fn aborted_depth_is_discarded() {
    // A node cap that trips mid-iteration must leave the last completed
    // depth's answer in place, not a partial one.
    let pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
        .unwrap();
    let mut unlimited = Searcher::default();
    let full = unlimited.search(&pos, SearchParams { depth: 2, ..Default::default() });

    let mut capped = Searcher::default();
    let nodes_for_depth2 = full.nodes;
    let res = capped.search(
        &pos,
        SearchParams {
            depth: 6,
            max_nodes: Some(nodes_for_depth2 + 1),
            ..Default::default()
        },
    );
    assert!(res.depth <= 2, "a capped search cannot report an unfinished depth");
    assert!(res.bestmove.is_some());
}

#[test]
fn completed_depths_are_monotonic() {
    let pos = Position::startpos();
    let mut searcher = Searcher::default();
    let res = searcher.search(&pos, SearchParams { depth: 4, ..Default::default() });
    assert_eq!(res.depth, 4, "unbudgeted search must complete the full depth");
    assert!(pos.legal_moves().contains(&res.bestmove.unwrap()));
}
