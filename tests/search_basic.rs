use skirmish::board::Position;
use skirmish::search::alphabeta::Searcher;

#[test]
fn startpos_depth1_returns_one_of_twenty_moves() {
    let pos = Position::startpos();
    let mut searcher = Searcher::default();
    let res = searcher.search_depth(&pos, 1);
    let mv = res.bestmove.expect("no move found at depth 1");
    assert!(pos.legal_moves().contains(&mv), "bestmove {} is not legal", mv);
    assert_eq!(pos.legal_moves().len(), 20);
    // Material-even, symmetric opening: score stays in a small band around 0.
    assert!(res.score_cp.abs() < 100, "startpos score out of band: {}", res.score_cp);
}

#[test]
fn search_prefers_winning_queen_capture() {
    // Qe2xd2 wins a queen outright.
    let pos = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").unwrap();
    let mut searcher = Searcher::default();
    let res = searcher.search_depth(&pos, 1);
    let mv = res.bestmove.expect("expected a best move");
    assert_eq!(format!("{}", mv), "e2d2", "expected Qe2xd2, got {}", mv);
    assert!(res.score_cp > 500, "winning a queen should score high: {}", res.score_cp);
}

#[test]
fn bestmove_is_legal_at_every_depth() {
    let pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
        .unwrap();
    let legal = pos.legal_moves();
    for depth in 1..=4 {
        let mut searcher = Searcher::default();
        let res = searcher.search_depth(&pos, depth);
        let mv = res.bestmove.expect("move expected");
        assert!(legal.contains(&mv), "illegal bestmove {} at depth {}", mv, depth);
        assert_eq!(res.depth, depth);
    }
}

#[test]
fn negamax_symmetry_on_mirrored_position() {
    // The second FEN is the first with colors swapped and ranks flipped; with
    // a side-symmetric evaluator both sides to move must see the same score.
    let white_view = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").unwrap();
    let black_view = Position::from_fen("7k/3Qq3/8/8/8/8/8/K7 b - - 0 1").unwrap();
    for depth in 1..=3 {
        let mut s1 = Searcher::default();
        let mut s2 = Searcher::default();
        let r1 = s1.search_depth(&white_view, depth);
        let r2 = s2.search_depth(&black_view, depth);
        assert_eq!(
            r1.score_cp, r2.score_cp,
            "mirrored scores diverge at depth {depth}: {} vs {}",
            r1.score_cp, r2.score_cp
        );
    }
}

#[test]
fn terminal_root_reports_no_move() {
    // Fool's mate: white is checkmated, side to move has no moves.
    let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(pos.is_checkmate());
    let mut searcher = Searcher::default();
    let res = searcher.search_depth(&pos, 3);
    assert!(res.bestmove.is_none(), "terminal root must not yield a move");
    assert!(res.score_cp < -20_000, "mated root should report a mate score: {}", res.score_cp);
}
