use skirmish::board::Position;
use skirmish::search::alphabeta::Searcher;
use skirmish::search::eval::eval_cp;

#[test]
fn qsearch_improves_tactical_position() {
    // Hanging queen vs bishop: for black to move, taking the queen must beat
    // standing pat.
    let pos = Position::from_fen("4k3/8/8/8/5Q2/8/8/2b4K b - - 0 1").unwrap();
    let mut s = Searcher::default();
    let stand = eval_cp(&pos);
    let qs = s.qsearch_eval_cp(&pos);
    assert!(qs > stand, "qsearch should improve eval: qs {qs} vs stand {stand}");
}

#[test]
fn qsearch_equals_standpat_without_captures() {
    let pos = Position::from_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();
    let mut s = Searcher::default();
    assert_eq!(s.qsearch_eval_cp(&pos), eval_cp(&pos));
}

#[test]
fn standpat_is_a_floor() {
    // Quiescence never reports a position as worse than stopping immediately.
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        "k7/8/8/8/8/8/3qQ3/7K w - - 0 1",
        "4k3/8/8/8/5Q2/8/8/2b4K b - - 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        let mut s = Searcher::default();
        let stand = eval_cp(&pos);
        let qs = s.qsearch_eval_cp(&pos);
        assert!(qs >= stand, "stand-pat floor violated on {fen}: qs {qs} < stand {stand}");
    }
}

#[test]
fn qsearch_resolves_a_capture_chain() {
    // cxd5 looks like a free pawn until the c6 recapture; the chain must be
    // played out instead of counting the first capture as clean.
    let pos = Position::from_fen("4k3/8/2p5/3p4/2P5/8/8/4K3 w - - 0 1").unwrap();
    let mut s = Searcher::default();
    let qs = s.qsearch_eval_cp(&pos);
    let stand = eval_cp(&pos);
    assert!(qs >= stand);
    assert!(qs - stand < 100, "capture chain mis-scored: qs {qs} vs stand {stand}");
}
