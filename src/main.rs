use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::time::Duration;

use skirmish::board::Position;
use skirmish::search::alphabeta::{SearchParams, SearchResult, Searcher};
use skirmish::search::tt::TtLifetime;

#[derive(Parser, Debug)]
#[command(author, version, about = "Alpha-beta chess engine", long_about = None)]
struct Args {
    /// Starting FEN (standard start position if omitted)
    #[arg(long)]
    fen: Option<String>,

    /// Maximum search depth
    #[arg(long, default_value_t = 6)]
    depth: u32,

    /// Time budget per move in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Transposition table size in MB
    #[arg(long, default_value_t = 16)]
    tt_mb: usize,

    /// Clear the transposition table before every move decision
    #[arg(long)]
    fresh_tt: bool,

    /// Play the engine against itself until the game ends
    #[arg(long)]
    selfplay: bool,

    /// Move cap for selfplay
    #[arg(long, default_value_t = 200)]
    max_moves: u32,

    /// Emit the analysis result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    bestmove: Option<String>,
    score_cp: i32,
    depth: u32,
    nodes: u64,
}

impl From<&SearchResult> for Summary {
    fn from(r: &SearchResult) -> Self {
        Self {
            bestmove: r.bestmove.map(|m| format!("{}", m)),
            score_cp: r.score_cp,
            depth: r.depth,
            nodes: r.nodes,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let pos = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };

    let mut searcher = Searcher::default();
    searcher.set_tt_capacity_mb(args.tt_mb);
    let params = SearchParams {
        depth: args.depth,
        movetime: args.movetime_ms.map(Duration::from_millis),
        tt_lifetime: if args.fresh_tt { TtLifetime::PerMove } else { TtLifetime::Persistent },
        ..Default::default()
    };

    if args.selfplay {
        selfplay(pos, &mut searcher, params, args.max_moves)
    } else {
        analyze(&pos, &mut searcher, params, args.json)
    }
}

fn analyze(pos: &Position, searcher: &mut Searcher, params: SearchParams, json: bool) -> Result<()> {
    let result = searcher.search(pos, params);
    if json {
        println!("{}", serde_json::to_string(&Summary::from(&result))?);
        return Ok(());
    }
    match result.bestmove {
        Some(mv) => println!(
            "bestmove {} score {} cp depth {} nodes {}",
            mv, result.score_cp, result.depth, result.nodes
        ),
        None => println!("no move: position is terminal (score {} cp)", result.score_cp),
    }
    Ok(())
}

fn selfplay(mut pos: Position, searcher: &mut Searcher, params: SearchParams, max_moves: u32) -> Result<()> {
    for move_no in 1..=max_moves {
        if pos.is_checkmate() {
            println!("checkmate: {:?} wins", !pos.side_to_move());
            break;
        }
        if pos.is_stalemate() {
            println!("stalemate");
            break;
        }
        if pos.is_draw() {
            println!("draw");
            break;
        }

        let result = searcher.search(&pos, params);
        let Some(mv) = result.bestmove else {
            println!("no move available");
            break;
        };
        println!(
            "{:3}. {:?} plays {} (score {} cp, depth {}, nodes {})",
            move_no,
            pos.side_to_move(),
            mv,
            result.score_cp,
            result.depth,
            result.nodes
        );
        pos = pos.try_apply(mv)?;
    }
    println!("final: {}", pos.fen());
    Ok(())
}
