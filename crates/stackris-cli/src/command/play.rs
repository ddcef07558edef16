use std::path::PathBuf;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use stackris_engine::{Board, COLS, PieceCatalog, PieceKind, ROWS};
use stackris_evaluator::{heuristic::WeightVector, move_selector::MoveSelector};

use crate::model::TrainedModel;

/// Hand-tuned fallback weights used when no model is supplied.
const DEFAULT_WEIGHTS: WeightVector =
    [0.510_066, -0.760_66, 0.356_63, 0.184_483, 0.1, 100_000.0];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Trained model JSON to play with
    #[arg(long)]
    model: Option<PathBuf>,
    /// Cap on placements
    #[arg(long)]
    move_cap: Option<u32>,
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
    /// Print the board after every placement
    #[arg(long)]
    show_board: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let weights = match &arg.model {
        Some(path) => {
            let model = TrainedModel::open(path)?;
            eprintln!(
                "Playing with model {:?} (training fitness {})",
                model.name, model.fitness
            );
            model.weights
        }
        None => DEFAULT_WEIGHTS,
    };
    let selector = MoveSelector::new(weights);
    let mut rng = match arg.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    };

    let mut board = Board::new(PieceCatalog::standard());
    while arg.move_cap.is_none_or(|cap| board.turn_number() < cap) {
        let piece: PieceKind = rng.random();
        let mv = selector.pick_move(&board, piece);
        if board.try_place(piece, mv).is_err() {
            break;
        }
        if arg.show_board {
            eprintln!(
                "Turn {} ({piece:?} -> orientation {}, slot {}):",
                board.turn_number(),
                mv.orientation,
                mv.slot
            );
            eprintln!("{}", render(&board));
        }
    }

    eprintln!("Game over after {} placement(s).", board.turn_number());
    eprintln!("Rows cleared:");
    println!("{}", board.rows_cleared());
    Ok(())
}

fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in (0..ROWS).rev() {
        for col in 0..COLS {
            out.push(if board.is_occupied(row, col) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
