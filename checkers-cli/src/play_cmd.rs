//! Play command - a single game between two agents

use anyhow::Result;
use clap::Args;

use checkers_core::{Agent, Board, Control, Player};

use crate::agents::{build_agent, parse_eval, AgentOptions};

#[derive(Args)]
pub struct PlayArgs {
    /// Red agent (random | minimax | alphabeta)
    #[arg(long, default_value = "alphabeta")]
    pub red: String,

    /// White agent (random | minimax | alphabeta)
    #[arg(long, default_value = "random")]
    pub white: String,

    /// Board size (must be even)
    #[arg(long, default_value = "8")]
    pub size: usize,

    /// Search depth for minimax/alphabeta
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Per-move time budget in milliseconds (switches alphabeta to
    /// iterative deepening)
    #[arg(long)]
    pub time_ms: Option<u64>,

    /// Static evaluation variant (piece-value | positional)
    #[arg(long, default_value = "piece-value")]
    pub eval: String,

    /// Evaluation jitter scale for variety (alphabeta only)
    #[arg(long, default_value = "0.0")]
    pub jitter: f32,

    /// Abort the game after this many plies
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Print the board after every move
    #[arg(long)]
    pub show_board: bool,
}

/// Run a single game and report the outcome
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let eval = parse_eval(&args.eval)?;
    let opts = AgentOptions {
        depth: args.depth,
        time_ms: args.time_ms,
        eval,
        jitter: args.jitter,
        seed: seed.unwrap_or(42),
    };

    let mut red = build_agent(&args.red, &opts)?;
    // Offset the seed so two agents of the same kind do not mirror
    // each other's randomness
    let white_opts = AgentOptions { seed: opts.seed.wrapping_add(1), ..opts };
    let mut white = build_agent(&args.white, &white_opts)?;

    let mut board = Board::new(args.size)?;
    board.set_player(Player::Red, Control::Bot);
    board.set_player(Player::White, Control::Bot);

    tracing::info!(
        "Starting game: {} (red) vs {} (white), size={}, depth={}",
        args.red,
        args.white,
        args.size,
        args.depth
    );

    let plies = play_out(&mut board, red.as_mut(), white.as_mut(), args.max_moves, args.show_board);

    match board.find_winner() {
        Some(winner) => println!("{:?} wins after {} moves", winner, plies),
        None => println!("No winner after {} moves (move limit reached)", plies),
    }
    if args.show_board {
        println!("{}", board);
    }

    Ok(())
}

/// Drive the game loop; returns the number of plies played
fn play_out<'a>(
    board: &mut Board,
    red: &'a mut dyn Agent,
    white: &'a mut dyn Agent,
    max_moves: usize,
    show_board: bool,
) -> usize {
    let mut plies = 0;

    while !board.is_over() && plies < max_moves {
        let agent = match board.turn() {
            Player::Red => &mut *red,
            Player::White => &mut *white,
        };
        let mv = match agent.choose_move(board) {
            Some(m) => m,
            None => break,
        };

        tracing::info!(
            "move {}: {:?} {:?} -> {:?} ({} captured)",
            plies + 1,
            board.turn(),
            mv.origin,
            mv.destination,
            mv.captures.len()
        );

        board.apply_move(&mv);
        plies += 1;

        if show_board {
            println!("{}", board);
        }
    }

    plies
}
