//! Match command - play a series of games and aggregate results

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use checkers_core::{Board, Control, Player};

use crate::agents::{build_agent, parse_eval, AgentOptions};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Red agent (random | minimax | alphabeta)
    #[arg(long, default_value = "alphabeta")]
    pub red: String,

    /// White agent (random | minimax | alphabeta)
    #[arg(long, default_value = "random")]
    pub white: String,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board size (must be even)
    #[arg(long, default_value = "8")]
    pub size: usize,

    /// Search depth for minimax/alphabeta
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Static evaluation variant (piece-value | positional)
    #[arg(long, default_value = "piece-value")]
    pub eval: String,

    /// Abort a game after this many plies
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: Option<Player>,
    plies: usize,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    white_wins: usize,
    unfinished: usize,
    avg_plies: f32,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: {} (red) vs {} (white), {} games, depth={}",
        args.red,
        args.white,
        args.games,
        args.depth
    );

    let results = play_match(&args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

/// Master RNG driving per-game agent seeds; a fixed seed replays the
/// whole match
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Play all games in the match
fn play_match(args: &MatchArgs, seed: Option<u64>) -> Result<MatchResults> {
    let eval = parse_eval(&args.eval)?;
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Fresh agents per game, seeded from the master RNG so games
        // differ but the match replays exactly under the same --seed
        let opts = AgentOptions {
            depth: args.depth,
            time_ms: None,
            eval,
            jitter: 0.0,
            seed: rng.gen(),
        };
        let record = play_single_game(args, &opts, game_num + 1)?;

        tracing::info!(
            "Game {}: {:?} ({} plies)",
            record.game_number,
            record.winner,
            record.plies
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Play one game between freshly built agents
fn play_single_game(args: &MatchArgs, opts: &AgentOptions, game_number: usize) -> Result<GameRecord> {
    let mut red = build_agent(&args.red, opts)?;
    let white_opts = AgentOptions { seed: opts.seed.wrapping_add(1), ..*opts };
    let mut white = build_agent(&args.white, &white_opts)?;

    let mut board = Board::new(args.size)?;
    board.set_player(Player::Red, Control::Bot);
    board.set_player(Player::White, Control::Bot);

    let mut plies = 0;
    while !board.is_over() && plies < args.max_moves {
        let agent = match board.turn() {
            Player::Red => &mut red,
            Player::White => &mut white,
        };
        match agent.choose_move(&board) {
            Some(mv) => {
                board.apply_move(&mv);
                plies += 1;
            }
            None => break,
        }
    }

    Ok(GameRecord {
        game_number,
        winner: board.find_winner(),
        plies,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let red_wins = games.iter().filter(|g| g.winner == Some(Player::Red)).count();
    let white_wins = games.iter().filter(|g| g.winner == Some(Player::White)).count();
    let unfinished = games.iter().filter(|g| g.winner.is_none()).count();

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        red_wins,
        white_wins,
        unfinished,
        avg_plies,
    }
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// REPORTING
// ============================================================================

fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<String>,
        plies: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        white_wins: usize,
        unfinished: usize,
        avg_plies: f32,
        red_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        red_wins: results.red_wins,
        white_wins: results.white_wins,
        unfinished: results.unfinished,
        avg_plies: results.avg_plies,
        red_win_rate: if total > 0 {
            results.red_wins as f32 / total as f32
        } else {
            0.0
        },
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner.map(|w| format!("{:?}", w)),
                plies: g.plies,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();
    let pct = |n: usize| {
        if total > 0 {
            n as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("Red wins:    {} ({:.1}%)", results.red_wins, pct(results.red_wins));
    println!("White wins:  {} ({:.1}%)", results.white_wins, pct(results.white_wins));
    println!("Unfinished:  {} ({:.1}%)", results.unfinished, pct(results.unfinished));
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        match game.winner {
            Some(winner) => println!("  Game {}: {:?} in {} plies", game.game_number, winner, game.plies),
            None => println!("  Game {}: unfinished after {} plies", game.game_number, game.plies),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_match_rng_replays() {
        let mut a = create_rng(Some(7));
        let mut b = create_rng(Some(7));
        let first: Vec<u64> = (0..5).map(|_| a.gen()).collect();
        let second: Vec<u64> = (0..5).map(|_| b.gen()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.red_wins, 0);
        assert_eq!(results.white_wins, 0);
        assert_eq!(results.unfinished, 0);
        assert_eq!(results.avg_plies, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            GameRecord { game_number: 1, winner: Some(Player::Red), plies: 10 },
            GameRecord { game_number: 2, winner: Some(Player::White), plies: 20 },
            GameRecord { game_number: 3, winner: None, plies: 30 },
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.red_wins, 1);
        assert_eq!(results.white_wins, 1);
        assert_eq!(results.unfinished, 1);
        assert_eq!(results.avg_plies, 20.0);
    }

    #[test]
    fn test_play_single_game_finishes() {
        let args = MatchArgs {
            red: "random".into(),
            white: "random".into(),
            games: 1,
            size: 6,
            depth: 2,
            eval: "piece-value".into(),
            max_moves: 60,
            json: false,
        };
        let opts = AgentOptions {
            depth: 2,
            time_ms: None,
            eval: checkers_core::EvalKind::PieceValue,
            jitter: 0.0,
            seed: 7,
        };

        let record = play_single_game(&args, &opts, 1).unwrap();
        assert!(record.plies > 0);
        assert!(record.plies <= 60);
    }
}
