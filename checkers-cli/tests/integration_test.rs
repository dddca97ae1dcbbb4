//! Integration tests for the checkers engine and agents
//!
//! Tests the full stack: board rules, capture chains, game end and the
//! search agents playing whole games against each other.

use checkers_core::{
    ai::{Agent, AlphaBetaAI, MinimaxAI, RandomAI},
    board::Square,
    eval::EvalKind,
    game::Board,
    pieces::{Piece, PieceKind, Player},
};
use std::time::{Duration, Instant};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Drive a game to the end (or a ply cap) with the given agents
fn play_out(board: &mut Board, red: &mut dyn Agent, white: &mut dyn Agent, cap: usize) -> usize {
    let mut plies = 0;
    while !board.is_over() && plies < cap {
        let agent: &mut dyn Agent = match board.turn() {
            Player::Red => red,
            Player::White => white,
        };
        match agent.choose_move(board) {
            Some(mv) => {
                board.apply_move(&mv);
                plies += 1;
            }
            None => break,
        }
    }
    plies
}

// ============================================================================
// RULES ACROSS WHOLE GAMES
// ============================================================================

#[test]
fn test_random_game_keeps_board_consistent() {
    let mut board = Board::new(8).unwrap();
    let mut red = RandomAI::with_seed(11);
    let mut white = RandomAI::with_seed(12);

    let mut plies = 0;
    while !board.is_over() && plies < 150 {
        let agent: &mut dyn Agent = match board.turn() {
            Player::Red => &mut red,
            Player::White => &mut white,
        };
        let mv = match agent.choose_move(&board) {
            Some(m) => m,
            None => break,
        };
        board.apply_move(&mv);
        plies += 1;

        // Caches mirror the grid after every single move
        for player in [Player::Red, Player::White] {
            for &sq in board.pieces(player) {
                let piece = board.piece_at(sq).expect("cache entry on empty square");
                assert_eq!(piece.owner, player);
            }
        }
        // Captured squares are really empty
        for &sq in &mv.captures {
            assert!(board.piece_at(sq).is_none());
        }
    }

    assert!(plies > 0);
}

#[test]
fn test_kings_never_revert() {
    let mut board = Board::new(6).unwrap();
    let mut red = RandomAI::with_seed(21);
    let mut white = RandomAI::with_seed(22);

    let mut kinged: Vec<(Player, Square)> = Vec::new();
    let mut plies = 0;
    while !board.is_over() && plies < 120 {
        let agent: &mut dyn Agent = match board.turn() {
            Player::Red => &mut red,
            Player::White => &mut white,
        };
        let mv = match agent.choose_move(&board) {
            Some(m) => m,
            None => break,
        };
        let mover = board.turn();
        board.apply_move(&mv);
        plies += 1;

        // Track where kings stand; once a piece is a king it stays one
        kinged.retain(|&(owner, sq)| {
            if sq == mv.origin && board.piece_at(mv.destination).map(|p| p.owner) == Some(owner) {
                return false; // moved, re-added below if still tracked
            }
            board.piece_at(sq).is_some()
        });
        if let Some(piece) = board.piece_at(mv.destination) {
            if piece.kind == PieceKind::King {
                assert_eq!(piece.owner, mover);
                kinged.push((piece.owner, mv.destination));
            }
        }
        for &(owner, sq) in &kinged {
            let piece = board.piece_at(sq).unwrap();
            assert_eq!(piece.kind, PieceKind::King, "king reverted at {:?}", sq);
            assert_eq!(piece.owner, owner);
        }
    }
}

// ============================================================================
// SEARCH AGENTS
// ============================================================================

#[test]
fn test_alphabeta_vs_random_full_game() {
    let mut board = Board::new(6).unwrap();
    let mut red = AlphaBetaAI::new(3, EvalKind::Positional);
    let mut white = RandomAI::with_seed(31);

    let plies = play_out(&mut board, &mut red, &mut white, 120);
    assert!(plies > 0, "game should progress");
    assert!(board.is_over() || plies == 120);
}

#[test]
fn test_minimax_vs_alphabeta_agree_on_values() {
    // Walk a short scripted game and cross-check the two searches at
    // every position along the way
    let mut board = Board::new(6).unwrap();
    let mut driver = RandomAI::with_seed(41);

    let minimax = MinimaxAI::new(3, EvalKind::PieceValue);
    let mut alphabeta = AlphaBetaAI::new(3, EvalKind::PieceValue);

    for _ in 0..8 {
        assert_eq!(
            alphabeta.value(&board, 3),
            minimax.value(&board, 3),
            "searches disagree on:\n{}",
            board
        );
        match driver.choose_move(&board) {
            Some(mv) => board.apply_move(&mv),
            None => break,
        }
    }
}

#[test]
fn test_alphabeta_finds_forced_win() {
    // Red king can jump the lone white man; search at any depth >= 1
    // must see the win
    let mut board = Board::empty(8).unwrap();
    board.place(Square::new(2, 5), Piece::king(Player::Red));
    board.place(Square::new(3, 4), Piece::man(Player::White));

    let mut ai = AlphaBetaAI::new(2, EvalKind::PieceValue);
    let mv = ai.choose_move(&board).expect("red has moves");
    assert_eq!(mv.captures, vec![Square::new(3, 4)]);

    board.apply_move(&mv);
    assert!(board.is_over());
    assert_eq!(board.find_winner(), Some(Player::Red));
}

#[test]
fn test_timed_search_plays_promptly() {
    let board = Board::new(8).unwrap();
    let mut ai = AlphaBetaAI::timed(8, Duration::from_millis(100), EvalKind::PieceValue);

    let start = Instant::now();
    let mv = ai.choose_move(&board);
    let elapsed = start.elapsed();

    assert!(mv.is_some());
    // The budget is nominal: a pass in flight at the deadline runs to
    // completion. It still must not balloon toward the untimed cost of
    // depth 8 on a full board.
    assert!(elapsed < Duration::from_secs(20), "took {:?}", elapsed);
}

#[test]
fn test_fixed_depth_games_replay_exactly() {
    // With jitter off and fixed seeds the whole pipeline is
    // deterministic, so two runs of the same matchup transcribe the
    // same game
    let run = || {
        let mut board = Board::new(6).unwrap();
        let mut red = AlphaBetaAI::new(3, EvalKind::Positional);
        let mut white = AlphaBetaAI::new(2, EvalKind::PieceValue);
        let plies = play_out(&mut board, &mut red, &mut white, 80);
        (plies, board.find_winner(), format!("{}", board))
    };

    assert_eq!(run(), run());
}
