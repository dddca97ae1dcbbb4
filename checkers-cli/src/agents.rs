//! Agent construction from command-line specs

use std::time::Duration;

use anyhow::{bail, Result};

use checkers_core::{Agent, AlphaBetaAI, EvalKind, MinimaxAI, RandomAI};

/// Search and evaluation options shared by both commands
#[derive(Clone, Copy, Debug)]
pub struct AgentOptions {
    pub depth: u32,
    pub time_ms: Option<u64>,
    pub eval: EvalKind,
    pub jitter: f32,
    pub seed: u64,
}

/// Parse an evaluation-variant name
pub fn parse_eval(name: &str) -> Result<EvalKind> {
    match name {
        "piece-value" => Ok(EvalKind::PieceValue),
        "positional" => Ok(EvalKind::Positional),
        other => bail!("unknown eval variant '{}' (expected piece-value or positional)", other),
    }
}

/// Build an agent from its command-line name
pub fn build_agent(spec: &str, opts: &AgentOptions) -> Result<Box<dyn Agent>> {
    match spec {
        "random" => Ok(Box::new(RandomAI::with_seed(opts.seed))),
        "minimax" => Ok(Box::new(MinimaxAI::new(opts.depth, opts.eval))),
        "alphabeta" => {
            let mut ai = AlphaBetaAI::with_seed(opts.depth, opts.eval, opts.seed);
            ai.time_limit = opts.time_ms.map(Duration::from_millis);
            Ok(Box::new(ai.with_jitter(opts.jitter)))
        }
        other => bail!("unknown agent '{}' (expected random, minimax or alphabeta)", other),
    }
}
