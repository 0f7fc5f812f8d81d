//! Computer-vs-computer self-play.
//!
//! Plays full matches with both seats driven by the heuristic strategy, one
//! `play_computer_turn` per ply, and records how each match ended. Matches
//! that hit the ply cap are recorded without a winner. With more than one
//! thread, matches run concurrently on a rayon pool.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::board::{PlayerId, Variant};
use crate::config::MatchConfig;
use crate::game::GameManager;
use crate::player::Controller;
use crate::protocol::mfen::encode_mfen;

/// Configuration for self-play.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_games: usize,
    pub variant: Variant,
    /// Plies after which a match is abandoned as a draw.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy). Match `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            variant: Variant::NineMen,
            max_plies: 400,
            threads: 4,
            seed: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// Outcome of one self-play match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub variant: Variant,
    pub starting_player: PlayerId,
    pub winner: Option<PlayerId>,
    /// Actions played, captures included.
    pub plies: usize,
    pub mills: usize,
    /// True if the match stopped at the ply cap.
    pub capped: bool,
    /// True if the match stopped short of the cap with no winner because the
    /// computer could not act.
    pub stalled: bool,
    pub final_mfen: String,
}

/// Plays one match to completion or to the ply cap.
pub fn play_game(config: &SelfPlayConfig, game_id: usize) -> GameRecord {
    let starting_player = if game_id % 2 == 0 {
        PlayerId::One
    } else {
        PlayerId::Two
    };
    let mut match_config = MatchConfig::new(config.variant, starting_player, Controller::Computer);
    if config.seed != 0 {
        match_config = match_config.with_seed(config.seed.wrapping_add(game_id as u64));
    }
    // The starting computer places its opening piece during setup.
    let mut game = GameManager::with_controllers(&match_config, [Controller::Computer; 2]);
    let mut plies = 1;
    let mut mills = 0;

    while !game.is_game_over() && plies < config.max_plies {
        let result = game.play_computer_turn();
        if !result.success {
            warn!(game = game_id, plies, error = %result.message, "self-play game stalled");
            break;
        }
        plies += 1;
        if result.mill_formed {
            mills += 1;
        }
    }

    record(config, game_id, &game, plies, mills)
}

fn record(
    config: &SelfPlayConfig,
    game_id: usize,
    game: &GameManager,
    plies: usize,
    mills: usize,
) -> GameRecord {
    let unfinished = !game.is_game_over();
    GameRecord {
        game_id,
        variant: config.variant,
        starting_player: game.starting_player(),
        winner: game.winner(),
        plies,
        mills,
        capped: unfinished && plies >= config.max_plies,
        stalled: unfinished && plies < config.max_plies,
        final_mfen: encode_mfen(game),
    }
}

/// Runs self-play, producing one record per match in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    Ok(games)
}

/// Runs self-play, calling `on_game` with each completed record.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game);
        Ok(())
    }
}

fn log_game(game: &GameRecord, n: usize, total: usize, started: Instant) {
    let outcome = match game.winner {
        Some(w) => format!("player {} wins", w),
        None => "draw".to_string(),
    };
    info!(
        game = n,
        total,
        %outcome,
        plies = game.plies,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "self-play game finished"
    );
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let game = play_game(config, i);
        log_game(&game, i + 1, config.num_games, started);
        on_game(game);
    }
}

/// Plays matches on a rayon pool; completed records travel over a channel
/// to the calling thread.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        let completed = &completed;
        let worker = scope.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let started = Instant::now();
                        let game = play_game(config, i);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(&game, n, config.num_games, started);
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
        worker.join().map_err(|_| SelfPlayError::WorkerPanicked)
    })
}

/// Writes records as JSONL, one object per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results over a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    /// Wins indexed by `PlayerId::index`.
    pub wins: [usize; 2],
    pub starter_wins: usize,
    pub draws: usize,
    pub total_plies: usize,
}

impl Summary {
    pub fn of(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Default::default()
        };
        for game in games {
            summary.total_plies += game.plies;
            match game.winner {
                Some(w) => {
                    summary.wins[w.index()] += 1;
                    if w == game.starting_player {
                        summary.starter_wins += 1;
                    }
                }
                None => summary.draws += 1,
            }
        }
        summary
    }

    pub fn average_plies(&self) -> f64 {
        self.total_plies as f64 / self.games.max(1) as f64
    }
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let summary = Summary::of(games);
    let pct = |n: usize| 100.0 * n as f64 / summary.games.max(1) as f64;
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", summary.games);
    eprintln!("Avg plies/game: {:.1}", summary.average_plies());
    eprintln!("Player 1 wins: {} ({:.1}%)", summary.wins[0], pct(summary.wins[0]));
    eprintln!("Player 2 wins: {} ({:.1}%)", summary.wins[1], pct(summary.wins[1]));
    eprintln!("Starting player wins: {} ({:.1}%)", summary.starter_wins, pct(summary.starter_wins));
    eprintln!("Draws (no winner): {}", summary.draws);
}
