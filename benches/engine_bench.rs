use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use morris::board::{Board, PlayerId, Point, Variant};
use morris::game::GameManager;
use morris::movegen::{legal_actions, legal_moves, random_action};
use morris::player::Controller;
use morris::protocol::mfen::{encode_mfen, parse_mfen};
use morris::search::decide_action;
use morris::selfplay::{play_game, SelfPlayConfig};

const MIDGAME_MFEN: &str = "9mm/1-/11.2.1.22.1..2.1.2..12../0,0";
const TWELVE_MIDGAME_MFEN: &str = "12mm/2-/1.2.1.2..12.1.2.21..2.1./2,2";

fn bench_legal_moves(c: &mut Criterion) {
    let position = parse_mfen(MIDGAME_MFEN).unwrap();
    c.bench_function("legal_moves_9mm_midgame", |b| {
        b.iter(|| legal_moves(black_box(&position.board), black_box(PlayerId::One)))
    });

    let position = parse_mfen(TWELVE_MIDGAME_MFEN).unwrap();
    c.bench_function("legal_moves_12mm_midgame", |b| {
        b.iter(|| legal_moves(black_box(&position.board), black_box(PlayerId::Two)))
    });
}

fn bench_forms_mill(c: &mut Criterion) {
    let position = parse_mfen(MIDGAME_MFEN).unwrap();
    let empty: Vec<Point> = position.board.empty_points().collect();
    c.bench_function("forms_mill_all_empty_points", |b| {
        b.iter(|| {
            empty
                .iter()
                .filter(|&&p| position.board.forms_mill(black_box(p), PlayerId::One))
                .count()
        })
    });
}

fn bench_decide_action(c: &mut Criterion) {
    let game = GameManager::setup(Variant::NineMen, PlayerId::One, Controller::Human);
    let player = game.player(PlayerId::One).clone();
    let board = *game.board();
    c.bench_function("decide_action_opening", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| decide_action(black_box(&board), black_box(&player), false, &mut rng))
    });
}

fn bench_random_rollout(c: &mut Criterion) {
    c.bench_function("random_rollout_100_plies", |b| {
        let mut rng = SmallRng::seed_from_u64(3);
        b.iter(|| {
            let mut game = GameManager::setup(Variant::TwelveMen, PlayerId::One, Controller::Human);
            for _ in 0..100 {
                let player = game.player(game.current_player()).clone();
                match random_action(game.board(), &player, game.waiting_for_removal(), &mut rng) {
                    Some(action) if !game.is_game_over() => {
                        game.apply_action(action);
                    }
                    _ => break,
                }
            }
            game
        })
    });
}

fn bench_mfen(c: &mut Criterion) {
    c.bench_function("parse_mfen", |b| b.iter(|| parse_mfen(black_box(MIDGAME_MFEN))));

    let position = parse_mfen(MIDGAME_MFEN).unwrap();
    let game = GameManager::from_position(&position, Controller::Human);
    c.bench_function("encode_mfen", |b| b.iter(|| encode_mfen(black_box(&game))));
}

fn bench_legal_actions_empty_board(c: &mut Criterion) {
    let board = Board::new(Variant::TwelveMen);
    let game = GameManager::setup(Variant::TwelveMen, PlayerId::One, Controller::Human);
    let player = game.player(PlayerId::One).clone();
    c.bench_function("legal_actions_empty_board", |b| {
        b.iter(|| legal_actions(black_box(&board), black_box(&player), false))
    });
}

fn bench_self_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for variant in [Variant::NineMen, Variant::TwelveMen] {
        let config = SelfPlayConfig {
            num_games: 1,
            variant,
            threads: 1,
            seed: 11,
            ..SelfPlayConfig::default()
        };
        group.bench_function(format!("full_game_{}", variant), |b| {
            b.iter(|| play_game(black_box(&config), 0))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves,
    bench_forms_mill,
    bench_decide_action,
    bench_random_rollout,
    bench_mfen,
    bench_legal_actions_empty_board,
    bench_self_play,
);
criterion_main!(benches);
