//! Benchmarks for checkers engine performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use checkers_engine::board::search::{evaluate, search};
use checkers_engine::board::{legal_moves, Board, Color, EvalParams, GameState, SearchLimits};

/// Leaf count of the legal-move tree
fn count_leaves(board: &Board, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    legal_moves(board, side)
        .iter()
        .map(|mv| {
            let mut next = *board;
            next.make_move(mv);
            count_leaves(&next, side.opponent(), depth - 1)
        })
        .sum()
}

fn bench_tree_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_walk");
    let board = Board::new();

    for depth in 1..=6 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| count_leaves(&board, Color::Black, black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Board::new();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(legal_moves(&startpos, Color::Black)))
    });

    // Branching capture chains
    let chains = *GameState::from_fen("B:W5,6,13,14,15,22,23:B1,2").board();
    group.bench_function("chains", |b| {
        b.iter(|| black_box(legal_moves(&chains, Color::Black)))
    });

    // Kings have the most simple moves
    let kings = *GameState::from_fen("W:WK14,K15,K18,K19:BK1,K4").board();
    group.bench_function("kings", |b| {
        b.iter(|| black_box(legal_moves(&kings, Color::White)))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let game = GameState::new();
    let params = EvalParams::default();
    for depth in [4, 6, 8] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| search(&game, &SearchLimits::depth(black_box(depth)), &params))
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let board = Board::new();
    let params = EvalParams::default();
    c.bench_function("evaluate_startpos", |b| {
        b.iter(|| black_box(evaluate(black_box(&board), Color::Black, &params)))
    });
}

criterion_group!(
    benches,
    bench_tree_walk,
    bench_movegen,
    bench_search,
    bench_eval
);
criterion_main!(benches);
