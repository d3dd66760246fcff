//! Benchmarks for move generation and search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use xiangqi_engine::test_positions;
use xiangqi_engine::{Board, SearchConfig, SearchLimits, Searcher};

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut board = Board::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, fen) in [
        ("startpos", test_positions::START),
        ("middlegame", test_positions::MID_1),
        ("endgame", test_positions::END_1),
    ] {
        let mut board = Board::from_fen(fen).unwrap();
        group.bench_function(BenchmarkId::new("pseudo", name), |b| {
            b.iter(|| black_box(board.generate_moves(false)))
        });
        group.bench_function(BenchmarkId::new("legal", name), |b| {
            b.iter(|| black_box(board.legal_moves()))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = Board::new();
                let mut searcher = Searcher::new(SearchConfig::default());
                searcher.think(&mut board, &SearchLimits::depth(depth))
            })
        });
    }

    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("middlegame", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = Board::from_fen(test_positions::MID_1).unwrap();
                let mut searcher = Searcher::new(SearchConfig::default());
                searcher.think(&mut board, &SearchLimits::depth(depth))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search);
criterion_main!(benches);
