//! Benchmarks for the per-turn hot path.
//!
//! Covers combat resolution, field building, move planning and the local
//! search on generated boards.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use toroid::board::mapgen::generate;
use toroid::{Board, Config, Coord, Fields, Grid, LocalSearch, MoveSet, Site, plan_moves, simulate};

/// A 30x30 generated board with one move planned for every owned cell.
fn planned_turn() -> (Grid, MoveSet) {
    let board = generate(42, 30, 30, 4).unwrap();
    let grid = Grid::from_board(&board).unwrap();
    let config = Config::default();
    let mut moves = MoveSet::new();
    for owner in grid.players().collect::<Vec<_>>() {
        moves.extend(plan_moves(&grid, owner, &config).unwrap().iter());
    }
    (grid, moves)
}

/// Two 3x3 blocks facing each other across a one-cell gap.
fn skirmish() -> Grid {
    let mut board = Board::filled(15, 15, Site::new(0, 20, 3)).unwrap();
    for y in 6..9 {
        for x in 4..7 {
            board.set(Coord::new(x, y), Site::new(1, 60, 4));
        }
        for x in 8..11 {
            board.set(Coord::new(x, y), Site::new(2, 60, 4));
        }
    }
    Grid::from_board(&board).unwrap()
}

fn bench_simulate(c: &mut Criterion) {
    let (grid, moves) = planned_turn();

    c.bench_function("simulate_30x30", |b| {
        b.iter(|| {
            let next = simulate(black_box(&grid), black_box(&moves)).unwrap();
            black_box(next)
        });
    });
}

fn bench_fields(c: &mut Criterion) {
    let (grid, _) = planned_turn();

    c.bench_function("fields_30x30", |b| {
        b.iter(|| black_box(Fields::build(black_box(&grid), 1)));
    });
}

fn bench_plan(c: &mut Criterion) {
    let grid = skirmish();
    let config = Config::default();

    c.bench_function("plan_skirmish", |b| {
        b.iter(|| black_box(plan_moves(black_box(&grid), 1, &config).unwrap()));
    });
}

fn bench_search(c: &mut Criterion) {
    let grid = skirmish();
    let search = LocalSearch::default();

    c.bench_function("search_5x5_front", |b| {
        b.iter(|| {
            let outcome = search.best_direction(black_box(&grid), Coord::new(6, 7)).unwrap();
            black_box(outcome)
        });
    });
}

criterion_group!(benches, bench_simulate, bench_fields, bench_plan, bench_search);
criterion_main!(benches);
