//! Rollout and tree search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Single random playouts from different game phases
//! - Serial vs parallel rollout batches
//! - Flat Monte Carlo, single-threaded and threaded
//! - Full UCT search with varying iteration counts
//! - Tree operations (expansion, selection, backpropagation)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_connect4::{Board, Side};
use mcts::{
    rollout_parallel, rollout_serial, simulate_random_play, MctsConfig, MctsSearch, MctsTree,
    MonteCarloEngine,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn midgame() -> Board {
    Board::from_moves("33243452").unwrap()
}

/// Five full rows without a four; seven plies left.
fn near_terminal() -> Board {
    let grid = "\
. . . . . . .
X O X O X O X
O X O X O X O
O X O X O X O
X O X O X O X
X O X O X O X
";
    Board::from_grid(grid).unwrap()
}

// =============================================================================
// Rollout Benchmarks
// =============================================================================

fn bench_rollouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout");

    for (name, board) in [
        ("opening", Board::new()),
        ("midgame", midgame()),
        ("near_terminal", near_terminal()),
    ] {
        group.bench_function(name, |b| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| black_box(simulate_random_play(&board, &mut rng).unwrap()));
        });
    }

    group.finish();
}

fn bench_rollout_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout_batch");
    let board = midgame();

    for rollouts in [64u32, 256, 1024] {
        group.throughput(Throughput::Elements(rollouts as u64));

        group.bench_with_input(BenchmarkId::new("serial", rollouts), &rollouts, |b, &n| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| black_box(rollout_serial(&board, n, &mut rng).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("parallel_8", rollouts), &rollouts, |b, &n| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| black_box(rollout_parallel(&board, n, 8, &mut rng).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Flat Monte Carlo Benchmarks
// =============================================================================

fn bench_flat_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_monte_carlo");
    group.sample_size(20);

    let engine = MonteCarloEngine::new(200);

    group.bench_function("single_thread_200", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(engine.get_best_move(&midgame(), &mut rng).unwrap()));
    });

    group.bench_function("threaded_200", |b| {
        let engine = engine.clone().with_threads_per_column(2);
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(engine.get_best_move_threaded(&midgame(), &mut rng).unwrap()));
    });

    group.finish();
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_mcts_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");
    group.sample_size(10);

    for iterations in [50u32, 200, 800] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("opening", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::for_testing().with_iterations(iterations);

                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    let mut search = MctsSearch::new(&Board::new(), config.clone()).unwrap();
                    black_box(search.run(&mut rng).unwrap())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    group.bench_function("expand_root", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| {
            let mut tree = MctsTree::new(Board::new());
            while tree.expand(tree.root(), &mut rng).is_some() {}
            black_box(tree.len())
        });
    });

    group.bench_function("select_child", |b| {
        let board = Board::new();
        let mut tree = MctsTree::new(board);

        for column in 0..7u8 {
            let child_board = board.with_move(column as usize).unwrap();
            let child_id = tree.add_child(tree.root(), column, child_board, Side::A);
            let child = tree.get_mut(child_id);
            child.visit_count = (column as u32 + 1) * 10;
            child.value_sum = (column as f64 - 3.0) * child.visit_count as f64;
        }
        tree.get_mut(tree.root()).visit_count = 280;

        b.iter(|| black_box(tree.select_child(tree.root(), 1.0)));
    });

    group.bench_function("backpropagate_depth_8", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(Board::new());
                let mut parent = tree.root();
                let mut board = Board::new();

                for column in [3usize, 3, 2, 4, 3, 4, 5, 2] {
                    let mover = board.side_to_move();
                    board.play(column).unwrap();
                    parent = tree.add_child(parent, column as u8, board, mover);
                }

                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 16.0);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rollouts,
    bench_rollout_batches,
    bench_flat_monte_carlo,
    bench_mcts_iterations,
    bench_tree_operations,
);

criterion_main!(benches);
