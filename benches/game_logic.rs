use criterion::{black_box, criterion_group, criterion_main, Criterion};
use classic_tetris::core::{Board, GameConfig, GameLoop, Grid, Stats};
use classic_tetris::types::{Command, ShapeKind};

fn bench_tick(c: &mut Criterion) {
    let mut game = GameLoop::headless(GameConfig::default().with_seed(12345));
    game.start();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if game.is_game_over() {
                game.reset_game();
            }
            black_box(game.on_tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut rows = vec![".........."; 16];
    rows.extend(["##########"; 4]);
    let grid = Grid::from_ascii(&rows).unwrap();

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::with_grid(1, grid.clone());
            let mut stats = Stats::new();
            black_box(board.clear_full_lines(&mut stats));
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut board = Board::new(12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            black_box(board.spawn_next_piece());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut game = GameLoop::headless(GameConfig::default().with_seed(12345));
    game.on_tick();
    let mut right = true;

    c.bench_function("move_horizontal", |b| {
        b.iter(|| {
            let command = if right { Command::MoveRight } else { Command::MoveLeft };
            if !game.apply(command) {
                right = !right;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = Board::new(12345);
    board.spawn(ShapeKind::TTurned);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(board.rotate(true));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
