use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrecs::core::{Board, GameConfig, GameEngine, Piece, RandomPieceSource};
use tetrecs::multiplayer::ServerMessage;
use tetrecs::types::PieceKind;

fn new_game() -> GameEngine<RandomPieceSource> {
    let mut engine = GameEngine::single_player(GameConfig::default()).unwrap();
    engine.start().unwrap();
    engine
}

fn bench_tick(c: &mut Criterion) {
    let mut engine = new_game();

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine = new_game();
            }
            engine.tick(black_box(16))
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_row_and_column", |b| {
        b.iter(|| {
            let mut board = Board::new(5, 5);
            for i in 0..5 {
                board.set(i, 2, 1).unwrap();
                board.set(2, i, 1).unwrap();
            }
            let scan = board.detect_full_lines();
            board.clear(&scan.cells).unwrap();
            black_box(scan.line_count)
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let mut board = Board::new(5, 5);
    board.set(2, 2, 1).unwrap();
    let pieces: Vec<Piece> = PieceKind::ALL.iter().map(|&k| Piece::new(k)).collect();

    c.bench_function("can_place_all_shapes_all_anchors", |b| {
        b.iter(|| {
            let mut fits = 0;
            for piece in &pieces {
                for y in 0..5 {
                    for x in 0..5 {
                        if board.can_place(piece, x, y) {
                            fits += 1;
                        }
                    }
                }
            }
            black_box(fits)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let piece = Piece::new(PieceKind::C);

    c.bench_function("rotate_cells", |b| {
        b.iter(|| black_box(piece.rotated_cw()).cells())
    });
}

fn bench_parse_scores(c: &mut Criterion) {
    let text = "SCORES\nalice:1500:2\nbob:800:DEAD\ncarol:300:1\ndave:120:-1\neve:0:3";

    c.bench_function("parse_scores_message", |b| {
        b.iter(|| black_box(text).parse::<ServerMessage>())
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_can_place,
    bench_rotate,
    bench_parse_scores
);
criterion_main!(benches);
