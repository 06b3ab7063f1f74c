use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tick_tetris::core::{
    GameSession, GridBoard, InputFrame, Piece, PieceFactory, SessionConfig, SessionSnapshot,
    SessionState,
};
use tick_tetris::types::{InputAction, PieceKind, SpawnPolicy};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::default(), 0.0).unwrap();
    let mut now = 0.0;
    let input = InputFrame::new().hold(InputAction::MoveDown);

    c.bench_function("session_tick_soft_drop", |b| {
        b.iter(|| {
            now += 0.016;
            if session.state() == SessionState::GameOver {
                session.restart(now);
            }
            black_box(session.tick(black_box(now), &input));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = GridBoard::new(10, 22, 2);
            for y in 18..22 {
                board.fill_row(y, Some(PieceKind::I));
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut factory = PieceFactory::new(SpawnPolicy::Bag, 12345, PieceFactory::centered_spawn(10));

    c.bench_function("spawn_piece", |b| {
        b.iter(|| black_box(factory.spawn_shape()))
    });
}

fn bench_validate(c: &mut Criterion) {
    let mut board = GridBoard::new(10, 22, 2);
    board.fill_row(21, Some(PieceKind::Z));
    let piece = Piece::new(PieceKind::T, 4, 19);

    c.bench_function("is_valid_position", |b| {
        b.iter(|| black_box(board.is_valid_position(black_box(&piece))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let session = GameSession::new(SessionConfig::default(), 0.0).unwrap();
    let mut snap = SessionSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_spawn,
    bench_validate,
    bench_snapshot
);
criterion_main!(benches);
