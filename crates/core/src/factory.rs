//! Piece factory - hands out new pieces at the spawn point.

use crate::pieces::Piece;
use crate::rng::{KindSource, SevenBag, SimpleRng};
use crate::types::{PieceKind, SpawnPolicy};

/// Builds new active pieces at a fixed, grid-aligned spawn coordinate.
///
/// One kind is always drawn ahead so presentation can show a preview.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    source: KindSource,
    upcoming: PieceKind,
    spawn: (i8, i8),
}

impl PieceFactory {
    /// `spawn_at` may be fractional (e.g. a centred position); it is snapped
    /// to the nearest grid cell.
    pub fn new(policy: SpawnPolicy, seed: u32, spawn_at: (f32, f32)) -> Self {
        let source = match policy {
            SpawnPolicy::Bag => KindSource::Bag(SevenBag::new(seed)),
            SpawnPolicy::Uniform => KindSource::Uniform(SimpleRng::new(seed)),
        };
        Self::from_source(source, spawn_at)
    }

    /// A factory that only ever produces `kind`.
    pub fn repeating(kind: PieceKind, spawn_at: (f32, f32)) -> Self {
        Self::from_source(KindSource::Repeat(kind), spawn_at)
    }

    fn from_source(mut source: KindSource, spawn_at: (f32, f32)) -> Self {
        let upcoming = source.draw();
        Self {
            source,
            upcoming,
            spawn: snap(spawn_at),
        }
    }

    /// Top-centre spawn position for a board `width` cells wide.
    ///
    /// Pieces occupy a 4-wide box, so the box is centred rather than the pivot.
    pub fn centered_spawn(width: u8) -> (f32, f32) {
        ((width as f32 - 4.0) / 2.0, 0.0)
    }

    pub fn spawn_shape(&mut self) -> Piece {
        let kind = std::mem::replace(&mut self.upcoming, self.source.draw());
        Piece::new(kind, self.spawn.0, self.spawn.1)
    }

    /// Kind the next `spawn_shape` call will produce.
    pub fn peek_next(&self) -> PieceKind {
        self.upcoming
    }

    pub fn spawn_point(&self) -> (i8, i8) {
        self.spawn
    }

    /// Current RNG state, usable as the seed of a follow-up session.
    pub fn seed(&self) -> Option<u32> {
        self.source.rng_state()
    }
}

fn snap((x, y): (f32, f32)) -> (i8, i8) {
    (x.round() as i8, y.round() as i8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_spawn_is_snapped_to_grid() {
        let mut factory = PieceFactory::repeating(PieceKind::T, (3.4, 0.6));
        assert_eq!(factory.spawn_point(), (3, 1));
        let piece = factory.spawn_shape();
        assert_eq!(piece.pivot(), (3, 1));
        assert_eq!(piece.rotation(), Rotation::North);
    }

    #[test]
    fn test_centered_spawn_for_standard_width() {
        assert_eq!(PieceFactory::centered_spawn(10), (3.0, 0.0));
        let factory = PieceFactory::new(SpawnPolicy::Bag, 1, PieceFactory::centered_spawn(9));
        assert_eq!(factory.spawn_point(), (3, 0));
    }

    #[test]
    fn test_peek_matches_next_spawn() {
        let mut factory = PieceFactory::new(SpawnPolicy::Bag, 12345, (3.0, 0.0));
        for _ in 0..20 {
            let peeked = factory.peek_next();
            assert_eq!(factory.spawn_shape().kind(), peeked);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceFactory::new(SpawnPolicy::Uniform, 42, (3.0, 0.0));
        let mut b = PieceFactory::new(SpawnPolicy::Uniform, 42, (3.0, 0.0));
        for _ in 0..30 {
            assert_eq!(a.spawn_shape().kind(), b.spawn_shape().kind());
        }
    }
}
