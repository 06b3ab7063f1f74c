//! RNG module - seeded piece-kind sources
//!
//! A session is reproducible from its seed: both spawn policies draw from the
//! same small LCG, never from an OS entropy source.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 maps to 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`, taken from the high bits.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag generator: each shuffled bag holds every kind exactly once.
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // Refill guarantees a non-empty bag.
        self.bag.pop().unwrap_or(PieceKind::I)
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

/// Where the factory's next kind comes from.
#[derive(Debug, Clone)]
pub enum KindSource {
    Bag(SevenBag),
    Uniform(SimpleRng),
    /// Always the same kind (drills and deterministic tests).
    Repeat(PieceKind),
}

impl KindSource {
    pub fn draw(&mut self) -> PieceKind {
        match self {
            KindSource::Bag(bag) => bag.draw(),
            KindSource::Uniform(rng) => PieceKind::ALL[rng.next_range(7) as usize],
            KindSource::Repeat(kind) => *kind,
        }
    }

    pub fn rng_state(&self) -> Option<u32> {
        match self {
            KindSource::Bag(bag) => Some(bag.rng_state()),
            KindSource::Uniform(rng) => Some(rng.state()),
            KindSource::Repeat(_) => None,
        }
    }
}
