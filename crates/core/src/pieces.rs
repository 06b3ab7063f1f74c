//! Pieces module - tetromino catalog and piece kinematics
//!
//! Every kind has four rotation states. Offsets live inside a 4x4 box whose
//! top-left corner is the piece pivot, so rotating never moves the pivot.
//! Rotation is naive: there is no kick search, callers validate and revert.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the pivot
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the pivot
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    ROTATION_TABLE[kind_index(kind)][rotation.index() as usize]
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

/// Precomputed offsets, `[kind][rotation index]`.
const ROTATION_TABLE: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// The active falling piece.
///
/// Movement and rotation never check the board. Every transform has an exact
/// inverse (`move_left`/`move_right`, `move_up`/`move_down`,
/// `rotate_right`/`rotate_left`) which the scheduler applies when the new
/// position turns out to be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    offsets: PieceShape,
}

impl Piece {
    /// Create a piece in spawn orientation with its pivot at `(x, y)`.
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
            offsets: get_shape(kind, Rotation::North),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn pivot(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    /// Offsets for the current rotation.
    pub fn offsets(&self) -> PieceShape {
        self.offsets
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.offsets.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_up(&mut self) {
        self.y -= 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    pub fn rotate_right(&mut self) {
        self.set_rotation(self.rotation.rotate_cw());
    }

    pub fn rotate_left(&mut self) {
        self.set_rotation(self.rotation.rotate_ccw());
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        self.offsets = get_shape(self.kind, rotation);
    }
}
