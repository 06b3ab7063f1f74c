use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Board coordinates (header rows included).
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        let (x, y) = value.pivot();
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x,
            y,
            cells: value.cells(),
        }
    }
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub width: u8,
    pub visible_height: u8,
    pub header: u8,
    /// Visible rows only, row-major, top row first.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
    /// Session is missing a collaborator and will never advance.
    pub inert: bool,
    pub restarts: u32,
}

impl SessionSnapshot {
    /// Cell at visible coordinates (row 0 = first row below the header).
    pub fn cell(&self, x: u8, y: u8) -> Cell {
        if x >= self.width || y >= self.visible_height {
            return None;
        }
        self.board[y as usize * self.width as usize + x as usize]
    }

    /// Active piece cells that fall inside the visible region, in visible
    /// coordinates.
    pub fn active_visible_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let header = self.header as i8;
        let width = self.width as i8;
        let bottom = header + self.visible_height as i8;
        self.active
            .iter()
            .flat_map(|a| a.cells.into_iter())
            .filter(move |&(x, y)| x >= 0 && x < width && y >= header && y < bottom)
            .map(move |(x, y)| (x as u8, (y - header) as u8))
    }
}
