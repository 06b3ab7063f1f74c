//! BoardView: draws a [`SessionSnapshot`] into a [`FrameBuffer`].
//!
//! Pure, no I/O. Only the visible rows are drawn; pieces still inside the
//! hidden header are not shown until they fall into view.

use crate::core::SessionSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::PieceKind;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self { cell_w: 2 }
    }
}

/// Where the well landed on screen, after centering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellLayout {
    pub x: u16,
    pub y: u16,
    pub outer_w: u16,
    pub outer_h: u16,
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn layout(&self, snap: &SessionSnapshot, viewport: Viewport) -> WellLayout {
        let outer_w = snap.width as u16 * self.cell_w + 2;
        let outer_h = snap.visible_height as u16 + 2;
        WellLayout {
            x: viewport.width.saturating_sub(outer_w) / 2,
            y: viewport.height.saturating_sub(outer_h) / 2,
            outer_w,
            outer_h,
        }
    }

    /// Draw into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::BLANK);

        if snap.inert {
            let msg = "NO GAME";
            let x = viewport.width.saturating_sub(msg.len() as u16) / 2;
            fb.put_str(x, viewport.height / 2, msg, Style::PLAIN.bold());
            return;
        }

        let well = self.layout(snap, viewport);
        draw_frame(fb, well);

        let empty = Style::fg(Rgb::new(90, 90, 100)).on(WELL_BG).dim();
        for y in 0..snap.visible_height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(kind) => self.draw_block(fb, well, x, y, kind),
                    None => self.fill_cell(fb, well, x, y, Glyph::new('·', empty)),
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in snap.active_visible_cells() {
                self.draw_block(fb, well, x, y, active.kind);
            }
        }

        self.draw_panel(fb, snap, viewport, well);

        if snap.game_over {
            let text = "GAME OVER";
            let x = well.x + well.outer_w.saturating_sub(text.len() as u16) / 2;
            let y = well.y + well.outer_h / 2;
            fb.put_str(x, y, text, Style::fg(Rgb::new(255, 255, 255)).bold());
            let hint = "r: restart";
            let x = well.x + well.outer_w.saturating_sub(hint.len() as u16) / 2;
            fb.put_str(x, y.saturating_add(1), hint, Style::PLAIN.dim());
        }
    }

    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, well: WellLayout, x: u8, y: u8, kind: PieceKind) {
        let style = Style::fg(piece_color(kind)).on(WELL_BG).bold();
        self.fill_cell(fb, well, x, y, Glyph::new('█', style));
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, well: WellLayout, x: u8, y: u8, glyph: Glyph) {
        let px = well.x + 1 + x as u16 * self.cell_w;
        let py = well.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, glyph);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        well: WellLayout,
    ) {
        let x = well.x.saturating_add(well.outer_w).saturating_add(2);
        if viewport.width.saturating_sub(x) < PANEL_MIN_WIDTH {
            return;
        }
        let label = Style::PLAIN.bold();
        let value = Style::fg(Rgb::new(200, 200, 200));

        let mut y = well.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        if let Some(kind) = snap.next {
            let style = Style::fg(piece_color(kind)).bold();
            fb.put_str(x, y + 1, kind.as_str(), style);
        }
    }
}

fn draw_frame(fb: &mut FrameBuffer, well: WellLayout) {
    let WellLayout { x, y, outer_w: w, outer_h: h } = well;
    let style = Style::fg(Rgb::new(200, 200, 200));
    let right = x + w - 1;
    let bottom = y + h - 1;

    fb.fill_rect(x + 1, y + 1, w - 2, h - 2, Glyph::new(' ', Style::PLAIN.on(WELL_BG)));
    for px in x + 1..right {
        fb.put_char(px, y, '─', style);
        fb.put_char(px, bottom, '─', style);
    }
    for py in y + 1..bottom {
        fb.put_char(x, py, '│', style);
        fb.put_char(right, py, '│', style);
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
