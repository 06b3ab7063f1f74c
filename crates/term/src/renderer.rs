//! TerminalRenderer: pushes framebuffers to the real terminal.
//!
//! Frames are encoded as crossterm commands into a byte buffer first, then
//! written in one go. After the first frame only changed runs are redrawn.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    /// Last frame on screen; `None` forces a full redraw.
    front: Option<FrameBuffer>,
    bytes: Vec<u8>,
    active: bool,
    /// Terminal was asked to report key releases.
    key_release: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            front: None,
            bytes: Vec::with_capacity(32 * 1024),
            active: false,
            key_release: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor, and key release reporting
    /// where the terminal supports it.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.key_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.bytes.clear();
        if self.key_release {
            self.bytes.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.bytes.clear();
        if self.key_release {
            self.bytes.queue(PopKeyboardEnhancementFlags)?;
            self.key_release = false;
        }
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Whether key release events will arrive. Valid after [`Self::enter`].
    pub fn reports_key_release(&self) -> bool {
        self.key_release
    }

    /// Next `present` redraws everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Show `frame`. On return `frame` holds the previous frame's storage,
    /// ready to be drawn over.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        match self.front.as_ref() {
            Some(front) if front.width() == frame.width() && front.height() == frame.height() => {
                encode_changes(front, frame, &mut self.bytes)?;
            }
            _ => {
                encode_full(frame, &mut self.bytes)?;
            }
        }
        self.flush()?;

        let mut back = self
            .front
            .take()
            .unwrap_or_else(|| FrameBuffer::new(frame.width(), frame.height()));
        std::mem::swap(&mut back, frame);
        self.front = Some(back);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Tracks the style last sent so runs of equal style emit one change.
struct Pen(Option<Style>);

impl Pen {
    fn apply(&mut self, style: Style, out: &mut Vec<u8>) -> Result<()> {
        if self.0 == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(color(style.fg)))?;
        out.queue(SetBackgroundColor(color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.0 = Some(style);
        Ok(())
    }
}

/// Whole-screen redraw.
pub fn encode_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen(None);
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        if let Some(row) = frame.row(y) {
            for glyph in row {
                pen.apply(glyph.style, out)?;
                out.queue(Print(glyph.ch))?;
            }
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Redraw only the runs that differ between `prev` and `next`.
pub fn encode_changes(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen(None);
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            pen.apply(glyph.style, out)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// `(x, y, len)` for each horizontal run of differing glyphs. Buffers of
/// different size count as entirely changed.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    for y in 0..next.height() {
        if !same_size {
            runs.push((0, y, next.width()));
            continue;
        }
        let (Some(a), Some(b)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        let mut start = None;
        for (x, (pa, pb)) in a.iter().zip(b).enumerate() {
            let x = x as u16;
            match (pa != pb, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, y, next.width() - s));
        }
    }
    runs
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Glyph;

    #[test]
    fn test_changed_runs_coalesce() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.put_char(x, 0, 'X', Style::PLAIN);
        }
        b.put_char(5, 1, 'Y', Style::PLAIN);
        assert_eq!(changed_runs(&a, &b), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn test_style_change_alone_is_a_change() {
        let a = FrameBuffer::new(3, 1);
        let mut b = FrameBuffer::new(3, 1);
        b.set(1, 0, Glyph::new(' ', Style::PLAIN.bold()));
        assert_eq!(changed_runs(&a, &b), vec![(1, 0, 1)]);
    }

    #[test]
    fn test_size_change_redraws_every_row() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        assert_eq!(changed_runs(&a, &b), vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn test_identical_frames_encode_no_glyphs() {
        let mut a = FrameBuffer::new(4, 2);
        a.put_str(0, 0, "ab", Style::PLAIN);
        let mut full = Vec::new();
        encode_full(&a, &mut full).unwrap();
        let mut diff = Vec::new();
        encode_changes(&a, &a.clone(), &mut diff).unwrap();
        assert!(diff.len() < full.len());
        assert!(!String::from_utf8_lossy(&diff).contains("ab"));
    }
}
