//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; later
//! frames only rewrite the runs of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen with mouse capture on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// The renderer will diff against the previous frame and then swap buffers
    /// so the caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        // Take previous out to avoid borrow conflicts (no cloning).
        let (mut prev, needs_full) = match self.last.take() {
            Some(prev) => {
                let resized = prev.width() != fb.width() || prev.height() != fb.height();
                (prev, resized)
            }
            None => (FrameBuffer::new(fb.width(), fb.height()), true),
        };

        if needs_full {
            self.buf.clear();
            encode_full_into(fb, &mut self.buf)?;
            self.flush_buf()?;
            prev.resize(fb.width(), fb.height());
        } else {
            self.buf.clear();
            encode_diff_into(&prev, fb, &mut self.buf)?;
            self.flush_buf()?;
        }

        // Swap current into prev so next frame can diff without cloning.
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .context("failed to write frame")?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Framebuffer rows, top to bottom.
fn rows(fb: &FrameBuffer) -> std::slice::Chunks<'_, Cell> {
    fb.cells().chunks(usize::from(fb.width().max(1)))
}

/// Column spans `start..end` of one row where `next` differs from `prev`.
fn changed_spans<'a>(
    prev: &'a [Cell],
    next: &'a [Cell],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        let start = x + prev[x..].iter().zip(&next[x..]).position(|(a, b)| a != b)?;
        let len = prev[start..]
            .iter()
            .zip(&next[start..])
            .take_while(|(a, b)| a != b)
            .count();
        x = start + len;
        Some((start, x))
    })
}

/// Queues glyphs, emitting style commands only when the style changes.
struct GlyphWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> GlyphWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: usize, y: usize) -> Result<()> {
        self.out.queue(cursor::MoveTo(x as u16, y as u16))?;
        Ok(())
    }

    fn write(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                queue_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(style.fg.into()))?;
    out.queue(SetBackgroundColor(style.bg.into()))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut writer = GlyphWriter::new(out);
    for (y, row) in rows(fb).enumerate() {
        writer.move_to(0, y)?;
        writer.write(row)?;
    }
    writer.finish()
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes fall back to a full redraw.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut writer = GlyphWriter::new(out);
    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        for (start, end) in changed_spans(old, new) {
            writer.move_to(start, y)?;
            writer.write(&new[start..end])?;
        }
    }
    writer.finish()
}
