//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. It also owns the
//! overlay layout, so it is the one place that can tell which button sits
//! under a mouse click.

use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{digit_count, CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{GameAction, MenuChoice, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
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

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the bordered board frame sits in the viewport.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const OVERLAY_BG: Rgb = Rgb::new(10, 10, 20);

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        } = layout;

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        // Background for play area.
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                let cell = snap.board[y as usize][x as usize];
                match PieceKind::from_code(cell) {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Active piece; cells still in the hidden rows are not drawn.
        if let Some(active) = snap.active {
            for (row, col) in active_cells(&active) {
                if col >= 0 && col < BOARD_WIDTH as i16 && row >= 0 && row < BOARD_HEIGHT as i16 {
                    self.draw_board_cell(fb, start_x, start_y, col as u16, row as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        self.draw_overlay(fb, snap, layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Screen rectangles of the overlay buttons for `snap`'s phase, top to bottom.
    pub fn button_rects(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
    ) -> impl Iterator<Item = (Rect, MenuChoice)> {
        button_rects_in(snap.choices, self.layout(viewport))
    }

    /// Action of the overlay button at terminal cell (x, y), if any.
    pub fn button_at(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<GameAction> {
        self.button_rects(snap, viewport)
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, choice)| choice.action)
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG)
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(piece_color(kind), BOARD_BG)
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next {
            Some(next) => {
                for (row, col) in next.shape.cells() {
                    let style = CellStyle::new(piece_color(next.kind), Rgb::new(0, 0, 0));
                    let x = panel_x + col as u16 * self.cell_w;
                    fb.fill_rect(x, y + row as u16, self.cell_w, 1, '█', style);
                }
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: Layout) {
        let (text, number) = match snap.phase {
            Phase::Playing => return,
            Phase::Paused => ("GAME PAUSED", None),
            Phase::LevelingUp => ("NEW LEVEL: ", Some(snap.pending_level())),
            Phase::GameOver => ("GAME OVER!", None),
            Phase::Won => ("YOU WON!", None),
        };

        let top = overlay_top(&layout, snap.choices.len());
        let block_h = overlay_height(snap.choices.len());

        // Blank band across the board behind the text.
        let band = CellStyle::new(Rgb::new(255, 255, 255), OVERLAY_BG);
        fb.fill_rect(
            layout.start_x + 1,
            top.saturating_sub(1).max(layout.start_y + 1),
            layout.frame_w - 2,
            block_h + 2,
            ' ',
            band,
        );

        let title = CellStyle { bold: true, ..band };
        let text_w = text.chars().count() as u16 + number.map_or(0, digit_count);
        let x = layout.start_x + layout.frame_w.saturating_sub(text_w) / 2;
        let end = fb.put_str(x, top, text, title);
        if let Some(n) = number {
            fb.put_u32(end, top, n, title);
        }

        let button = CellStyle::new(Rgb::new(240, 220, 80), OVERLAY_BG);
        for (rect, choice) in button_rects_in(snap.choices, layout) {
            let cx = fb.put_str(rect.x, rect.y, "[ ", button);
            let cx = fb.put_str(cx, rect.y, choice.label, CellStyle { bold: true, ..button });
            fb.put_str(cx, rect.y, " ]", button);
        }
    }
}

/// Rows used by an overlay: the title, plus a gap and one row per button.
fn overlay_height(buttons: usize) -> u16 {
    if buttons == 0 {
        1
    } else {
        2 + buttons as u16
    }
}

fn overlay_top(layout: &Layout, buttons: usize) -> u16 {
    layout.start_y + layout.frame_h.saturating_sub(overlay_height(buttons)) / 2
}

fn button_rects_in(
    choices: &'static [MenuChoice],
    layout: Layout,
) -> impl Iterator<Item = (Rect, MenuChoice)> {
    let top = overlay_top(&layout, choices.len());
    choices.iter().enumerate().map(move |(i, choice)| {
        let w = button_width(choice);
        let x = layout.start_x + layout.frame_w.saturating_sub(w) / 2;
        (Rect::new(x, top + 2 + i as u16, w, 1), *choice)
    })
}

/// "[ label ]"
fn button_width(choice: &MenuChoice) -> u16 {
    choice.label.chars().count() as u16 + 4
}

fn active_cells(active: &ActiveSnapshot) -> impl Iterator<Item = (i16, i16)> + '_ {
    active
        .shape
        .cells()
        .map(move |(r, c)| (active.row as i16 + r as i16, active.col as i16 + c as i16))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn snap_in(phase: Phase) -> GameSnapshot {
        GameSnapshot {
            phase,
            choices: phase.choices(),
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn overlay_is_vertically_centred_in_frame() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(22, 22));
        assert_eq!(overlay_top(&layout, 0), 10);
        // Title, gap and two buttons.
        assert_eq!(overlay_top(&layout, 2), 9);
    }

    #[test]
    fn buttons_are_stacked_and_centred() {
        let view = GameView::default();
        let rects: Vec<_> = view
            .button_rects(&snap_in(Phase::Won), Viewport::new(22, 22))
            .collect();

        assert_eq!(rects.len(), 2);
        let (restart, first) = rects[0];
        let (cont, second) = rects[1];
        assert_eq!(first.action, GameAction::Restart);
        assert_eq!(second.action, GameAction::Continue);
        assert_eq!(restart, Rect::new(5, 11, 11, 1));
        assert_eq!(cont, Rect::new(5, 12, 12, 1));
    }
}
