//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellValue, MAX_SHAPE_DIM};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Cell colour for each non-empty value (index 1..=7).
const PALETTE: [Rgb; 8] = [
    PLAY_BG,
    Rgb::from_hex(0xff1493), // T
    Rgb::from_hex(0xffd700), // O
    Rgb::from_hex(0xff4500), // L
    Rgb::from_hex(0x1e90ff), // J
    Rgb::from_hex(0x00fa9a), // I
    Rgb::from_hex(0x9400d3), // S
    Rgb::from_hex(0x00ced1), // Z
];

pub fn cell_color(value: CellValue) -> Rgb {
    PALETTE.get(value as usize).copied().unwrap_or(PLAY_BG)
}

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Where the board frame landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let cols = snap.board.width() as u16;
        let rows = snap.board.height() as u16;
        let board_px_w = cols * self.cell_w;
        let board_px_h = rows * self.cell_h;
        let frame = Frame {
            x: 0,
            y: 0,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };
        let frame = Frame {
            x: viewport.width.saturating_sub(frame.w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame.h) / 2,
                AnchorY::Top => 0,
            },
            ..frame
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        // Background for play area.
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, frame, border);

        // Settled cells.
        for (y, row) in snap.board.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    self.draw_board_cell(fb, frame, x as u16, y as u16, v);
                } else {
                    self.draw_empty_cell(fb, frame, x as u16, y as u16);
                }
            }
        }

        // Ghost piece, only while running.
        if let (true, Some(active), Some(ghost_y)) = (snap.running, snap.active, snap.ghost_y) {
            let ghost = active.offset(0, ghost_y - active.y);
            for (x, y, v) in ghost.cells() {
                if in_board(snap, x, y) {
                    let style = CellStyle {
                        fg: cell_color(v),
                        bg: PLAY_BG,
                        bold: false,
                        dim: true,
                    };
                    self.fill_cell_rect(fb, frame, x as u16, y as u16, '░', style);
                }
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            for (x, y, v) in active.cells() {
                if in_board(snap, x, y) {
                    self.draw_board_cell(fb, frame, x as u16, y as u16, v);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        // Overlays.
        if !snap.started {
            draw_overlay_text(fb, frame, "PRESS R");
        } else if snap.paused() {
            draw_overlay_text(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: PLAY_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, v: CellValue) {
        let style = CellStyle {
            fg: cell_color(v),
            bg: PLAY_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
    }

    /// Next shape centered inside a 4x4 cell box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape) {
        let off_x = (MAX_SHAPE_DIM as u16 - shape.width() as u16) / 2;
        let off_y = (MAX_SHAPE_DIM as u16 - shape.height() as u16) / 2;
        for (dx, dy, v) in shape.minos() {
            let style = CellStyle {
                bold: true,
                ..CellStyle::new(cell_color(v), PANEL_BG)
            };
            fb.fill_rect(
                x + (off_x + dx as u16) * self.cell_w,
                y + (off_y + dy as u16) * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }
}

fn in_board(snap: &GameSnapshot, x: i8, y: i8) -> bool {
    snap.board.get(x, y).is_some()
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}
