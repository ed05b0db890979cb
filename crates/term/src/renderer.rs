//! TerminalRenderer: puts game frames on a real terminal.
//!
//! Frames are compared row by row with the one currently on screen. A row that
//! differs is rewritten from column 0; unchanged rows are skipped. The first
//! frame and any frame of a new size repaint everything.
//!
//! Sound is a bell byte carried in the same write as the frame that follows
//! the event, so a line clear beeps as the cleared board appears.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, execute,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

const BELL: u8 = 0x07;

pub struct TerminalRenderer {
    out: io::Stdout,
    /// What the terminal shows right now.
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
    bell: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
            bell: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.shown = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        execute!(
            self.out,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint every row on the next frame (after a resize).
    pub fn redraw_all(&mut self) {
        self.shown = None;
    }

    /// Beep together with the next frame.
    pub fn queue_bell(&mut self) {
        self.bell = true;
    }

    /// Write the rows of `fb` that differ from the screen; returns how many.
    ///
    /// `fb` is swapped with the renderer's copy of the screen, so afterwards it
    /// holds stale contents and must be redrawn before the next call.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<u16> {
        let rows = self.compose(fb)?;
        if !self.bytes.is_empty() {
            self.out.write_all(&self.bytes)?;
            self.out.flush()?;
        }
        self.remember(fb);
        Ok(rows)
    }

    /// Encode the frame into `self.bytes` without touching the terminal.
    fn compose(&mut self, fb: &FrameBuffer) -> Result<u16> {
        self.bytes.clear();
        let prev = self
            .shown
            .as_ref()
            .filter(|s| s.width() == fb.width() && s.height() == fb.height());
        if prev.is_none() {
            self.bytes.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut pen = Pen::default();
        let mut written = 0;
        for (y, row) in fb.rows().enumerate() {
            if let Some(prev) = prev {
                if prev.rows().nth(y) == Some(row) {
                    continue;
                }
            }
            self.bytes.queue(cursor::MoveTo(0, y as u16))?;
            write_row(&mut self.bytes, &mut pen, row)?;
            written += 1;
        }
        if written > 0 {
            self.bytes.queue(ResetColor)?;
            self.bytes.queue(SetAttribute(Attribute::Reset))?;
        }

        if std::mem::take(&mut self.bell) {
            self.bytes.push(BELL);
        }
        Ok(written)
    }

    fn remember(&mut self, fb: &mut FrameBuffer) {
        let mut shown = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the style last sent so runs of equal cells share one escape.
#[derive(Default)]
struct Pen(Option<CellStyle>);

impl Pen {
    fn switch(&mut self, out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
        if self.0 == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        out.queue(SetColors(Colors::new(style.fg.into(), style.bg.into())))?;
        self.0 = Some(style);
        Ok(())
    }
}

fn write_row(out: &mut Vec<u8>, pen: &mut Pen, row: &[Cell]) -> io::Result<()> {
    for cell in row {
        pen.switch(out, cell.style)?;
        out.queue(Print(cell.ch))?;
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
