//! Full-screen terminal surface drawn with half-block cells.
//!
//! Every cell shows two vertically stacked surface pixels: the upper one as the
//! foreground of `▀`, the lower one as the background.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::color::Rgb;

/// Surface pixels per terminal row.
pub const PIXELS_PER_ROW: u32 = 2;

/// One line of text drawn over the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Current terminal size in cells as `(cols, rows)`.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) if size.cols > 0 && size.rows > 0 => Ok((size.cols, size.rows)),
        _ => terminal::size(),
    }
}

/// Surface size in pixels for a terminal of `cols` x `rows` cells.
pub fn surface_size(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32, rows as u32 * PIXELS_PER_ROW)
}

/// Raw-mode alternate screen; restored when dropped.
pub struct TerminalSurface {
    out: Stdout,
}

impl TerminalSurface {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(TerminalSurface { out })
    }

    /// Writes `pixels` (`cols` x `rows * 2`, row-major) followed by the overlay.
    pub fn present(
        &mut self,
        pixels: &[Rgb],
        cols: u16,
        rows: u16,
        overlay: &[OverlayLine],
    ) -> io::Result<()> {
        let width = cols as usize;
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..rows as usize {
            queue!(self.out, MoveTo(0, row as u16))?;
            for col in 0..width {
                let top = pixels
                    .get(row * 2 * width + col)
                    .copied()
                    .unwrap_or_default();
                let bottom = pixels
                    .get((row * 2 + 1) * width + col)
                    .copied()
                    .unwrap_or_default();
                if current != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(top.into()),
                        SetBackgroundColor(bottom.into())
                    )?;
                    current = Some((top, bottom));
                }
                queue!(self.out, Print('▀'))?;
            }
        }

        for line in overlay.iter().filter(|l| l.row < rows) {
            let text: String = line.text.chars().take(width.saturating_sub(1)).collect();
            queue!(
                self.out,
                MoveTo(1, line.row),
                SetForegroundColor(line.fg.into()),
                SetBackgroundColor(line.bg.into()),
                Print(text)
            )?;
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}
