use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::render::Frame;

pub struct TermManager {
    stdout: Stdout,
    // What is currently on screen, so only changed glyphs get rewritten.
    shown: Option<Frame>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), shown: None }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Waits up to `timeout` for a terminal event.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if poll(timeout)? {
            read().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let previous = match self.shown.take() {
            Some(shown) if shown.width() == frame.width() && shown.height() == frame.height() => Some(shown),
            _ => {
                queue!(self.stdout, terminal::Clear(ClearType::All))?;
                None
            }
        };

        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let glyph = match frame.glyph(x, y) {
                    Some(glyph) => glyph,
                    None => continue,
                };
                if previous.as_ref().and_then(|p| p.glyph(x, y)) == Some(glyph) {
                    continue;
                }
                queue!(self.stdout, cursor::MoveTo(x, y), SetForegroundColor(glyph.color), Print(glyph.ch))?;
            }
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        self.shown = Some(frame.clone());
        Ok(())
    }
}
