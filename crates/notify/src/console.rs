//! Terminal display: the message in its light color above a row of
//! "pixels" standing in for the LED strip.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use helping_core::{Rgb, WallClockTime};

use crate::traits::{RenderError, RenderSink, IDLE_COLOR, IDLE_PATTERN, STARTUP_PATTERN};

const PIXEL: &str = "● ";

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Draws on any writer; [`ConsoleSink::stdout`] for the real terminal.
pub struct ConsoleSink<W: Write + Send> {
    out: W,
    pixel_count: usize,
    clear_screen: bool,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(pixel_count: usize) -> Self {
        Self::new(io::stdout(), pixel_count)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W, pixel_count: usize) -> Self {
        Self {
            out,
            pixel_count,
            clear_screen: true,
        }
    }

    /// Append instead of clearing the screen before each frame.
    pub fn without_clear(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw one frame: text line, then one pixel per light, colored by
    /// cycling through `lights`.
    fn draw(&mut self, text: &str, text_color: Rgb, lights: &[Rgb]) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        queue!(
            self.out,
            SetForegroundColor(to_color(text_color)),
            Print(text),
            Print("\n"),
        )?;
        if !lights.is_empty() {
            for i in 0..self.pixel_count {
                let color = lights[i % lights.len()];
                queue!(self.out, SetForegroundColor(to_color(color)), Print(PIXEL))?;
            }
        }
        queue!(self.out, ResetColor, Print("\n"))?;
        self.out.flush()
    }
}

impl<W: Write + Send> RenderSink for ConsoleSink<W> {
    fn render(&mut self, message: &str, color: Rgb) -> Result<(), RenderError> {
        self.draw(message, color, &[color])?;
        Ok(())
    }

    fn show_idle(&mut self, now: &WallClockTime) -> Result<(), RenderError> {
        self.draw(&now.hh_mm(), IDLE_COLOR, &IDLE_PATTERN)?;
        Ok(())
    }

    fn show_startup(&mut self) -> Result<(), RenderError> {
        self.draw("helping hands", Rgb::WHITE, &STARTUP_PATTERN)?;
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "console"
    }
}
