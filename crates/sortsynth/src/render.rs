#![forbid(unsafe_code)]

//! One-line bar chart renderer.
//!
//! Each value in `[0, 1)` becomes one block glyph whose height is proportional
//! to the value. Frames overwrite each other in place with a carriage return,
//! so a whole playback animates on a single terminal line.

use std::io::{self, Write};

use sortsynth_runtime::Renderer;

const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Glyph for one value; out-of-range values clamp to the ends.
#[must_use]
pub fn bar_glyph(value: f64) -> char {
    let top = BLOCKS.len() - 1;
    let level = (value.clamp(0.0, 1.0) * top as f64).round() as usize;
    BLOCKS[level.min(top)]
}

/// The glyph line for a whole snapshot.
#[must_use]
pub fn bar_line(snapshot: &[f64]) -> String {
    snapshot.iter().map(|&v| bar_glyph(v)).collect()
}

pub struct BarRenderer<W: Write> {
    out: W,
    frames: u64,
    failed: bool,
}

impl<W: Write> BarRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            failed: false,
        }
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// End the animated line.
    pub fn finish(mut self) -> io::Result<W> {
        if self.frames > 0 {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn draw(&mut self, snapshot: &[f64]) -> io::Result<()> {
        write!(self.out, "\r{}", bar_line(snapshot))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for BarRenderer<W> {
    fn render(&mut self, snapshot: &[f64]) {
        if self.failed {
            return;
        }
        match self.draw(snapshot) {
            Ok(()) => self.frames += 1,
            Err(err) => {
                self.failed = true;
                tracing::warn!(target: "sortsynth.render", error = %err, "terminal output failed");
            }
        }
    }
}
