//! Visualization port for the training loop.
//!
//! - `Visualizer`: trait the training loop renders through
//! - `NoopVisualizer`: draws nothing
//! - `ConsoleVisualizer`: draws an ASCII track per frame, then sleeps

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::track::{Position, TrackLayout};

/// Read-only consumer of track layout and train positions.
pub trait Visualizer {
    /// Called once before the first frame.
    fn show_layout(&mut self, layout: &TrackLayout);

    /// Called after every simulated time step with all train positions.
    fn show_positions(&mut self, positions: &[Position]);
}

/// Visualizer that discards all frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn show_layout(&mut self, _layout: &TrackLayout) {}

    fn show_positions(&mut self, _positions: &[Position]) {}
}

/// Text renderer: one lane per train under a station ruler.
///
/// ```text
///      A . . . B . . . C
/// T0   0 . . . . . . . .
/// T1   1 . . . . . . . .
/// T2   . . . . . . . . 2
/// ```
pub struct ConsoleVisualizer<W: Write> {
    out: W,
    frame_delay: Duration,
    layout: Option<TrackLayout>,
}

impl ConsoleVisualizer<io::Stdout> {
    /// Renders to standard output.
    pub fn stdout(frame_delay: Duration) -> Self {
        Self::new(io::stdout(), frame_delay)
    }
}

impl<W: Write> ConsoleVisualizer<W> {
    pub fn new(out: W, frame_delay: Duration) -> Self {
        Self {
            out,
            frame_delay,
            layout: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, positions: &[Position]) -> String {
        let Some(layout) = &self.layout else {
            return String::new();
        };
        let mut frame = String::from("    ");
        for p in 0..layout.n_states() {
            let mark = layout
                .station_at(p)
                .and_then(|label| label.chars().next())
                .unwrap_or('.');
            frame.push(' ');
            frame.push(mark);
        }
        frame.push('\n');
        for (i, &position) in positions.iter().enumerate() {
            frame.push_str(&format!("T{:<3}", i));
            for p in 0..layout.n_states() {
                frame.push(' ');
                if p == position {
                    frame.push_str(&(i % 10).to_string());
                } else {
                    frame.push('.');
                }
            }
            frame.push('\n');
        }
        frame
    }
}

impl<W: Write> Visualizer for ConsoleVisualizer<W> {
    fn show_layout(&mut self, layout: &TrackLayout) {
        self.layout = Some(layout.clone());
    }

    fn show_positions(&mut self, positions: &[Position]) {
        let frame = self.render(positions);
        if let Err(e) = writeln!(self.out, "{}", frame).and_then(|_| self.out.flush()) {
            warn!("failed to draw frame: {}", e);
        }
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }
}
