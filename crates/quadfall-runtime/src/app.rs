use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for TUI applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the loop starts. Use this to configure tick and render rates.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Advances application state by `delta`, the measured time since the previous tick.
    fn update(&mut self, runtime: &mut Runtime, delta: Duration);
}
