//! Minimal tick/render loop for terminal games.
//!
//! [`Runtime::run`] drives an [`App`]: ticks carry the measured time since
//! the previous tick, renders redraw the frame, and terminal events are
//! forwarded as they arrive.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
