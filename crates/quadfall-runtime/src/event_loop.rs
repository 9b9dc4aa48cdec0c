use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// When frames are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Fixed frame interval.
    Interval(Duration),
    /// After every tick or terminal event.
    #[default]
    OnDirty,
    /// After state changes, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    /// `Interval` mode from a frame rate in FPS.
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }

    /// `Throttled` mode from a frame rate in FPS.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Schedules ticks and renders around blocking terminal input.
///
/// Ticks report the wall-clock time since the previous tick, not the nominal
/// interval, so slow frames still advance game timers by the right amount.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Option<Instant>,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: None,
            last_render: None,
            // first frame
            dirty: true,
        }
    }
}

impl EventLoop {
    /// Pass `None` to disable ticks.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick or render is due or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Tick or render scheduled at or before `now`. Ticks win ties.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval {
            match self.last_tick {
                // The first tick only starts the clock.
                None => self.last_tick = Some(now),
                Some(last) => {
                    let delta = now.saturating_duration_since(last);
                    if delta >= interval {
                        self.last_tick = Some(now);
                        self.dirty = true;
                        return Some(TuiEvent::Tick(delta));
                    }
                }
            }
        }

        let since_render = self
            .last_render
            .map(|last| now.saturating_duration_since(last));
        let do_render = match self.render_mode {
            RenderMode::Interval(interval) => since_render.is_none_or(|d| d >= interval),
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && since_render.is_none_or(|d| d >= interval)
            }
        };
        if do_render {
            self.last_render = Some(now);
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self
            .tick_interval
            .map(|interval| self.last_tick.map_or(now, |last| last + interval));
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => {
                Some(self.last_render.map_or(now, |last| last + interval))
            }
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self
                .dirty
                .then(|| self.last_render.map_or(now, |last| last + interval)),
        };
        let next_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_at.saturating_duration_since(now))
    }
}
