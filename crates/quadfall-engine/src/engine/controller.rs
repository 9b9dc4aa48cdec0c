use std::{fmt, time::Duration};

use super::{GameSession, GravityConfig};

/// Drives a [`GameSession`] forward in time.
///
/// The manual player uses [`GravityController`]; the automatic player plugs
/// in a controller that places whole pieces on a cooldown.
pub trait Controller: fmt::Debug {
    /// Advances by `delta`. Only called while the session is playing.
    fn update(&mut self, session: &mut GameSession, delta: Duration);

    /// Restarts the internal timer, e.g. after a hard drop.
    fn reset_timer(&mut self) {}
}

/// Moves the falling piece down one row per gravity interval.
///
/// The accumulator resets to zero each time it fires, so at most one row is
/// applied per update.
#[derive(Debug, Clone)]
pub struct GravityController {
    gravity: GravityConfig,
    accumulated: Duration,
}

impl GravityController {
    #[must_use]
    pub fn new(gravity: GravityConfig) -> Self {
        Self {
            gravity,
            accumulated: Duration::ZERO,
        }
    }
}

impl Controller for GravityController {
    fn update(&mut self, session: &mut GameSession, delta: Duration) {
        self.accumulated += delta;
        if self.accumulated >= self.gravity.interval(session.level()) {
            self.accumulated = Duration::ZERO;
            session.gravity_step();
        }
    }

    fn reset_timer(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceBag, PieceSeed, ScoringPolicy};

    fn session() -> GameSession {
        GameSession::new(
            PieceBag::with_seed(PieceSeed::from_bytes([3; 16])),
            ScoringPolicy::Classic,
        )
    }

    fn row(session: &GameSession) -> i32 {
        session.current_piece().unwrap().position().row
    }

    #[test]
    fn test_falls_once_per_interval() {
        let mut session = session();
        let mut controller = GravityController::new(GravityConfig::default());

        controller.update(&mut session, Duration::from_millis(500));
        assert_eq!(row(&session), 0);
        controller.update(&mut session, Duration::from_millis(300));
        assert_eq!(row(&session), 1);

        // A long frame still moves a single row.
        controller.update(&mut session, Duration::from_secs(5));
        assert_eq!(row(&session), 2);
    }

    #[test]
    fn test_reset_timer() {
        let mut session = session();
        let mut controller = GravityController::new(GravityConfig::default());
        controller.update(&mut session, Duration::from_millis(700));
        controller.reset_timer();
        controller.update(&mut session, Duration::from_millis(700));
        assert_eq!(row(&session), 0);
    }
}
