use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use quadfall_engine::{Game, PlayMode, SessionState};
use quadfall_runtime::{App, RenderMode, Runtime};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tracing::info;

use crate::ui::widgets::SessionDisplay;

const FPS: f64 = 60.0;

#[derive(Debug)]
pub(crate) struct PlayApp {
    game: Game,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(game: Game) -> Self {
        Self {
            game,
            is_exiting: false,
        }
    }

    fn help_text(&self) -> &'static str {
        match (self.game.mode(), self.game.state()) {
            (PlayMode::Manual, SessionState::Playing) => {
                "← → (Move) | ↓ (Soft Drop) | ↑ X (Rotate) | Z (Rotate Back) | Space (Drop) | P (Pause) | R (Restart) | Q (Quit)"
            }
            (PlayMode::Manual, SessionState::Paused) => "P (Resume) | R (Restart) | Q (Quit)",
            _ => "R (Restart) | Q (Quit)",
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        // The game rejects piece commands when they do not apply.
        match key.code {
            KeyCode::Left => _ = self.game.move_left(),
            KeyCode::Right => _ = self.game.move_right(),
            KeyCode::Down => _ = self.game.soft_drop(),
            KeyCode::Up | KeyCode::Char('x') => _ = self.game.rotate_cw(),
            KeyCode::Char('z') => _ = self.game.rotate_ccw(),
            KeyCode::Char(' ') => _ = self.game.hard_drop(),
            KeyCode::Char('p') => _ = self.game.toggle_pause(),
            KeyCode::Char('r') => self.game.restart(),
            KeyCode::Char('q') | KeyCode::Esc => {
                info!(score = self.game.score(), lines = self.game.lines(), "quit");
                self.is_exiting = true;
            }
            _ => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display =
            SessionDisplay::new(self.game.session(), self.game.mode()).show_ghost(true);
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(session_display.height()), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, delta: Duration) {
        self.game.tick(delta);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use quadfall_engine::{EngineConfig, PieceSeed};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn manual_app() -> PlayApp {
        let seed = PieceSeed::from_bytes([3; 16]);
        PlayApp::new(Game::manual(EngineConfig::default(), Some(seed)))
    }

    #[test]
    fn test_space_hard_drops() {
        let mut app = manual_app();
        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(app.game.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_pause_and_restart_keys() {
        let mut app = manual_app();
        app.handle_key(press(KeyCode::Char('p')));
        assert!(app.game.is_paused());
        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(app.game.stats().completed_pieces(), 0);

        app.handle_key(press(KeyCode::Char('p')));
        app.handle_key(press(KeyCode::Char(' ')));
        app.handle_key(press(KeyCode::Char('r')));
        assert_eq!(app.game.stats().completed_pieces(), 0);
        assert!(app.game.state().is_playing());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = manual_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(!app.should_exit());
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_rotate_keys_change_rotation() {
        let mut app = manual_app();
        let kind = app.game.current_piece().unwrap().kind();
        app.handle_key(press(KeyCode::Up));
        let expected = 1 % kind.rotation_count();
        assert_eq!(app.game.current_piece().unwrap().rotation(), expected);
        app.handle_key(press(KeyCode::Char('z')));
        assert_eq!(app.game.current_piece().unwrap().rotation(), 0);
    }
}
