use quadfall_engine::{GameSession, PlayMode, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, NextPiecesDisplay, SessionStatsDisplay, color, style,
};

/// Board, stats and preview laid out side by side, with a status popup.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    mode: PlayMode,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
    next_pieces: usize,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, mode: PlayMode) -> Self {
        Self {
            session,
            mode,
            show_ghost: false,
            horizontal_padding: 1,
            vertical_padding: 0,
            next_pieces: 5,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    fn border_color(&self) -> ratatui::style::Color {
        match self.session.state() {
            SessionState::Playing if self.mode.is_automatic() => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    fn game_board(&self) -> BoardDisplay<'a> {
        let title = match self.mode {
            PlayMode::Manual => "MANUAL",
            PlayMode::Automatic => "AUTO",
        };
        let board = BoardDisplay::new(self.session.board())
            .falling_piece(self.session.current_piece().copied())
            .block(
                Block::bordered()
                    .title(Line::from(title).centered())
                    .border_style(self.border_color())
                    .style(style::DEFAULT),
            );
        if self.show_ghost {
            board.ghost(self.session.ghost_piece())
        } else {
            board
        }
    }

    fn next_pieces_column(&self) -> NextPiecesDisplay<'a> {
        NextPiecesDisplay::new(self.session.peek_upcoming(self.next_pieces))
            .block(self.panel("NEXT"))
    }

    /// Rows needed to draw everything.
    pub fn height(&self) -> u16 {
        let stats = SessionStatsDisplay::new(self.session).block(self.panel("STATS"));
        self.game_board()
            .height()
            .max(self.next_pieces_column().height())
            .max(stats.height())
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game_board = self.game_board();
        let next_pieces = self.next_pieces_column();
        let session_stats = SessionStatsDisplay::new(self.session).block(self.panel("STATS"));

        let [stats_column, board_column, next_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_pieces.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(stats_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_pieces.height())]).areas(next_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_pieces.render(next_area, buf);

        let popup = match self.session.state() {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
