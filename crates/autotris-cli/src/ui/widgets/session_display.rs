use autotris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full game screen: hold and stats on the left, the board in the middle and
/// the next piece on the right.
///
/// The border color reflects the session state. While the automated player is
/// in control the border is magenta.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    auto_play: bool,
    block_padding: Padding,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            show_ghost: true,
            auto_play: false,
            block_padding: Padding::horizontal(1),
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub fn auto_play(self, auto_play: bool) -> Self {
        Self { auto_play, ..self }
    }

    fn panel(&self, title: &'static str, border: Color) -> Block<'static> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(self.block_padding)
            .border_style(border)
            .style(style::DEFAULT)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let session = self.session;
        let border = match session.session_state() {
            SessionState::Playing if self.auto_play => color::MAGENTA,
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_board = {
            let widget = BoardDisplay::new(session.board())
                .block(Block::bordered().border_style(border).style(style::DEFAULT));
            if session.session_state().is_game_over() {
                widget
            } else if self.show_ghost {
                widget
                    .ghost(session.simulate_drop_position())
                    .falling_piece(*session.falling_piece())
            } else {
                widget.falling_piece(*session.falling_piece())
            }
        };
        let hold_panel = {
            let panel = PieceDisplay::new().block(self.panel("HOLD", border));
            match session.held_piece() {
                Some(kind) => panel.piece(kind),
                None => panel,
            }
        };
        let next_panel = PieceDisplay::new()
            .piece(session.next_piece())
            .block(self.panel("NEXT", border));
        let stats_panel = SessionStatsDisplay::new(session.stats()).block(self.panel("STATS", border));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), stats_panel.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(stats_panel.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let [hold_area] = Layout::horizontal([Constraint::Length(hold_panel.width())])
            .flex(Flex::End)
            .areas(hold_area);
        let [stats_area] = Layout::horizontal([Constraint::Length(stats_panel.width())])
            .flex(Flex::End)
            .areas(stats_area);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            SessionState::GameOver => {
                Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };
        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            Text::styled(text, style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
