use std::time::Duration;

use autotris_engine::{GameSession, PieceSeed, SessionState};
use autotris_runtime::{App, Runtime, TimerId};
use autotris_search::AutoPlayer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::SessionDisplay;

/// Who moves the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
enum Controller {
    Human,
    Auto,
}

/// Interactive game: gravity on the fall timer, the automated player on the
/// actuate timer.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    player: AutoPlayer,
    controller: Controller,
    step_interval: Duration,
    is_exiting: bool,
}

impl PlayApp {
    pub fn manual(session: GameSession, player: AutoPlayer, step_interval: Duration) -> Self {
        Self::new(session, player, Controller::Human, step_interval)
    }

    pub fn auto(session: GameSession, player: AutoPlayer, step_interval: Duration) -> Self {
        Self::new(session, player, Controller::Auto, step_interval)
    }

    fn new(
        session: GameSession,
        player: AutoPlayer,
        controller: Controller,
        step_interval: Duration,
    ) -> Self {
        Self {
            session,
            player,
            controller,
            step_interval,
            is_exiting: false,
        }
    }

    /// Brings the timers in line with the session: the fall interval follows
    /// the level, the actuate timer runs only under automated control.
    fn sync_timers(&self, runtime: &mut Runtime) {
        let running = !self.session.session_state().is_game_over();
        let fall = running.then(|| self.session.drop_delay());
        if runtime.timer_interval(TimerId::Fall) != fall {
            log::debug!("fall interval: {fall:?}");
            runtime.set_timer(TimerId::Fall, fall);
        }
        let actuate = (running && self.controller.is_auto()).then_some(self.step_interval);
        runtime.set_timer(TimerId::Actuate, actuate);
    }

    fn toggle_pause(&mut self, runtime: &mut Runtime) {
        self.session.toggle_pause();
        match self.session.session_state() {
            SessionState::Paused => runtime.pause_timers(),
            SessionState::Playing => runtime.resume_timers(),
            SessionState::GameOver => {}
        }
    }

    fn restart(&mut self, runtime: &mut Runtime) {
        let seed: PieceSeed = rand::random();
        log::info!("restarting session with seed {seed}");
        self.session.restart(Some(seed));
        self.player.reset();
        if runtime.timers_paused() {
            runtime.resume_timers();
        }
    }

    fn toggle_controller(&mut self) {
        self.controller = match self.controller {
            Controller::Human => Controller::Auto,
            Controller::Auto => Controller::Human,
        };
        self.player.reset();
        log::info!("controller: {:?}", self.controller);
    }

    fn handle_key(&mut self, runtime: &mut Runtime, key: KeyEvent) {
        let state = self.session.session_state();
        let manual = state.is_playing() && self.controller.is_human();

        match key.code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('p') if !state.is_game_over() => self.toggle_pause(runtime),
            KeyCode::Char('r') => self.restart(runtime),
            KeyCode::Char('a') if !state.is_game_over() => self.toggle_controller(),
            KeyCode::Left if manual => _ = self.session.try_move_left(),
            KeyCode::Right if manual => _ = self.session.try_move_right(),
            KeyCode::Down if manual => _ = self.session.try_soft_drop(),
            KeyCode::Up if manual => _ = self.session.hard_drop_and_complete(),
            KeyCode::Char('z') if manual => _ = self.session.try_rotate_left(),
            KeyCode::Char('x') if manual => _ = self.session.try_rotate_right(),
            KeyCode::Char(' ') if manual => _ = self.session.try_hold(),
            _ => return,
        }
        self.sync_timers(runtime);
    }

    fn help_text(&self) -> String {
        let ai = if self.controller.is_auto() {
            "a (AI: ON)"
        } else {
            "a (AI: OFF)"
        };
        match self.session.session_state() {
            SessionState::Playing if self.controller.is_auto() => {
                format!("Controls: {ai} | p (Pause) | r (Restart) | q (Quit)")
            }
            SessionState::Playing => format!(
                "Controls: ←→ (Move) | ↓ (Soft) | ↑ (Hard) | z/x (Rotate) | Space (Hold) | {ai} | p | r | q"
            ),
            SessionState::Paused => "Controls: p (Resume) | r (Restart) | q (Quit)".to_owned(),
            SessionState::GameOver => "Controls: r (Restart) | q (Quit)".to_owned(),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        self.sync_timers(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(runtime, key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display =
            SessionDisplay::new(&self.session).auto_play(self.controller.is_auto());
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn on_tick(&mut self, runtime: &mut Runtime, timer: TimerId) {
        match timer {
            TimerId::Fall => {
                if let Some(lines) = self.session.fall_tick()
                    && lines > 0
                {
                    log::debug!("cleared {lines} lines");
                }
            }
            TimerId::Actuate => {
                if self.controller.is_auto() {
                    _ = self.player.step(&mut self.session);
                }
            }
        }
        self.sync_timers(runtime);
    }
}
