//! Live π estimation app state and key handling.
//!
//! Terminal I/O lives in [`super::runner`] and drawing in [`super::view`];
//! everything here is plain state so it can be driven from tests.

use crossterm::event::KeyCode;
use tracing::debug;

use crate::cli::prompt::{check_limit, parse_point_count, COUNT_PROMPT};
use crate::config::{ChartConfig, PiConfig};
use crate::engine::{Phase, SampleSource, Session, SimRng};
use crate::error::SimError;

/// Longest count the reset prompt accepts as typed text.
const MAX_INPUT_LEN: usize = 24;

/// Text entry state for the reset prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountInput {
    /// Characters typed so far.
    pub buffer: String,
    /// Message for the last rejected entry.
    pub error: Option<String>,
}

/// What key presses currently control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive the simulation.
    Normal,
    /// Keys edit the point count for a reset.
    EnterCount(CountInput),
}

/// Application state for the live view.
#[derive(Debug)]
pub struct PiApp<S: SampleSource = SimRng> {
    /// The run being animated.
    pub session: Session<S>,
    /// Key routing.
    pub mode: InputMode,
    /// Chart axis settings.
    pub chart: ChartConfig,
    /// Largest count a reset may request.
    pub max_points: u64,
    /// Frames in which the session was ticked.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: SampleSource> PiApp<S> {
    /// Wrap a session with default settings.
    #[must_use]
    pub fn new(session: Session<S>) -> Self {
        let defaults = PiConfig::default();
        Self::configured(session, defaults.chart, defaults.max_points)
    }

    /// Wrap a session with explicit chart settings and reset limit.
    #[must_use]
    pub fn configured(session: Session<S>, chart: ChartConfig, max_points: u64) -> Self {
        Self {
            session,
            mode: InputMode::Normal,
            chart,
            max_points,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Advance one frame. Sampling stops while the reset prompt is open.
    pub fn update(&mut self) {
        if self.mode != InputMode::Normal {
            return;
        }
        self.session.tick();
        self.frame_count += 1;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match &mut self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::EnterCount(input) => match key {
                KeyCode::Enter => self.submit_count(),
                KeyCode::Esc => {
                    debug!("reset cancelled");
                    self.mode = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    input.buffer.pop();
                }
                KeyCode::Char(c) if !c.is_control() && input.buffer.len() < MAX_INPUT_LEN => {
                    input.buffer.push(c);
                }
                _ => {}
            },
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ' | 'p') => {
                self.session.toggle_pause();
            }
            KeyCode::Char('r') => {
                self.mode = InputMode::EnterCount(CountInput::default());
            }
            _ => {}
        }
    }

    fn submit_count(&mut self) {
        let InputMode::EnterCount(input) = &mut self.mode else {
            return;
        };

        let max_points = self.max_points;
        let outcome = parse_point_count(&input.buffer)
            .and_then(|n| check_limit(n, max_points))
            .and_then(|n| self.session.reset(n));
        match outcome {
            Ok(()) => {
                self.frame_count = 0;
                self.mode = InputMode::Normal;
            }
            Err(SimError::InvalidArgument { message }) => {
                input.buffer.clear();
                input.error = Some(message);
            }
            Err(other) => {
                input.buffer.clear();
                input.error = Some(other.to_string());
            }
        }
    }

    /// Label of the pause/resume control for the current phase.
    #[must_use]
    pub fn pause_label(&self) -> &'static str {
        match self.session.phase() {
            Phase::Paused => "Resume",
            Phase::Running | Phase::Finished => "Pause",
        }
    }

    /// Prompt shown while entering a new count.
    #[must_use]
    pub const fn count_prompt(&self) -> &'static str {
        COUNT_PROMPT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::cli::prompt::{NOT_A_NUMBER, NOT_POSITIVE};

    fn app(total: u64) -> PiApp {
        PiApp::new(Session::new(total, SimRng::new(42), 50).unwrap())
    }

    fn type_text(app: &mut PiApp, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn input_of(app: &PiApp) -> &CountInput {
        match &app.mode {
            InputMode::EnterCount(input) => input,
            InputMode::Normal => panic!("not entering a count"),
        }
    }

    #[test]
    fn test_new_app() {
        let app = app(100);
        assert!(!app.should_quit);
        assert_eq!(app.frame_count, 0);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.session.phase(), Phase::Running);
    }

    #[test]
    fn test_update_ticks_session() {
        let mut app = app(100);
        app.update();
        assert_eq!(app.frame_count, 1);
        assert_eq!(app.session.state().total_points_generated(), 50);
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_handle_key_esc() {
        let mut app = app(100);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_handle_key_pause() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.session.phase(), Phase::Paused);
        assert_eq!(app.pause_label(), "Resume");

        app.handle_key(KeyCode::Char('p'));
        assert_eq!(app.session.phase(), Phase::Running);
        assert_eq!(app.pause_label(), "Pause");
    }

    #[test]
    fn test_update_when_paused_keeps_state() {
        let mut app = app(100);
        app.update();
        app.handle_key(KeyCode::Char(' '));
        let before = app.session.state().clone();
        app.update();
        assert_eq!(app.session.state(), &before);
    }

    #[test]
    fn test_reset_flow() {
        let mut app = app(100);
        app.update();
        app.update();
        assert_eq!(app.session.phase(), Phase::Finished);

        app.handle_key(KeyCode::Char('r'));
        assert!(matches!(app.mode, InputMode::EnterCount(_)));

        type_text(&mut app, "300");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.frame_count, 0);
        assert_eq!(app.session.phase(), Phase::Running);
        assert_eq!(app.session.state().total_points_requested(), 300);
        assert_eq!(app.session.state().total_points_generated(), 0);
    }

    #[test]
    fn test_reset_rejects_non_numeric() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, "abc");
        app.handle_key(KeyCode::Enter);

        let input = input_of(&app);
        assert!(input.buffer.is_empty());
        assert_eq!(input.error.as_deref(), Some(NOT_A_NUMBER));
        assert_eq!(app.session.state().total_points_requested(), 100);
    }

    #[test]
    fn test_reset_rejects_non_positive() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, "-4");
        app.handle_key(KeyCode::Enter);
        assert_eq!(input_of(&app).error.as_deref(), Some(NOT_POSITIVE));

        type_text(&mut app, "0");
        app.handle_key(KeyCode::Enter);
        assert_eq!(input_of(&app).error.as_deref(), Some(NOT_POSITIVE));
    }

    #[test]
    fn test_retry_after_rejection() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, "x");
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "20");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.session.state().total_points_requested(), 20);
    }

    #[test]
    fn test_no_ticks_while_entering_count() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        app.update();
        assert_eq!(app.frame_count, 0);
        assert_eq!(app.session.state().total_points_generated(), 0);
    }

    #[test]
    fn test_keys_while_entering_count_are_text() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Char('q'));
        app.handle_key(KeyCode::Char(' '));

        assert!(!app.should_quit);
        assert_eq!(app.session.phase(), Phase::Running);
        assert_eq!(input_of(&app).buffer, "q ");
    }

    #[test]
    fn test_backspace_edits_buffer() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, "125");
        app.handle_key(KeyCode::Backspace);
        assert_eq!(input_of(&app).buffer, "12");
    }

    #[test]
    fn test_input_length_is_capped() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, &"9".repeat(40));
        assert_eq!(input_of(&app).buffer.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_escape_cancels_reset() {
        let mut app = app(100);
        app.update();
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, "5");
        app.handle_key(KeyCode::Esc);

        assert_eq!(app.mode, InputMode::Normal);
        assert!(!app.should_quit);
        assert_eq!(app.session.state().total_points_generated(), 50);
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut app = app(100);
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.session.phase(), Phase::Running);
    }

    #[test]
    fn test_reset_respects_limit() {
        let session = Session::new(100, SimRng::new(42), 50).unwrap();
        let mut app = PiApp::configured(session, ChartConfig::default(), 1000);
        app.handle_key(KeyCode::Char('r'));
        type_text(&mut app, "1001");
        app.handle_key(KeyCode::Enter);

        let error = input_of(&app).error.clone().unwrap();
        assert!(error.contains("limit is 1000"));
        assert_eq!(app.session.state().total_points_requested(), 100);
    }

    #[test]
    fn test_count_prompt() {
        let app = app(10);
        assert_eq!(app.count_prompt(), COUNT_PROMPT);
    }
}
