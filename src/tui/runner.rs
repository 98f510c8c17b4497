//! Terminal event loop for the live view.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::debug;

use super::pi_app::PiApp;
use super::view;
use crate::engine::SampleSource;
use crate::error::SimResult;

/// Take over the terminal and run `app` until the user quits.
///
/// Raw mode and the alternate screen are undone on every exit path,
/// including failures while setting them up.
///
/// # Errors
///
/// Returns an I/O error if the terminal cannot be set up, drawn to, or read.
pub fn run<S: SampleSource>(app: &mut PiApp<S>, tick_rate: Duration) -> SimResult<()> {
    enable_raw_mode()?;
    let result = restore_after(|| run_on_alternate_screen(app, tick_rate), disable_raw_mode);
    debug!(frames = app.frame_count, "live view closed");
    result
}

fn run_on_alternate_screen<S: SampleSource>(
    app: &mut PiApp<S>,
    tick_rate: Duration,
) -> SimResult<()> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    restore_after(
        || {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            let result = event_loop(&mut terminal, app, tick_rate);
            terminal.show_cursor()?;
            result
        },
        || execute!(io::stdout(), LeaveAlternateScreen),
    )
}

/// Run `body`, then `restore` whatever the outcome. The body's error wins
/// over a restore error.
fn restore_after<T, B, R>(body: B, restore: R) -> SimResult<T>
where
    B: FnOnce() -> SimResult<T>,
    R: FnOnce() -> io::Result<()>,
{
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn event_loop<B: Backend, S: SampleSource>(
    terminal: &mut Terminal<B>,
    app: &mut PiApp<S>,
    tick_rate: Duration,
) -> SimResult<()> {
    loop {
        let start = Instant::now();
        terminal.draw(|f| view::ui(f, app))?;

        let timeout = tick_rate.saturating_sub(start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.update();
    }
}
