//! Terminal UI for Strictly Minesweeper.

mod app;
mod input;
mod renderer;
mod ui;

pub use app::App;
pub use input::{Action, Direction, action_for, move_cursor};
pub use renderer::{ChannelRenderer, GameEvent};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::{Backend, CrosstermBackend}};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::coordinator::{CoordinatorError, GameHandle, Termination, init_game};
use crate::render::BoardView;

/// Runs one game in the terminal until it is won, lost, or quit.
///
/// Failing to set up the terminal is fatal: the game is stopped, the
/// terminal restored, and the error returned.
#[instrument(skip_all, fields(board_size = config.board_size(), mines = config.mine_quantity()))]
pub async fn run_tui(config: GameConfig) -> Result<Termination> {
    info!("Starting Strictly Minesweeper TUI");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let coordinator = init_game(&config, ChannelRenderer::new(event_tx))?;
    let handle = coordinator.handle();

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            coordinator.end_game().await;
            return Err(e);
        }
    };

    let app = App::new(BoardView::of(&handle.snapshot()), *config.mine_quantity());
    let res = run_app(&mut terminal, app, &handle, &mut event_rx).await;

    coordinator.end_game().await;

    restore_terminal(terminal.backend_mut())?;

    res
}

/// Enters raw mode and the alternate screen. Undoes both if any step fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    let terminal = execute!(stdout, EnterAlternateScreen)
        .context("Failed to enter alternate screen")
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
        });

    if terminal.is_err()
        && let Err(e) = restore_terminal(&mut io::stdout())
    {
        warn!(error = %e, "Failed to restore terminal after setup error");
    }
    terminal
}

/// Leaves raw mode and the alternate screen and shows the cursor.
fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, cursor::Show)
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    handle: &GameHandle,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<Termination>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Apply every redraw the render worker has forwarded so far.
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        if let Some(termination) = handle.termination() {
            app.finish(termination);
            terminal.draw(|f| ui::draw(f, &app))?;
            info!(?termination, "Session ended");
            return Ok(termination);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }

            let Some(action) = action_for(key.code) else {
                continue;
            };
            debug!(?action, "Key action");

            let result = match action {
                Action::Move(direction) => {
                    app.move_cursor(direction);
                    Ok(())
                }
                Action::Reveal => handle.reveal(app.selected()).await,
                Action::ToggleFlag => handle.toggle_flag(app.selected()).await,
                Action::Quit => {
                    handle.quit();
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(CoordinatorError::GameFinished) => app.set_status("The game is over."),
                Err(e @ CoordinatorError::Closed) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::terminal::is_raw_mode_enabled;

    #[test]
    fn test_restore_terminal_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_terminal(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "{written:?}");
        assert!(written.contains("\x1b[?25h"), "{written:?}");
        assert!(!is_raw_mode_enabled().unwrap());
    }
}
