mod app_state;
mod card_widget;
mod form_widget;
mod key_handler;
mod notice_popup;
mod status_bar;
mod topic_list;
mod ui;

use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use crate::app::CliApp;
use app_state::TuiState;

/// How long to wait for input before checking for session changes
const SESSION_POLL: Duration = Duration::from_millis(100);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen, undone on drop even when the loop errors
struct AltScreen {
    terminal: Tui,
}

impl AltScreen {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for AltScreen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Resolve the session for `initial_path`, then hand the terminal to the study UI
pub fn run(config_path: Option<&Path>, initial_path: &str) -> Result<()> {
    let mut state = TuiState::new(CliApp::new(config_path, initial_path)?);
    let mut screen = AltScreen::enter()?;

    while !state.quit {
        screen.terminal.draw(|f| ui::draw(f, &mut state))?;
        if event::poll(SESSION_POLL)? {
            dispatch(&mut state, event::read()?);
        }
        state.tick();
    }
    Ok(())
}

fn dispatch(state: &mut TuiState, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_handler::handle_key(state, key),
        Event::Mouse(mouse) => key_handler::handle_mouse(state, mouse),
        _ => {}
    }
}
