use std::io::{self, Stdout};

use crossterm::{execute, terminal};
use log::{debug, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::app::dashboard::DashboardView;
use crate::error::Result;
use crate::ui::screens::DashboardScreen;

/// Surface the dashboard screen is drawn on.
///
/// Opened on stdout it owns raw mode and the alternate screen, and gives both
/// back on quit, on a failed draw, or when dropped.
pub struct DashboardTerminal<B: Backend> {
    terminal: Terminal<B>,
    raw: bool,
    restored: bool,
}

impl DashboardTerminal<CrosstermBackend<Stdout>> {
    pub fn open() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, terminal::EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave_raw_screen();
                return Err(err.into());
            }
        };

        let mut opened = Self {
            terminal,
            raw: true,
            restored: false,
        };
        opened.terminal.hide_cursor()?;
        debug!("dashboard terminal opened");
        Ok(opened)
    }
}

impl<B: Backend> DashboardTerminal<B> {
    /// Draw into any backend without touching the tty modes.
    pub fn headless(backend: B) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            raw: false,
            restored: false,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Render one frame of the dashboard. A failed draw restores the terminal
    /// before the error reaches the caller.
    pub fn draw(&mut self, screen: &mut DashboardScreen, view: &DashboardView<'_>) -> Result<()> {
        if let Err(err) = self.terminal.draw(|f| screen.render(f, view)) {
            warn!("dashboard draw failed: {err}");
            self.restore()?;
            return Err(err.into());
        }
        Ok(())
    }

    /// Give the terminal back. Only the first call does anything.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.terminal.show_cursor()?;
        if self.raw {
            leave_raw_screen()?;
        }
        debug!("dashboard terminal restored");
        Ok(())
    }
}

impl<B: Backend> Drop for DashboardTerminal<B> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn leave_raw_screen() -> io::Result<()> {
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn failed_list_view() -> DashboardView<'static> {
        DashboardView {
            heading: "Crypto Dashboard",
            loading: false,
            error: Some("Network Error"),
            selector: None,
            chart: None,
        }
    }

    fn buffer_text(term: &DashboardTerminal<TestBackend>) -> String {
        term.backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_heading_and_status_line() {
        let mut term = DashboardTerminal::headless(TestBackend::new(80, 12)).unwrap();
        let mut screen = DashboardScreen::default();

        term.draw(&mut screen, &failed_list_view()).unwrap();

        let text = buffer_text(&term);
        assert!(text.contains("Crypto Dashboard"));
        assert!(text.contains("Error: Network Error"));
        assert!(!text.contains("Assets"));
    }

    #[test]
    fn restore_runs_once() {
        let mut term = DashboardTerminal::headless(TestBackend::new(40, 6)).unwrap();
        assert!(!term.is_restored());

        term.restore().unwrap();
        term.restore().unwrap();

        assert!(term.is_restored());
    }
}
