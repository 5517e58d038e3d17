use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use crate::app::dashboard::Dashboard;
use crate::app::runtime::FetchRuntime;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::fetch::MarketSource;
use crate::ui::{DashboardScreen, DashboardTerminal, ScreenAction};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Couples the dashboard state machine, the fetch runtime and the terminal screen.
pub struct AppController {
    dashboard: Dashboard,
    runtime: FetchRuntime,
}

impl AppController {
    pub fn new(config: DashboardConfig, source: Arc<dyn MarketSource>) -> Self {
        Self {
            dashboard: Dashboard::new(config),
            runtime: FetchRuntime::new(source),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let start = self.dashboard.start();
        self.runtime.dispatch_opt(start);

        let mut term = DashboardTerminal::open()?;
        let mut screen = DashboardScreen::default();

        loop {
            self.runtime.drain(&mut self.dashboard);

            let view = self.dashboard.view();
            screen.sync(&view);
            term.draw(&mut screen, &view)?;

            let action = if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        screen.handle_key(key, &view)
                    }
                    _ => ScreenAction::None,
                }
            } else {
                ScreenAction::None
            };

            match action {
                ScreenAction::Select(asset_id) => {
                    let next = self.dashboard.select(&asset_id);
                    self.runtime.dispatch_opt(next);
                }
                ScreenAction::Reload => {
                    let next = self.dashboard.reload();
                    self.runtime.dispatch_opt(next);
                }
                ScreenAction::Quit => break,
                ScreenAction::None => {}
            }

            tokio::task::yield_now().await;
        }

        term.restore()?;
        info!("dashboard closed in {:?}", self.dashboard.phase());
        Ok(())
    }
}
