use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{ListState, Paragraph, Wrap},
};

use crate::app::dashboard::DashboardView;
use crate::ui::components::chart::tooltip_text;
use crate::ui::components::{render_price_chart, render_selector, ChartCursor};
use crate::ui::styles::{error_line, header_text, secondary_line};

const HELP: &str = "↑/↓ move • Enter select • ←/→ inspect • r reload • q quit";
const SELECTOR_WIDTH: u16 = 34;

/// What the controller should do in response to a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Select(String),
    Reload,
    Quit,
}

/// Screen-local state: the highlighted selector row and the chart cursor.
#[derive(Debug, Default)]
pub struct DashboardScreen {
    list_state: ListState,
    cursor: ChartCursor,
    charted: Option<String>,
}

impl DashboardScreen {
    /// Keep the highlight inside the option list and reset the cursor when a new series lands.
    pub fn sync(&mut self, view: &DashboardView<'_>) {
        match &view.selector {
            Some(selector) if !selector.options.is_empty() => {
                let len = selector.options.len();
                match self.list_state.selected() {
                    Some(idx) if idx < len => {}
                    _ => self
                        .list_state
                        .select(Some(selector.selected_index().unwrap_or(0))),
                }
            }
            _ => self.list_state.select(None),
        }

        let charted = view
            .chart
            .as_ref()
            .filter(|chart| !chart.stale)
            .map(|chart| chart.series.asset_id().to_string());
        if charted.is_some() && charted != self.charted {
            self.cursor.reset();
            self.charted = charted;
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &DashboardView<'_>) -> ScreenAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenAction::Quit;
        }

        let options = view
            .selector
            .as_ref()
            .map(|selector| selector.options.as_slice())
            .unwrap_or(&[]);
        let points = view.chart.as_ref().map(|chart| chart.series.len()).unwrap_or(0);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
            KeyCode::Up | KeyCode::Char('k') if !options.is_empty() => {
                let current = self.list_state.selected().unwrap_or(0);
                let next = if current == 0 {
                    options.len() - 1
                } else {
                    current - 1
                };
                self.list_state.select(Some(next));
                ScreenAction::None
            }
            KeyCode::Down | KeyCode::Char('j') if !options.is_empty() => {
                let current = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some((current + 1) % options.len()));
                ScreenAction::None
            }
            KeyCode::Enter => self
                .list_state
                .selected()
                .and_then(|idx| options.get(idx))
                .map(|option| ScreenAction::Select(option.value.to_string()))
                .unwrap_or(ScreenAction::None),
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor.prev(points);
                ScreenAction::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor.next(points);
                ScreenAction::None
            }
            KeyCode::Char('r') if view.selector.is_some() => ScreenAction::Reload,
            _ => ScreenAction::None,
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, view: &DashboardView<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(f.size());

        f.render_widget(Paragraph::new(header_text(view.heading)), rows[0]);

        if let Some(status) = view.status_line() {
            let line = if view.loading {
                secondary_line(status)
            } else {
                error_line(status)
            };
            f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), rows[1]);
        }

        if let Some(selector) = &view.selector {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SELECTOR_WIDTH), Constraint::Min(10)])
                .split(rows[2]);
            render_selector(f, columns[0], selector, &mut self.list_state);

            if let Some(chart) = &view.chart {
                let chart_rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(3), Constraint::Length(1)])
                    .split(columns[1]);
                render_price_chart(f, chart_rows[0], chart, &self.cursor);
                if let Some(tooltip) = tooltip_text(chart, &self.cursor) {
                    f.render_widget(Paragraph::new(Line::from(tooltip)), chart_rows[1]);
                }
            }
        }

        f.render_widget(Paragraph::new(secondary_line(HELP)), rows[3]);
    }
}
