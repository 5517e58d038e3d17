use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::dashboard::SelectorView;
use crate::ui::styles::{highlight_style, selection_style};

/// Asset list; the committed selection is marked, the highlighted row follows the keyboard.
pub fn render_selector(
    f: &mut Frame<'_>,
    area: Rect,
    selector: &SelectorView<'_>,
    state: &mut ListState,
) {
    let items: Vec<ListItem> = selector
        .options
        .iter()
        .map(|option| {
            if option.value == selector.selected {
                ListItem::new(Line::from(vec![
                    Span::styled("● ", selection_style()),
                    Span::styled(option.label.as_str(), selection_style()),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    Span::raw(option.label.as_str()),
                ]))
            }
        })
        .collect();

    let title = format!("Assets ({})", selector.options.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(highlight_style());

    f.render_stateful_widget(list, area, state);
}
