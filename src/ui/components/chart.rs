use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::app::dashboard::{ChartView, LegendPlacement};
use crate::market::format_price;
use crate::ui::styles::SERIES_COLOR;

const PRICE_TICKS: usize = 5;
const DATE_TICKS: usize = 3;

/// Inspected point of the chart; `None` follows the latest value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChartCursor {
    index: Option<usize>,
}

impl ChartCursor {
    pub fn position(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.index.unwrap_or(len - 1).min(len - 1))
    }

    pub fn prev(&mut self, len: usize) {
        if let Some(current) = self.position(len) {
            self.index = Some(current.saturating_sub(1));
        }
    }

    pub fn next(&mut self, len: usize) {
        if let Some(current) = self.position(len) {
            let next = current + 1;
            self.index = if next >= len - 1 { None } else { Some(next) };
        }
    }

    pub fn reset(&mut self) {
        self.index = None;
    }
}

/// `{label}: {symbol}{value}` for the point under the cursor.
pub fn tooltip_text(chart: &ChartView<'_>, cursor: &ChartCursor) -> Option<String> {
    let idx = cursor.position(chart.series.len())?;
    let label = chart.series.labels().get(idx)?;
    let value = *chart.series.values().get(idx)?;
    Some(format!("{}: {}", label, format_price(chart.currency_symbol, value)))
}

pub fn render_price_chart(
    f: &mut Frame<'_>,
    area: Rect,
    chart: &ChartView<'_>,
    cursor: &ChartCursor,
) {
    let title = if chart.stale {
        format!("{} (stale)", chart.title)
    } else {
        chart.title.clone()
    };
    let block = Block::default().borders(Borders::ALL).title(title.clone());

    let series = chart.series;
    let Some((min, max)) = series.min_max() else {
        f.render_widget(
            Paragraph::new(format!("No price data returned for {}.", series.asset_id()))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let points: Vec<(f64, f64)> = series
        .values()
        .iter()
        .enumerate()
        .map(|(idx, value)| (idx as f64, *value))
        .collect();
    let cursor_point: Vec<(f64, f64)> = cursor
        .position(points.len())
        .map(|idx| vec![points[idx]])
        .unwrap_or_default();

    let (y_min, y_max) = padded_bounds(min, max);
    let y_labels: Vec<Span> = price_tick_labels(chart.currency_symbol, y_min, y_max, PRICE_TICKS)
        .into_iter()
        .map(Span::raw)
        .collect();

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<Span> = compute_date_ticks(series.labels(), DATE_TICKS)
        .into_iter()
        .map(Span::raw)
        .collect();

    let datasets = vec![
        Dataset::default()
            .name(title)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(SERIES_COLOR))
            .data(&points),
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&cursor_point),
    ];

    let legend_position = match chart.legend {
        LegendPlacement::Top => LegendPosition::Top,
    };

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        )
        .legend_position(Some(legend_position))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 2)));

    f.render_widget(widget, area);
}

/// Keep a flat series from collapsing into a zero-height axis.
fn padded_bounds(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < 1e-9 {
        let span = if min.abs() < 1.0 { 1.0 } else { min.abs() * 0.05 };
        (min - span / 2.0, max + span / 2.0)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

fn compute_price_ticks(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let desired = desired.max(2);
    let step = (max - min) / (desired as f64 - 1.0);
    (0..desired).map(|i| min + step * i as f64).collect()
}

/// Enough decimals that neighbouring ticks differ; cents for anything coarser.
fn price_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 0.01 {
        return 2;
    }
    ((-step.log10()).ceil() as usize + 1).min(12)
}

fn price_tick_labels(symbol: &str, min: f64, max: f64, desired: usize) -> Vec<String> {
    let ticks = compute_price_ticks(min, max, desired);
    let step = ticks.get(1).map(|second| second - ticks[0]).unwrap_or(0.0);
    let precision = price_precision(step);
    ticks
        .into_iter()
        .map(|value| format!("{symbol}{value:.precision$}"))
        .collect()
}

/// First, evenly spaced middle, and last labels; ratatui spreads them along the axis.
fn compute_date_ticks(labels: &[String], desired: usize) -> Vec<String> {
    if labels.is_empty() {
        return Vec::new();
    }

    let last_index = labels.len() - 1;
    if last_index == 0 {
        return vec![labels[0].clone(), labels[0].clone()];
    }

    let desired = desired.max(2).min(labels.len());
    let step = last_index as f64 / (desired - 1) as f64;
    (0..desired)
        .map(|i| ((i as f64 * step).round() as usize).min(last_index))
        .map(|idx| labels[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{PricePoint, PriceSeries};
    use chrono::Utc;

    fn sample_series() -> PriceSeries {
        let points = [
            PricePoint {
                timestamp_ms: 1_700_000_000_000,
                price: 34_000.0,
            },
            PricePoint {
                timestamp_ms: 1_700_086_400_000,
                price: 34_500.5,
            },
            PricePoint {
                timestamp_ms: 1_700_172_800_000,
                price: 33_900.0,
            },
        ];
        PriceSeries::from_points("bitcoin", &points, &Utc, "%d/%m/%Y").unwrap()
    }

    fn view(series: &PriceSeries) -> ChartView<'_> {
        ChartView {
            title: series.title(),
            series,
            stale: false,
            currency_symbol: "$",
            legend: LegendPlacement::Top,
        }
    }

    #[test]
    fn cursor_defaults_to_latest_point_and_clamps() {
        let mut cursor = ChartCursor::default();
        assert_eq!(cursor.position(3), Some(2));
        assert_eq!(cursor.position(0), None);

        cursor.prev(3);
        cursor.prev(3);
        cursor.prev(3);
        assert_eq!(cursor.position(3), Some(0));

        cursor.next(3);
        cursor.next(3);
        assert_eq!(cursor, ChartCursor::default());
        assert_eq!(cursor.position(5), Some(4));
    }

    #[test]
    fn tooltip_prefixes_currency_symbol() {
        let series = sample_series();
        let chart = view(&series);
        let mut cursor = ChartCursor::default();
        cursor.prev(series.len());

        assert_eq!(
            tooltip_text(&chart, &cursor).as_deref(),
            Some("15/11/2023: $34500.5")
        );
    }

    #[test]
    fn date_ticks_cover_first_and_last_label() {
        let labels: Vec<String> = (1..=30).map(|day| format!("{day:02}/11/2023")).collect();
        let ticks = compute_date_ticks(&labels, 3);
        assert_eq!(ticks, ["01/11/2023", "16/11/2023", "30/11/2023"]);
    }

    #[test]
    fn large_prices_keep_cent_labels() {
        let labels = price_tick_labels("$", 30_000.0, 34_000.0, 5);
        assert_eq!(labels.first().map(String::as_str), Some("$30000.00"));
        assert_eq!(labels.last().map(String::as_str), Some("$34000.00"));
    }

    #[test]
    fn sub_cent_prices_get_distinct_labels() {
        let (lo, hi) = padded_bounds(0.000_012, 0.000_015);
        let labels = price_tick_labels("$", lo, hi, 5);

        assert!(labels.iter().all(|label| label != "$0.00"), "{labels:?}");
        let mut unique = labels.clone();
        unique.dedup();
        assert_eq!(unique.len(), labels.len(), "{labels:?}");
    }

    #[test]
    fn flat_series_gets_nonzero_bounds() {
        let (lo, hi) = padded_bounds(1.0, 1.0);
        assert!(hi > lo);
    }

    #[test]
    fn renders_legend_title_into_buffer() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let series = sample_series();
        let chart = view(&series);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_price_chart(f, area, &chart, &ChartCursor::default());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Price of bitcoin"));
    }
}
