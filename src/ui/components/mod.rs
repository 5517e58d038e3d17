pub mod chart;
pub mod selector;

pub use chart::{render_price_chart, ChartCursor};
pub use selector::render_selector;
