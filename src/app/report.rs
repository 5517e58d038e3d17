use crate::market::{format_price, Asset, PriceSeries};

/// Plain-text market list, one `rank. label [id]` row per asset.
pub fn render_market_list(assets: &[Asset], quote_currency: &str) -> String {
    let mut out = format!(
        "Top {} assets by market cap ({}):\n",
        assets.len(),
        quote_currency.to_uppercase()
    );
    for (rank, asset) in assets.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<28} [{}]\n",
            rank + 1,
            asset.option_label(),
            asset.id
        ));
    }
    out
}

/// Plain-text price series with the same value formatting as the chart tooltip.
pub fn render_series_table(series: &PriceSeries, currency_symbol: &str) -> String {
    let mut out = format!("{} ({} points)\n", series.title(), series.len());
    for (label, value) in series.labels().iter().zip(series.values()) {
        out.push_str(&format!("{:<12} {}\n", label, format_price(currency_symbol, *value)));
    }
    out
}
