use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::format_timestamp_label;

/// A tradable coin as listed by the markets endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Selector label, e.g. `Bitcoin (BTC)`.
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }
}

/// One `[timestamp, price]` row of a market chart response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Chart-ready price history: `labels[i]` is the date of `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    asset_id: String,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl PriceSeries {
    /// Reshape decoded points into aligned label/value vectors, keeping upstream order.
    pub fn from_points<Tz>(
        asset_id: &str,
        points: &[PricePoint],
        tz: &Tz,
        date_format: &str,
    ) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut labels = Vec::with_capacity(points.len());
        let mut values = Vec::with_capacity(points.len());

        for (idx, point) in points.iter().enumerate() {
            let label = format_timestamp_label(point.timestamp_ms, tz, date_format).ok_or_else(
                || {
                    AppError::malformed(format!(
                        "prices[{idx}] has out-of-range timestamp {}",
                        point.timestamp_ms
                    ))
                },
            )?;
            labels.push(label);
            values.push(point.price);
        }

        Ok(Self {
            asset_id: asset_id.to_string(),
            labels,
            values,
        })
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn title(&self) -> String {
        series_title(&self.asset_id)
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

pub fn series_title(asset_id: &str) -> String {
    format!("Price of {asset_id}")
}

/// Tooltip text for a single value; the number keeps its plain rendering.
pub fn format_price(currency_symbol: &str, value: f64) -> String {
    format!("{currency_symbol}{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn option_label_uppercases_symbol() {
        let asset = Asset::new("bitcoin", "Bitcoin", "btc");
        assert_eq!(asset.option_label(), "Bitcoin (BTC)");
    }

    #[test]
    fn series_keeps_order_and_values() {
        let points = [
            PricePoint {
                timestamp_ms: 1_700_086_400_000,
                price: 34_500.0,
            },
            PricePoint {
                timestamp_ms: 1_700_000_000_000,
                price: 34_000.123_456_789,
            },
        ];

        let series = PriceSeries::from_points("bitcoin", &points, &Utc, "%d/%m/%Y").unwrap();

        assert_eq!(series.labels(), ["15/11/2023", "14/11/2023"]);
        assert_eq!(series.values(), [34_500.0, 34_000.123_456_789]);
        assert_eq!(series.title(), "Price of bitcoin");
        assert_eq!(series.min_max(), Some((34_000.123_456_789, 34_500.0)));
    }

    #[test]
    fn empty_points_make_empty_series() {
        let series = PriceSeries::from_points("dogecoin", &[], &Utc, "%d/%m/%Y").unwrap();
        assert!(series.is_empty());
        assert_eq!(series.labels().len(), series.values().len());
        assert_eq!(series.min_max(), None);
    }

    #[test]
    fn out_of_range_timestamp_is_malformed() {
        let points = [PricePoint {
            timestamp_ms: i64::MIN,
            price: 1.0,
        }];
        let err = PriceSeries::from_points("x", &points, &Utc, "%d/%m/%Y").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn price_formatting_does_not_round() {
        assert_eq!(format_price("$", 34000.0), "$34000");
        assert_eq!(format_price("$", 0.000123), "$0.000123");
    }
}
