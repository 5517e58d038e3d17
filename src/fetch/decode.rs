use serde_json::Value;

use crate::error::AppError;
use crate::market::{Asset, PricePoint};

use super::FetchResult;

/// Decode a `/coins/markets` body into assets, in the order received.
pub fn decode_markets(body: &str) -> FetchResult<Vec<Asset>> {
    let root: Value = serde_json::from_str(body)
        .map_err(|err| AppError::malformed(format!("markets body is not valid JSON: {err}")))?;

    let entries = root
        .as_array()
        .ok_or_else(|| AppError::malformed("markets payload is not an array"))?;

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let object = entry
                .as_object()
                .ok_or_else(|| AppError::malformed(format!("markets[{idx}] is not an object")))?;

            let field = |key: &str| -> FetchResult<String> {
                object
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::malformed(format!("markets[{idx}] is missing string `{key}`"))
                    })
            };

            Ok(Asset {
                id: field("id")?,
                name: field("name")?,
                symbol: field("symbol")?,
            })
        })
        .collect()
}

/// Decode the `prices` array of a `/coins/{id}/market_chart` body.
pub fn decode_market_chart(body: &str) -> FetchResult<Vec<PricePoint>> {
    let root: Value = serde_json::from_str(body).map_err(|err| {
        AppError::malformed(format!("market chart body is not valid JSON: {err}"))
    })?;

    let rows = root
        .get("prices")
        .ok_or_else(|| AppError::malformed("market chart payload is missing `prices`"))?
        .as_array()
        .ok_or_else(|| AppError::malformed("`prices` is not an array"))?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| decode_price_row(idx, row))
        .collect()
}

fn decode_price_row(idx: usize, row: &Value) -> FetchResult<PricePoint> {
    let pair = row
        .as_array()
        .filter(|pair| pair.len() >= 2)
        .ok_or_else(|| AppError::malformed(format!("prices[{idx}] is not a [timestamp, price] pair")))?;

    let timestamp_ms = json_timestamp(&pair[0]).ok_or_else(|| {
        AppError::malformed(format!("prices[{idx}] has a non-numeric timestamp"))
    })?;

    let price = pair[1]
        .as_f64()
        .ok_or_else(|| AppError::malformed(format!("prices[{idx}] has a non-numeric price")))?;

    Ok(PricePoint {
        timestamp_ms,
        price,
    })
}

fn json_timestamp(value: &Value) -> Option<i64> {
    if let Some(ms) = value.as_i64() {
        return Some(ms);
    }

    value
        .as_f64()
        .filter(|ms| ms.is_finite() && ms.fract() == 0.0)
        .filter(|ms| *ms >= i64::MIN as f64 && *ms <= i64::MAX as f64)
        .map(|ms| ms as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_markets_ignoring_extra_fields() {
        let body = r#"[
            {"id": "bitcoin", "name": "Bitcoin", "symbol": "btc", "current_price": 34000, "market_cap_rank": 1},
            {"id": "ethereum", "name": "Ethereum", "symbol": "eth", "image": null}
        ]"#;

        let assets = decode_markets(body).unwrap();

        assert_eq!(
            assets,
            vec![
                Asset::new("bitcoin", "Bitcoin", "btc"),
                Asset::new("ethereum", "Ethereum", "eth"),
            ]
        );
    }

    #[test]
    fn markets_object_payload_is_malformed() {
        let err = decode_markets(r#"{"error": "rate limited"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)), "{err}");
    }

    #[test]
    fn markets_entry_without_id_is_malformed() {
        let err = decode_markets(r#"[{"name": "Bitcoin", "symbol": "btc"}]"#).unwrap_err();
        assert!(err.to_string().contains("`id`"), "{err}");
    }

    #[test]
    fn decodes_price_pairs_in_order() {
        let body = r#"{
            "prices": [[1700000000000, 34000], [1700086400000, 34500.25]],
            "market_caps": [],
            "total_volumes": []
        }"#;

        let points = decode_market_chart(body).unwrap();

        assert_eq!(
            points,
            vec![
                PricePoint {
                    timestamp_ms: 1_700_000_000_000,
                    price: 34_000.0
                },
                PricePoint {
                    timestamp_ms: 1_700_086_400_000,
                    price: 34_500.25
                },
            ]
        );
    }

    #[test]
    fn accepts_float_encoded_timestamps() {
        let points = decode_market_chart(r#"{"prices": [[1700000000000.0, 1.5]]}"#).unwrap();
        assert_eq!(points[0].timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn missing_prices_is_malformed() {
        let err = decode_market_chart(r#"{"market_caps": []}"#).unwrap_err();
        assert!(err.to_string().contains("prices"), "{err}");
    }

    #[test]
    fn bad_rows_are_malformed() {
        for body in [
            r#"{"prices": [1700000000000]}"#,
            r#"{"prices": [[1700000000000]]}"#,
            r#"{"prices": [[1700000000000, "34000"]]}"#,
            r#"{"prices": [["yesterday", 34000]]}"#,
        ] {
            let err = decode_market_chart(body).unwrap_err();
            assert!(matches!(err, AppError::MalformedResponse(_)), "{body}: {err}");
        }
    }

    #[test]
    fn empty_prices_is_valid() {
        assert!(decode_market_chart(r#"{"prices": []}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            decode_market_chart("<html>"),
            Err(AppError::MalformedResponse(_))
        ));
        assert!(decode_markets("").is_err());
    }
}
