// File: crates/btcchart/src/render.rs
// Summary: Builds the price chart from quote samples and formats the title.

use std::path::Path;

use anyhow::{Context, Result};
use timechart::{Chart, Series, TimeTicker};

use crate::db::PriceLog;

/// Ask-price samples in ascending time order.
pub fn samples_from_rows(rows: &[PriceLog]) -> Vec<(i64, f64)> {
    let mut samples: Vec<(i64, f64)> = rows.iter().map(|r| (r.timestamp, r.ask)).collect();
    samples.sort_by_key(|&(t, _)| t);
    samples
}

/// Line chart of the samples, titled with the latest quote.
pub fn price_chart(samples: &[(i64, f64)], ticker: TimeTicker) -> Result<Chart> {
    let (_, latest) = *samples.last().context("no price data")?;
    let mut chart = Chart::new();
    chart.ticker = ticker;
    chart.add_series(Series::from_samples(samples));
    chart.set_title(format!("₿ ¥ {}", comma(latest as i64)));
    chart.autoscale();
    Ok(chart)
}

/// Thousands-separated integer, e.g. 5432100 -> "5,432,100".
pub fn comma(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Load timestamp,price rows from a CSV file for offline rendering.
/// Non-numeric rows (e.g. a header line) are skipped.
pub fn load_price_csv(path: &Path) -> Result<Vec<(i64, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let t = rec.get(0).and_then(|s| s.trim().parse::<i64>().ok());
        let v = rec.get(1).and_then(|s| s.trim().parse::<f64>().ok());
        if let (Some(t), Some(v)) = (t, v) {
            out.push((t, v));
        }
    }
    out.sort_by_key(|&(t, _)| t);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_groups_digits() {
        assert_eq!(comma(0), "0");
        assert_eq!(comma(100), "100");
        assert_eq!(comma(1_000), "1,000");
        assert_eq!(comma(5_432_100), "5,432,100");
        assert_eq!(comma(-42_000), "-42,000");
    }

    #[test]
    fn chart_titled_with_latest_ask() {
        let samples = vec![
            (1_700_000_000, 5_000_000.0),
            (1_700_000_600, 5_432_100.0),
        ];
        let chart = price_chart(&samples, TimeTicker::default()).expect("chart");
        assert_eq!(chart.title.as_deref(), Some("₿ ¥ 5,432,100"));
        assert_eq!(chart.series.len(), 1);
        assert!(chart.y_axis.min < 5_000_000.0);
        assert!(chart.y_axis.max > 5_432_100.0);
    }

    #[test]
    fn empty_samples_are_an_error() {
        assert!(price_chart(&[], TimeTicker::default()).is_err());
    }

    #[test]
    fn csv_rows_parse_and_sort() {
        let path = std::env::temp_dir().join("btcchart_prices_test.csv");
        std::fs::write(&path, "timestamp,price\n1700000600,101.5\n1700000000,100.0\n").unwrap();
        let samples = load_price_csv(&path).expect("csv");
        std::fs::remove_file(&path).ok();
        assert_eq!(samples, vec![(1_700_000_000, 100.0), (1_700_000_600, 101.5)]);
    }
}
