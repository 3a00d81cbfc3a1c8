// File: crates/timechart/tests/render.rs
// Purpose: End-to-end render smoke over a synthetic price series.

use timechart::{Chart, RenderOptions, Series, TimeTicker};

fn sample_chart() -> Chart {
    let base = 1_700_000_000i64;
    let samples: Vec<(i64, f64)> = (0..180)
        .map(|i| {
            let t = base + i * 600;
            let price = 5_000_000.0 + (i as f64 * 0.1).sin() * 50_000.0;
            (t, price)
        })
        .collect();

    let mut chart = Chart::new();
    chart.ticker = TimeTicker::from_utc_offset_hours(9).expect("UTC+9");
    chart.add_series(Series::from_samples(&samples));
    chart.set_title("₿ ¥ 5,000,000");
    chart.autoscale();
    chart
}

#[test]
fn render_smoke_png_bytes() {
    let chart = sample_chart();
    let opts = RenderOptions::default();
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.width() as i32, opts.width);
    assert_eq!(img.height() as i32, opts.height);
}

#[test]
fn render_smoke_file() {
    let chart = sample_chart();
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn autoscale_pads_flat_series() {
    let mut chart = Chart::new();
    chart.add_series(Series::from_samples(&[(1_700_000_000, 42.0)]));
    chart.autoscale();
    assert!(chart.x_axis.span() > 0.0);
    assert!(chart.y_axis.span() > 0.0);
    assert!(chart.y_axis.min <= 42.0 && 42.0 <= chart.y_axis.max);
}
