// File: crates/timechart/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::axis::Axis;
use crate::series::Series;
use crate::theme::Theme;
use crate::ticks::TimeTicker;
use crate::types::{Insets, HEIGHT, WIDTH};

/// Horizontal value divisions drawn on the Y axis.
const VALUE_DIVISIONS: usize = 10;
/// Tick-label slant below the time axis, degrees clockwise.
const LABEL_ROTATION: f32 = 60.0;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
        }
    }
}

pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: Option<String>,
    /// Drives time bucketing and label text on the X axis.
    pub ticker: TimeTicker,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::time(),
            y_axis: Axis::price(),
            title: None,
            ticker: TimeTicker::default(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Fit both axes to the data, padding the value range by 2%.
    pub fn autoscale(&mut self) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in &self.series {
            for &(x, y) in &s.points {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return;
        }
        if (x_max - x_min).abs() < 1e-9 {
            x_max = x_min + 1.0;
        }
        if (y_max - y_min).abs() < 1e-9 {
            y_max = y_min + 1.0;
        }
        let margin = (y_max - y_min) * 0.02;
        self.x_axis.min = x_min;
        self.x_axis.max = x_max;
        self.y_axis.min = y_min - margin;
        self.y_axis.max = y_max + margin;
    }

    /// Render the chart to PNG bytes using a CPU raster surface.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();

        canvas.clear(opts.theme.background);

        let l = opts.insets.left as i32;
        let r = opts.width - opts.insets.right as i32;
        let t = opts.insets.top as i32;
        let b = opts.height - opts.insets.bottom as i32;

        self.draw_value_ticks(canvas, opts, l, t, r, b);
        self.draw_time_ticks(canvas, opts, l, t, r, b)?;
        draw_frame(canvas, &opts.theme, l, t, r, b);

        for s in &self.series {
            draw_line_series(canvas, &opts.theme, l, t, r, b, &self.x_axis, &self.y_axis, s);
        }

        if opts.draw_labels {
            if let Some(title) = &self.title {
                draw_title(canvas, &opts.theme, opts.width, title);
            }
            draw_axis_name(canvas, &opts.theme, l, t, &self.y_axis);
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn draw_value_ticks(
        &self,
        canvas: &skia::Canvas,
        opts: &RenderOptions,
        l: i32,
        t: i32,
        r: i32,
        b: i32,
    ) {
        let mut grid = skia::Paint::default();
        grid.set_color(opts.theme.grid);
        grid.set_anti_alias(true);
        grid.set_stroke_width(1.0);

        let mut text_paint = skia::Paint::default();
        text_paint.set_color(opts.theme.axis_label);
        text_paint.set_anti_alias(true);
        let mut font = skia::Font::default();
        font.set_size(13.0);

        let span = self.y_axis.span();
        let plot_h = (b - t) as f32;
        for i in 0..=VALUE_DIVISIONS {
            let frac = i as f32 / VALUE_DIVISIONS as f32;
            let y = b as f32 - frac * plot_h;
            canvas.draw_line((l as f32, y), (r as f32, y), &grid);
            if opts.draw_labels {
                let value = self.y_axis.min + span * f64::from(frac);
                let label = format!("{value:.0}");
                let (width, _) = font.measure_str(&label, Some(&text_paint));
                canvas.draw_str(&label, (l as f32 - width - 8.0, y + 4.0), &font, &text_paint);
            }
        }
    }

    fn draw_time_ticks(
        &self,
        canvas: &skia::Canvas,
        opts: &RenderOptions,
        l: i32,
        t: i32,
        r: i32,
        b: i32,
    ) -> Result<()> {
        let mut grid = skia::Paint::default();
        grid.set_color(opts.theme.grid);
        grid.set_anti_alias(true);
        grid.set_stroke_width(1.0);

        let mut mark = skia::Paint::default();
        mark.set_color(opts.theme.tick);
        mark.set_anti_alias(true);
        mark.set_stroke_width(1.0);

        let mut text_paint = skia::Paint::default();
        text_paint.set_color(opts.theme.axis_label);
        text_paint.set_anti_alias(true);
        let mut font = skia::Font::default();
        font.set_size(12.0);

        let x_min = self.x_axis.min;
        let x_max = self.x_axis.max;
        let ticks = self.ticker.ticks(x_min.floor() as i64, x_max.ceil() as i64)?;
        let span = (x_max - x_min).max(1e-9);
        for tick in ticks {
            let pos = tick.position as f64;
            if pos < x_min || pos > x_max {
                continue;
            }
            let x = l as f32 + ((pos - x_min) / span) as f32 * (r - l) as f32;
            canvas.draw_line((x, b as f32), (x, b as f32 + 5.0), &mark);
            if let Some(label) = tick.label {
                canvas.draw_line((x, t as f32), (x, b as f32), &grid);
                if opts.draw_labels {
                    canvas.save();
                    canvas.translate((x + 2.0, b as f32 + 12.0));
                    canvas.rotate(LABEL_ROTATION, None);
                    canvas.draw_str(&label, (0.0, 0.0), &font, &text_paint);
                    canvas.restore();
                }
            }
        }
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_frame(canvas: &skia::Canvas, theme: &Theme, l: i32, t: i32, r: i32, b: i32) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    canvas.draw_line((l as f32, b as f32), (r as f32, b as f32), &axis_paint);
    canvas.draw_line((l as f32, t as f32), (l as f32, b as f32), &axis_paint);
}

fn draw_title(canvas: &skia::Canvas, theme: &Theme, width: i32, title: &str) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.title);
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(20.0);

    let (text_width, _) = font.measure_str(title, Some(&paint));
    let x = (width as f32 - text_width) * 0.5;
    canvas.draw_str(title, (x.max(4.0), 28.0), &font, &paint);
}

fn draw_axis_name(canvas: &skia::Canvas, theme: &Theme, l: i32, t: i32, y_axis: &Axis) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.axis_label);
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(13.0);

    canvas.draw_str(&y_axis.label, (l as f32 - 56.0, t as f32 - 8.0), &font, &paint);
}

fn draw_line_series(
    canvas: &skia::Canvas,
    theme: &Theme,
    l: i32,
    t: i32,
    r: i32,
    b: i32,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
) {
    let data = &series.points;
    if data.len() < 2 {
        return;
    }

    let xspan = x_axis.span().max(1e-9);
    let yspan = y_axis.span().max(1e-9);
    let sx = |x: f64| -> f32 { l as f32 + ((x - x_axis.min) / xspan) as f32 * (r - l) as f32 };
    let sy = |y: f64| -> f32 { b as f32 - ((y - y_axis.min) / yspan) as f32 * (b - t) as f32 };

    let mut builder = skia::PathBuilder::new();
    let (x0, y0) = data[0];
    builder.move_to((sx(x0), sy(y0)));
    for &(x, y) in data.iter().skip(1) {
        builder.line_to((sx(x), sy(y)));
    }
    let path = builder.detach();

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_color(theme.line_stroke);

    canvas.draw_path(&path, &stroke);
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}
