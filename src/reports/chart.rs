//! MRR trend chart.
//!
//! Draws the monthly history as a solid line with point markers and the
//! forecast as a dashed line continuing from the last history point, with
//! a title, axis labels, month ticks, value gridlines and a legend.

use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use image::{imageops, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut, text_size,
};
use imageproc::rect::Rect;
use num_format::{Locale, ToFormattedString};
use tracing::info;

use super::forecast::MonthlyPoint;

/// Chart file name.
pub const MRR_CHART_FILE: &str = "mrr_trend_and_forecast.png";

pub const TITLE: &str = "MRR Trend & Straight-Line Forecast";
pub const X_LABEL: &str = "Month";
pub const Y_LABEL: &str = "MRR (EUR)";
pub const HISTORY_LABEL: &str = "Historical MRR";
pub const FORECAST_LABEL: &str = "Forecast (straight line)";

const FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

pub const MARGIN_LEFT: u32 = 100;
pub const MARGIN_RIGHT: u32 = 40;
pub const MARGIN_TOP: u32 = 60;
pub const MARGIN_BOTTOM: u32 = 100;

const TITLE_SIZE: f32 = 22.0;
const LABEL_SIZE: f32 = 16.0;
const TICK_SIZE: f32 = 12.0;
/// Minimum horizontal room per month tick label.
const TICK_SPACING: f32 = 18.0;

const MARKER_RADIUS: i32 = 4;
const DASH_ON: f32 = 10.0;
const DASH_OFF: f32 = 6.0;
const GRID_LINES: u32 = 4;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const HISTORY: Rgb<u8> = Rgb([31, 119, 180]);
const FORECAST: Rgb<u8> = Rgb([255, 127, 14]);

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Chart too small: {0}x{1}")]
    TooSmall(u32, u32),

    #[error("Nothing to plot")]
    Empty,

    #[error("Chart font could not be loaded")]
    Font,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Maps series positions and values onto pixel coordinates.
struct Plot {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    slots: usize,
    max_value: f64,
}

impl Plot {
    fn new(width: u32, height: u32, slots: usize, max_value: f64) -> Self {
        Self {
            left: MARGIN_LEFT as f32,
            right: (width - MARGIN_RIGHT) as f32,
            top: MARGIN_TOP as f32,
            bottom: (height - MARGIN_BOTTOM) as f32,
            slots,
            max_value,
        }
    }

    fn x(&self, slot: usize) -> f32 {
        let step = if self.slots > 1 {
            (self.right - self.left) / (self.slots - 1) as f32
        } else {
            0.0
        };
        self.left + step * slot as f32
    }

    fn y(&self, value: f64) -> f32 {
        self.bottom - (self.bottom - self.top) * (value / self.max_value) as f32
    }
}

/// Two-pixel line.
fn stroke(img: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
    draw_line_segment_mut(img, from, to, color);
    draw_line_segment_mut(img, (from.0, from.1 + 1.0), (to.0, to.1 + 1.0), color);
}

fn dashed(img: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return;
    }
    let at = |d: f32| (from.0 + dx * d / length, from.1 + dy * d / length);

    let mut offset = 0.0;
    while offset < length {
        stroke(img, at(offset), at((offset + DASH_ON).min(length)), color);
        offset += DASH_ON + DASH_OFF;
    }
}

fn dot(img: &mut RgbImage, (x, y): (f32, f32), color: Rgb<u8>) {
    draw_filled_circle_mut(img, (x.round() as i32, y.round() as i32), MARKER_RADIUS, color);
}

/// Text rendered onto its own tile and turned to read bottom to top.
fn vertical_text(font: &FontRef<'_>, size: f32, text: &str) -> RgbImage {
    let (w, h) = text_size(PxScale::from(size), font, text);
    let mut tile = RgbImage::from_pixel(w + 2, h + 4, BACKGROUND);
    draw_text_mut(&mut tile, TEXT, 1, 0, PxScale::from(size), font, text);
    imageops::rotate270(&tile)
}

fn format_axis_value(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

fn draw_axes(img: &mut RgbImage, font: &FontRef<'_>, plot: &Plot) {
    for i in 0..=GRID_LINES {
        let value = plot.max_value * i as f64 / GRID_LINES as f64;
        let y = plot.y(value);
        if i > 0 {
            draw_line_segment_mut(img, (plot.left, y), (plot.right, y), GRID);
        }
        let text = format_axis_value(value);
        let (w, h) = text_size(PxScale::from(TICK_SIZE), font, &text);
        let x = plot.left as i32 - w as i32 - 8;
        draw_text_mut(img, TEXT, x, y as i32 - h as i32 / 2, PxScale::from(TICK_SIZE), font, &text);
    }

    stroke(img, (plot.left, plot.bottom), (plot.right, plot.bottom), AXIS);
    stroke(img, (plot.left, plot.top), (plot.left, plot.bottom), AXIS);
}

fn draw_month_ticks(img: &mut RgbImage, font: &FontRef<'_>, plot: &Plot, months: &[String]) {
    let room = ((plot.right - plot.left) / TICK_SPACING).max(1.0) as usize;
    let step = months.len().div_ceil(room).max(1);

    for (slot, month) in months.iter().enumerate().step_by(step) {
        let x = plot.x(slot);
        draw_line_segment_mut(img, (x, plot.bottom), (x, plot.bottom + 5.0), AXIS);
        let tile = vertical_text(font, TICK_SIZE, month);
        let left = x as i64 - tile.width() as i64 / 2;
        imageops::overlay(img, &tile, left, plot.bottom as i64 + 8);
    }
}

fn draw_titles(img: &mut RgbImage, font: &FontRef<'_>, plot: &Plot) {
    let (width, height) = img.dimensions();

    let (w, _) = text_size(PxScale::from(TITLE_SIZE), font, TITLE);
    let x = (width as i32 - w as i32) / 2;
    draw_text_mut(img, TEXT, x, 18, PxScale::from(TITLE_SIZE), font, TITLE);

    let (w, h) = text_size(PxScale::from(LABEL_SIZE), font, X_LABEL);
    let x = (plot.left + plot.right) as i32 / 2 - w as i32 / 2;
    draw_text_mut(img, TEXT, x, height as i32 - h as i32 - 10, PxScale::from(LABEL_SIZE), font, X_LABEL);

    let tile = vertical_text(font, LABEL_SIZE, Y_LABEL);
    let y = (plot.top + plot.bottom) as i64 / 2 - tile.height() as i64 / 2;
    imageops::overlay(img, &tile, 8, y);
}

fn draw_legend(img: &mut RgbImage, font: &FontRef<'_>, plot: &Plot) {
    let scale = PxScale::from(LABEL_SIZE);
    let (hw, th) = text_size(scale, font, HISTORY_LABEL);
    let (fw, _) = text_size(scale, font, FORECAST_LABEL);
    let row = th.max(MARKER_RADIUS as u32 * 2) + 8;
    let sample = 36.0;

    let x = plot.left as i32 + 12;
    let y = plot.top as i32 + 10;
    let frame = Rect::at(x, y).of_size(hw.max(fw) + sample as u32 + 30, row * 2 + 10);
    draw_filled_rect_mut(img, frame, BACKGROUND);
    draw_hollow_rect_mut(img, frame, GRID);

    let entries = [(HISTORY_LABEL, HISTORY, false), (FORECAST_LABEL, FORECAST, true)];
    for (i, (label, color, dash)) in entries.into_iter().enumerate() {
        let cy = (y + 5 + row as i32 * i as i32 + row as i32 / 2) as f32;
        let (x0, x1) = (x as f32 + 10.0, x as f32 + 10.0 + sample);
        if dash {
            dashed(img, (x0, cy), (x1, cy), color);
        } else {
            stroke(img, (x0, cy), (x1, cy), color);
        }
        dot(img, ((x0 + x1) / 2.0, cy), color);
        let tx = x1 as i32 + 10;
        draw_text_mut(img, TEXT, tx, cy as i32 - th as i32 / 2, scale, font, label);
    }
}

/// Render history and forecast into an in-memory image.
pub fn draw_chart(
    history: &[MonthlyPoint],
    forecast: &[MonthlyPoint],
    width: u32,
    height: u32,
) -> Result<RgbImage, ChartError> {
    if width <= MARGIN_LEFT + MARGIN_RIGHT || height <= MARGIN_TOP + MARGIN_BOTTOM {
        return Err(ChartError::TooSmall(width, height));
    }
    let Some(last) = history.last() else {
        return Err(ChartError::Empty);
    };
    let font = FontRef::try_from_slice(FONT_DATA).map_err(|_| ChartError::Font)?;

    let max_value = history
        .iter()
        .chain(forecast)
        .map(|p| p.mrr)
        .fold(0.0_f64, f64::max);
    let plot = Plot::new(
        width,
        height,
        history.len() + forecast.len(),
        if max_value > 0.0 { max_value * 1.1 } else { 1.0 },
    );
    let months: Vec<String> = history
        .iter()
        .chain(forecast)
        .map(|p| p.month.format("%Y-%m").to_string())
        .collect();

    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    draw_axes(&mut img, &font, &plot);
    draw_month_ticks(&mut img, &font, &plot, &months);

    let history_px: Vec<(f32, f32)> = history
        .iter()
        .enumerate()
        .map(|(i, p)| (plot.x(i), plot.y(p.mrr)))
        .collect();
    for pair in history_px.windows(2) {
        stroke(&mut img, pair[0], pair[1], HISTORY);
    }
    for &px in &history_px {
        dot(&mut img, px, HISTORY);
    }

    // Forecast starts from the last observed point.
    let mut prev = (plot.x(history.len() - 1), plot.y(last.mrr));
    for (i, p) in forecast.iter().enumerate() {
        let next = (plot.x(history.len() + i), plot.y(p.mrr));
        dashed(&mut img, prev, next, FORECAST);
        dot(&mut img, next, FORECAST);
        prev = next;
    }

    draw_titles(&mut img, &font, &plot);
    draw_legend(&mut img, &font, &plot);
    Ok(img)
}

/// Render and save as PNG.
pub fn render_chart(
    history: &[MonthlyPoint],
    forecast: &[MonthlyPoint],
    width: u32,
    height: u32,
    path: &Path,
) -> Result<(), ChartError> {
    let img = draw_chart(history, forecast, width, height)?;
    img.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), width, height, "Chart saved");
    Ok(())
}
