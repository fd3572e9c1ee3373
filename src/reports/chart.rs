//! Bar chart of the latest period, rendered to a PNG artifact.
//!
//! Rendering is a plain function of its inputs; there is no shared plotting
//! state between calls.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use tracing::debug;

use crate::error::{PricePivotError, Result};
use crate::models::Period;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;
const MARGIN: u32 = 60;
/// Edge length of one glyph in the bitmap font, before scaling.
const GLYPH: u32 = 8;
const TITLE_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 2;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const BAR: Rgb<u8> = Rgb([255, 165, 0]);
const TEXT: Rgb<u8> = Rgb([0, 0, 0]);

/// A chart written to disk for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub title: String,
    pub period: Period,
}

/// Chart title for the latest-period view.
pub fn chart_title(period: &Period) -> String {
    format!("OLD PRICE by WIDTH - {}", period)
}

/// Collision-free artifact path inside `dir`.
pub fn artifact_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.png", uuid::Uuid::new_v4().simple()))
}

/// Draw one bar per label, left to right in the given order, and write the
/// PNG to `path`.
///
/// The title is centred above the plot and each bar carries its label
/// underneath. Bar heights are proportional to the largest value; negative
/// values draw as empty slots.
pub fn render_bar_chart(labels: &[String], values: &[f64], title: &str, path: &Path) -> Result<()> {
    if labels.len() != values.len() {
        return Err(PricePivotError::InvalidInput(format!(
            "chart has {} labels but {} values",
            labels.len(),
            values.len()
        )));
    }

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let left = MARGIN;
    let right = WIDTH - MARGIN / 2;
    let top = MARGIN;
    let bottom = HEIGHT - MARGIN;
    let plot_height = bottom - top;

    for step in 1..=4 {
        let y = bottom - plot_height * step / 4;
        fill_rect(&mut img, left, y, right, y + 1, GRID);
    }

    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if !values.is_empty() {
        let slot = (right - left) / values.len() as u32;
        let gap = (slot / 5).max(1);
        for (i, (label, value)) in labels.iter().zip(values).enumerate() {
            let height = if max > 0.0 && *value > 0.0 {
                ((value / max) * f64::from(plot_height)).round() as u32
            } else {
                0
            };
            let slot_left = left + slot * i as u32;
            let x0 = slot_left + gap;
            let x1 = (slot_left + slot).saturating_sub(gap).max(x0 + 1);
            fill_rect(&mut img, x0, bottom - height, x1, bottom, BAR);

            // shrink labels that would spill into the neighbouring slot
            let scale = if text_width(label, LABEL_SCALE) <= slot { LABEL_SCALE } else { 1 };
            let centre = slot_left + slot / 2;
            let x = centre.saturating_sub(text_width(label, scale) / 2);
            draw_text(&mut img, label, x, bottom + GLYPH, scale, TEXT);
        }
    }

    fill_rect(&mut img, left, top, left + 2, bottom, AXIS);
    fill_rect(&mut img, left, bottom, right, bottom + 2, AXIS);

    let title_x = (WIDTH / 2).saturating_sub(text_width(title, TITLE_SCALE) / 2);
    let title_y = (top - GLYPH * TITLE_SCALE) / 2;
    draw_text(&mut img, title, title_x, title_y, TITLE_SCALE, TEXT);

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    super::write_atomically(path, &buf)?;
    debug!("Rendered '{}' with {} bar(s) to {}", title, labels.len(), path.display());
    Ok(())
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale
}

/// Draw `text` with its top-left corner at `(x, y)`. Glyphs outside the
/// basic Latin set render as `?`; pixels past the image edge are clipped.
fn draw_text(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let fallback = BASIC_FONTS.get('?').unwrap_or([0; 8]);
    for (i, c) in text.chars().enumerate() {
        let glyph = BASIC_FONTS.get(c).unwrap_or(fallback);
        let gx = x + i as u32 * GLYPH * scale;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH {
                // bit 0 is the leftmost pixel
                if *bits & (1u8 << col) != 0 {
                    let px = gx + col * scale;
                    let py = y + row as u32 * scale;
                    fill_rect(img, px, py, px + scale, py + scale, color);
                }
            }
        }
    }
}
