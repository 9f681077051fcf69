//! Character portraits: decode, resize, and paint into terminal cells.
//!
//! The API serves photographs at arbitrary sizes. They are normalized to a
//! fixed square once, at decode time; rendering then downsamples into
//! whatever pane region is available using `▀` half-block cells, two
//! vertical pixels per cell.

use anyhow::{Context, Result};
use image::{RgbaImage, imageops::FilterType};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

/// Side length every decoded portrait is normalized to.
pub const PORTRAIT_SIZE: u32 = 250;

/// A decoded, square portrait ready to render.
#[derive(Debug, Clone)]
pub struct Portrait {
    image: RgbaImage,
}

impl Portrait {
    /// Decodes image bytes and resizes them to the fixed portrait square.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .context("failed to decode image")?
            .resize_exact(PORTRAIT_SIZE, PORTRAIT_SIZE, FilterType::Lanczos3)
            .to_rgba8();
        Ok(Self { image })
    }

    /// Nearest-sample colour for the pixel at (`px`, `py`) of a `side`-wide
    /// square projection of the portrait.
    fn sample(&self, px: u32, py: u32, side: u32) -> Color {
        let (width, height) = self.image.dimensions();
        let sx = (px * width / side).min(width - 1);
        let sy = (py * height / side).min(height - 1);
        let pixel = self.image.get_pixel(sx, sy);
        Color::Rgb(pixel[0], pixel[1], pixel[2])
    }
}

impl Widget for &Portrait {
    /// Paints the portrait centered in `area`. Each cell carries two
    /// vertically stacked pixels: foreground is the upper one, background
    /// the lower.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let side = u32::from(area.width).min(u32::from(area.height) * 2);
        if side == 0 {
            return;
        }
        let cols = side as u16;
        let rows = side.div_ceil(2) as u16;
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let upper = self.sample(u32::from(col), u32::from(row) * 2, side);
                let lower_py = (u32::from(row) * 2 + 1).min(side - 1);
                let lower = self.sample(u32::from(col), lower_py, side);
                if let Some(cell) = buf.cell_mut((left + col, top + row)) {
                    cell.set_char('▀');
                    cell.set_fg(upper);
                    cell.set_bg(lower);
                }
            }
        }
    }
}
