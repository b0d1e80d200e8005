//! Wireframe rasterization: turns a declarative screen description into a
//! compressed PNG returned as a data URI. Boxes and grid lines only; the
//! wireframe is a layout sketch, not a styled mockup.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 400;
const MARGIN: u32 = 16;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BORDER: Rgb<u8> = Rgb([60, 60, 60]);
const HEADER_FILL: Rgb<u8> = Rgb([220, 220, 220]);
const FIELD_FILL: Rgb<u8> = Rgb([240, 240, 240]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireframeKind {
    Search,
    Form,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireframeSpec {
    pub kind: WireframeKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Error, Debug)]
pub enum WireframeError {
    #[error("PNG encoding error: {0}")]
    Encode(String),
}

/// Render a wireframe to a PNG data URI.
pub fn render_wireframe(spec: &WireframeSpec) -> Result<String, WireframeError> {
    let mut canvas: RgbImage = ImageBuffer::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    stroke_rect(&mut canvas, 0, 0, WIDTH, HEIGHT);
    // Title bar.
    fill_rect(&mut canvas, 1, 1, WIDTH - 2, 32, HEADER_FILL);
    stroke_rect(&mut canvas, 0, 0, WIDTH, 34);

    match spec.kind {
        WireframeKind::Search => draw_search(&mut canvas, spec),
        WireframeKind::Form => draw_form(&mut canvas, spec),
    }

    encode_data_uri(canvas)
}

/// Search layout: one input box per filter across the top, then a results
/// grid with one column per configured column and a handful of empty rows.
fn draw_search(canvas: &mut RgbImage, spec: &WireframeSpec) {
    let filters = spec.filters.len().max(1) as u32;
    let box_width = (WIDTH - 2 * MARGIN - (filters - 1) * 8) / filters;
    let filter_y = 48;
    for i in 0..filters {
        let x = MARGIN + i * (box_width + 8);
        fill_rect(canvas, x + 1, filter_y + 1, box_width - 2, 22, FIELD_FILL);
        stroke_rect(canvas, x, filter_y, box_width, 24);
    }
    // Search button.
    stroke_rect(canvas, WIDTH - MARGIN - 72, filter_y + 32, 72, 24);

    // Results grid.
    let grid_top = filter_y + 72;
    let grid_height = HEIGHT - grid_top - MARGIN;
    let grid_width = WIDTH - 2 * MARGIN;
    stroke_rect(canvas, MARGIN, grid_top, grid_width, grid_height);
    fill_rect(canvas, MARGIN + 1, grid_top + 1, grid_width - 2, 22, HEADER_FILL);

    let columns = spec.columns.len().max(1) as u32;
    for i in 1..columns {
        let x = MARGIN + i * grid_width / columns;
        vline(canvas, x, grid_top, grid_top + grid_height);
    }
    let rows = 6;
    for i in 1..=rows {
        let y = grid_top + 24 + i * (grid_height - 24) / (rows + 1);
        hline(canvas, MARGIN, MARGIN + grid_width, y);
    }
}

/// Form layout: one label + input pair per field, stacked, plus save and
/// cancel buttons at the bottom.
fn draw_form(canvas: &mut RgbImage, spec: &WireframeSpec) {
    let fields = spec.fields.len().max(1) as u32;
    let available = HEIGHT - 48 - 56 - MARGIN;
    let row_height = (available / fields).clamp(28, 52);

    for i in 0..fields {
        let y = 48 + i * row_height;
        if y + row_height > HEIGHT - 56 {
            break;
        }
        // Label stub on the left, input box on the right.
        fill_rect(canvas, MARGIN, y + 6, 120, 12, HEADER_FILL);
        let input_x = MARGIN + 136;
        let input_width = WIDTH - input_x - MARGIN;
        fill_rect(canvas, input_x + 1, y + 1, input_width - 2, 22, FIELD_FILL);
        stroke_rect(canvas, input_x, y, input_width, 24);
    }

    stroke_rect(canvas, WIDTH - MARGIN - 160, HEIGHT - 48, 72, 24);
    stroke_rect(canvas, WIDTH - MARGIN - 72, HEIGHT - 48, 72, 24);
}

fn encode_data_uri(canvas: RgbImage) -> Result<String, WireframeError> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(canvas)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| WireframeError::Encode(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..(y + h).min(HEIGHT) {
        for px in x..(x + w).min(WIDTH) {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn stroke_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
    let right = (x + w).min(WIDTH).saturating_sub(1);
    let bottom = (y + h).min(HEIGHT).saturating_sub(1);
    hline(canvas, x, right + 1, y);
    hline(canvas, x, right + 1, bottom);
    vline(canvas, x, y, bottom + 1);
    vline(canvas, right, y, bottom + 1);
}

fn hline(canvas: &mut RgbImage, x0: u32, x1: u32, y: u32) {
    if y >= HEIGHT {
        return;
    }
    for x in x0..x1.min(WIDTH) {
        canvas.put_pixel(x, y, BORDER);
    }
}

fn vline(canvas: &mut RgbImage, x: u32, y0: u32, y1: u32) {
    if x >= WIDTH {
        return;
    }
    for y in y0..y1.min(HEIGHT) {
        canvas.put_pixel(x, y, BORDER);
    }
}
