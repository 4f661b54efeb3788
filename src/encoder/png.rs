//! PNG QR encoder
//!
//! Builds the QR symbol with the `qrcode` crate and rasterises it by hand so
//! that the requested pixel width and quiet-zone margin are honoured exactly:
//!
//! - `modules = symbol_width + 2 * margin`
//! - if `width >= modules`, each module is `width / modules` pixels
//!   (fractional), otherwise a fixed scale of 4 pixels per module is used
//! - the image side is `width`, or `modules * 4` when the fallback applies
//!
//! Encoding is CPU-bound, so it runs on Tokio's blocking pool.

use std::io::Cursor;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageEncoder, Rgba, RgbaImage, codecs::png::PngEncoder};
use qrcode::{Color, QrCode};

use super::QrEncoder;
use crate::{
    error::{QrError, QrResult},
    model::RenderOptions,
};

/// Scale used when the requested width cannot fit one pixel per module
const FALLBACK_SCALE: f64 = 4.0;

/// Prefix of every data URL produced by this encoder
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Production encoder producing PNG data URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct PngQrEncoder;

impl PngQrEncoder {
    /// Creates a new PNG encoder
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QrEncoder for PngQrEncoder {
    async fn to_data_url(&self, text: &str, options: &RenderOptions) -> QrResult<String> {
        let text = text.to_owned();
        let options = *options;

        // Dropping this future does not abort the blocking task; an in-flight
        // encode always runs to completion.
        tokio::task::spawn_blocking(move || encode_data_url(&text, &options))
            .await
            .map_err(|e| QrError::TaskFailed(e.to_string()))?
    }
}

/// Encodes `text` synchronously and returns a PNG data URL
pub fn encode_data_url(text: &str, options: &RenderOptions) -> QrResult<String> {
    let png = encode_png(text, options)?;
    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)))
}

/// Encodes `text` synchronously and returns raw PNG bytes
///
/// # Examples
///
/// ```
/// use qrcode_mcp::{encoder::png::encode_png, model::RenderOptions};
///
/// let png = encode_png("hello", &RenderOptions::default()).unwrap();
/// assert_eq!(&png[..4], b"\x89PNG");
/// ```
pub fn encode_png(text: &str, options: &RenderOptions) -> QrResult<Vec<u8>> {
    let image = render(text, options)?;
    let (width, height) = image.dimensions();

    let mut output = Vec::new();
    PngEncoder::new(Cursor::new(&mut output)).write_image(
        image.as_raw(),
        width,
        height,
        image::ExtendedColorType::Rgba8,
    )?;

    tracing::trace!(width, height, bytes = output.len(), "encoded QR PNG");
    Ok(output)
}

/// Builds the symbol for `text` and rasterises it into an RGBA image
pub fn render(text: &str, options: &RenderOptions) -> QrResult<RgbaImage> {
    let code = QrCode::with_error_correction_level(
        text.as_bytes(),
        options.error_correction_level.to_ec_level(),
    )?;

    let symbol = code.width();
    let modules = colors_to_grid(code.to_colors(), symbol);
    let margin = options.margin as usize;
    let total = symbol + 2 * margin;

    let (side, scale) = layout(options.width, total);
    if side == 0 {
        return Err(QrError::ImageError("computed image side is zero".to_string()));
    }

    let scaled_margin = margin as f64 * scale;
    let inner_end = side as f64 - scaled_margin;
    let dark = Rgba(options.color.dark.to_rgba());
    let light = Rgba(options.color.light.to_rgba());

    Ok(RgbaImage::from_fn(side, side, |x, y| {
        let (x, y) = (x as f64, y as f64);
        if x < scaled_margin || y < scaled_margin || x >= inner_end || y >= inner_end {
            return light;
        }

        let col = (((x - scaled_margin) / scale).floor() as usize).min(symbol - 1);
        let row = (((y - scaled_margin) / scale).floor() as usize).min(symbol - 1);
        if modules[row][col] { dark } else { light }
    }))
}

/// Image side in pixels and pixels per module for a requested width
fn layout(width: u32, total_modules: usize) -> (u32, f64) {
    if width as usize >= total_modules {
        (width, f64::from(width) / total_modules as f64)
    } else {
        ((total_modules as f64 * FALLBACK_SCALE) as u32, FALLBACK_SCALE)
    }
}

fn colors_to_grid(colors: Vec<Color>, symbol: usize) -> Vec<Vec<bool>> {
    colors
        .chunks(symbol)
        .map(|row| row.iter().map(|c| *c == Color::Dark).collect())
        .collect()
}
