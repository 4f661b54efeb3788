//! QR encoder traits and implementations
//!
//! This module provides the seam between the `qrcode` tool and the code that
//! actually builds and rasterises a QR symbol:
//!
//! - `QrEncoder`: trait for anything that turns text plus
//!   [`RenderOptions`] into an image data URL
//! - `PngQrEncoder`: production encoder producing `data:image/png;base64,...`
//! - `MockEncoder`: canned output, error injection and call counting for
//!   tests

use async_trait::async_trait;

use crate::{error::QrResult, model::RenderOptions};

pub mod mock;
pub mod png;

pub use mock::MockEncoder;
pub use png::PngQrEncoder;

/// Encodes text as a QR code image
///
/// Implementations must be thread-safe (`Send + Sync`); the MCP server shares
/// one encoder across concurrent tool calls and holds no lock around it.
///
/// # Examples
///
/// ```
/// use qrcode_mcp::{
///     encoder::{PngQrEncoder, QrEncoder},
///     model::RenderOptions,
/// };
///
/// #[tokio::main]
/// async fn main() {
///     let encoder = PngQrEncoder::new();
///     let url = encoder
///         .to_data_url("hello", &RenderOptions::default())
///         .await
///         .unwrap();
///     assert!(url.starts_with("data:image/png;base64,"));
/// }
/// ```
#[async_trait]
pub trait QrEncoder: Send + Sync {
    /// Encodes `text` and returns the image as a base64 data URL
    ///
    /// # Errors
    ///
    /// - [`QrError::EncodingFailed`](crate::error::QrError::EncodingFailed)
    ///   - The text does not fit in a QR symbol at the requested level
    /// - [`QrError::ImageError`](crate::error::QrError::ImageError)
    ///   - PNG encoding failed
    /// - [`QrError::TaskFailed`](crate::error::QrError::TaskFailed)
    ///   - The background encode task did not complete
    async fn to_data_url(&self, text: &str, options: &RenderOptions) -> QrResult<String>;
}
