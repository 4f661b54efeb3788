//! MCP content builders for QR code results
//!
//! Converts an encoder's data URL into the MCP response shape: a single
//! image content item whose `data` is the bare base64 payload and whose
//! `mimeType` comes from the data URL's media type.
//!
//! # Examples
//!
//! ```
//! use qrcode_mcp::mcp_content::build_qr_result;
//!
//! let result = build_qr_result("data:image/png;base64,XYZ").unwrap();
//! assert!(!result.is_error.unwrap_or(false));
//!
//! let image = result.content[0].as_image().unwrap();
//! assert_eq!(image.data, "XYZ");
//! assert_eq!(image.mime_type, "image/png");
//! ```

use rmcp::model::{CallToolResult, Content};

use crate::{error::QrResult, util::data_url::DataUrl};

/// Builds MCP image content from a parsed data URL
pub fn build_image_content(url: &DataUrl<'_>) -> Content {
    Content::image(url.payload, url.mime_type)
}

/// Builds the `qrcode` tool result from an encoder's data URL
///
/// # Errors
///
/// Returns [`QrError::InvalidDataUrl`](crate::error::QrError::InvalidDataUrl)
/// when `data_url` cannot be parsed.
pub fn build_qr_result(data_url: &str) -> QrResult<CallToolResult> {
    let url = DataUrl::parse(data_url)?;
    Ok(CallToolResult::success(vec![build_image_content(&url)]))
}
