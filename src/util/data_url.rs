//! Data URL parsing
//!
//! Encoders hand back images as `data:<mime>;base64,<payload>`. MCP image
//! content wants the bare payload and the MIME type as separate fields, so
//! this module splits them apart.

use crate::error::{QrError, QrResult};

/// A parsed `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type, e.g. `image/png`
    pub mime_type: &'a str,
    /// Everything after the first comma
    pub payload:   &'a str,
}

impl<'a> DataUrl<'a> {
    /// Parses a data URL
    ///
    /// The payload is everything after the first comma. The MIME type is the
    /// media-type segment between `data:` and the first `;` or `,`.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidDataUrl`] if the input lacks the `data:`
    /// scheme, the comma separator, or a media type.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrcode_mcp::util::data_url::DataUrl;
    ///
    /// let url = DataUrl::parse("data:image/png;base64,XYZ").unwrap();
    /// assert_eq!(url.mime_type, "image/png");
    /// assert_eq!(url.payload, "XYZ");
    /// ```
    pub fn parse(input: &'a str) -> QrResult<Self> {
        let rest = input.strip_prefix("data:").ok_or_else(|| QrError::InvalidDataUrl {
            reason: "missing 'data:' scheme".to_string(),
        })?;

        let (header, payload) = rest.split_once(',').ok_or_else(|| QrError::InvalidDataUrl {
            reason: "missing ',' separator".to_string(),
        })?;

        let mime_type = header.split(';').next().unwrap_or_default();
        if mime_type.is_empty() {
            return Err(QrError::InvalidDataUrl {
                reason: "missing media type".to_string(),
            });
        }

        Ok(DataUrl { mime_type, payload })
    }
}
