//! Error types for QR code generation
//!
//! This module defines the error taxonomy for the `qrcode` tool. Each error
//! carries enough context to build a useful protocol message and provides an
//! actionable remediation hint for the caller.

/// Result type alias for QR generation operations
pub type QrResult<T> = Result<T, QrError>;

/// Errors raised while validating a request or encoding a QR code
///
/// Validation failures are reported through
/// [`InvalidParameter`](QrError::InvalidParameter); every other variant is an
/// encoding-side failure that happens after the encoder has been invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    /// A request field violates its declared constraint
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Wire name of the offending field (e.g. `darkColor`)
        parameter: String,
        /// Why the value was rejected
        reason:    String,
    },

    /// The QR symbol could not be built (e.g. data exceeds capacity)
    #[error("{reason}")]
    EncodingFailed {
        /// Message reported by the encoder
        reason: String,
    },

    /// Rasterising or PNG-encoding the symbol failed
    #[error("Image encoding error: {0}")]
    ImageError(String),

    /// The encoder produced something that is not a base64 data URL
    #[error("Malformed data URL: {reason}")]
    InvalidDataUrl {
        /// What was wrong with the data URL
        reason: String,
    },

    /// The blocking encode task panicked or was aborted
    #[error("Encoding task failed: {0}")]
    TaskFailed(String),
}

impl QrError {
    /// Shorthand for building an [`InvalidParameter`](QrError::InvalidParameter)
    pub fn invalid(parameter: &str, reason: impl Into<String>) -> Self {
        QrError::InvalidParameter {
            parameter: parameter.to_string(),
            reason:    reason.into(),
        }
    }

    /// Returns true for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, QrError::InvalidParameter { .. })
    }

    /// Returns an actionable remediation hint for this error
    ///
    /// # Examples
    ///
    /// ```
    /// use qrcode_mcp::error::QrError;
    ///
    /// let error = QrError::invalid("size", "value 32 is below minimum 64");
    /// assert!(error.remediation_hint().contains("64 and 2048"));
    /// ```
    pub fn remediation_hint(&self) -> &str {
        match self {
            QrError::InvalidParameter { parameter, .. } => match parameter.as_str() {
                "text" => "Text must contain between 1 and 2000 characters.",
                "size" => "Size must be an integer between 64 and 2048 pixels.",
                "darkColor" | "lightColor" => {
                    "Colors must be six-digit hex values prefixed with '#', e.g. #1a2b3c."
                }
                "errorCorrectionLevel" => "Error correction level must be one of L, M, Q or H.",
                "margin" => "Margin must be an integer between 0 and 10 modules.",
                _ => "Check the parameter value against the tool's input schema.",
            },
            QrError::EncodingFailed { .. } => {
                "The text could not be encoded. Shorten the text or lower the error correction \
                 level (L holds the most data)."
            }
            QrError::ImageError(_) => {
                "Rendering the PNG failed. Try a smaller size or retry the request."
            }
            QrError::InvalidDataUrl { .. } => {
                "The encoder returned an unexpected payload. This is a server defect; retry the \
                 request and report it if it persists."
            }
            QrError::TaskFailed(_) => {
                "The encoding task was interrupted. Retry the request; the server remains \
                 available."
            }
        }
    }
}

impl From<qrcode::types::QrError> for QrError {
    fn from(err: qrcode::types::QrError) -> Self {
        QrError::EncodingFailed {
            reason: err.to_string(),
        }
    }
}

impl From<image::ImageError> for QrError {
    fn from(err: image::ImageError) -> Self {
        QrError::ImageError(err.to_string())
    }
}
