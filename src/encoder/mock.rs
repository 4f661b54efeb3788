//! Mock QR encoder for testing
//!
//! `MockEncoder` implements [`QrEncoder`] without building any QR symbol. It
//! returns a canned data URL and records every invocation, which lets tests
//! prove that validation failures never reach the encoder.
//!
//! # Examples
//!
//! ## Error Injection
//!
//! ```
//! use qrcode_mcp::{
//!     encoder::{MockEncoder, QrEncoder},
//!     error::QrError,
//!     model::RenderOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let encoder = MockEncoder::new().with_error(QrError::EncodingFailed {
//!         reason: "bad input".to_string(),
//!     });
//!
//!     let result = encoder.to_data_url("hello", &RenderOptions::default()).await;
//!     assert!(result.is_err());
//!     assert_eq!(encoder.call_count(), 1);
//! }
//! ```

use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::sleep;

use super::QrEncoder;
use crate::{
    error::{QrError, QrResult},
    model::RenderOptions,
};

/// A 1x1 transparent PNG, base64-encoded
pub const MOCK_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

/// Mock encoder for tests and development
#[derive(Debug)]
pub struct MockEncoder {
    /// Data URL returned on success
    data_url:        String,
    /// Optional delay to simulate a slow encode
    delay:           Option<Duration>,
    /// Optional error returned by every call
    error_injection: Option<QrError>,
    /// Number of `to_data_url` calls so far
    calls:           AtomicUsize,
    /// Text and options of the most recent call
    last_call:       Mutex<Option<(String, RenderOptions)>>,
}

impl MockEncoder {
    /// Creates a mock returning a 1x1 PNG data URL
    pub fn new() -> Self {
        Self {
            data_url:        format!("data:image/png;base64,{}", MOCK_PNG_BASE64),
            delay:           None,
            error_injection: None,
            calls:           AtomicUsize::new(0),
            last_call:       Mutex::new(None),
        }
    }

    /// Overrides the data URL returned on success
    pub fn with_data_url(mut self, data_url: impl Into<String>) -> Self {
        self.data_url = data_url.into();
        self
    }

    /// Delays every call by `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Injects an error that will be returned by every call
    pub fn with_error(mut self, error: QrError) -> Self {
        self.error_injection = Some(error);
        self
    }

    /// Number of times the encoder has been invoked
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text and options passed to the most recent call
    pub fn last_call(&self) -> Option<(String, RenderOptions)> {
        self.last_call.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QrEncoder for MockEncoder {
    async fn to_data_url(&self, text: &str, options: &RenderOptions) -> QrResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_call.lock() {
            *guard = Some((text.to_string(), *options));
        }

        if let Some(duration) = self.delay {
            sleep(duration).await;
        }

        match &self.error_injection {
            Some(error) => Err(error.clone()),
            None => Ok(self.data_url.clone()),
        }
    }
}
