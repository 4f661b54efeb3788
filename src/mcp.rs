//! MCP service implementation with tool routing
//!
//! This module provides the qrcode-mcp server: a single `qrcode` tool that
//! validates its parameters, asks a [`QrEncoder`] for a PNG data URL, and
//! returns it as MCP image content.
//!
//! Failures are always raised as protocol-level errors (JSON-RPC
//! `ErrorData`), never as a successful result carrying error text:
//! - invalid input → `-32602` (invalid params)
//! - encoder failure → `-32603` (internal error), message prefixed with
//!   `QR code generation failed:`

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, ErrorData as McpError, Implementation, ServerCapabilities, ServerInfo,
        Tool,
    },
    tool, tool_handler, tool_router,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    encoder::{PngQrEncoder, QrEncoder},
    error::{QrError, QrResult},
    mcp_content::build_qr_result,
    model::{QrRequest, text_len},
};

/// Name reported in the MCP `initialize` handshake
pub const SERVER_NAME: &str = "qrcode-mcp";

/// Converts a QrError to an MCP ErrorData
///
/// Validation errors become `invalid_params`; everything else becomes
/// `internal_error` with the underlying message preserved. The remediation
/// hint travels in the error's `data` field.
pub fn convert_qr_error_to_mcp(error: QrError) -> McpError {
    match &error {
        QrError::InvalidParameter { parameter, .. } => McpError::invalid_params(
            error.to_string(),
            Some(json!({
                "parameter": parameter,
                "hint": error.remediation_hint(),
            })),
        ),
        _ => McpError::internal_error(
            format!("QR code generation failed: {}", error),
            Some(json!({ "hint": error.remediation_hint() })),
        ),
    }
}

/// QR code MCP server
///
/// Holds no per-request state; clones share the same encoder and can serve
/// concurrent tool calls.
///
/// # Tools
///
/// - `qrcode`: Generate a styled QR code PNG from text
#[derive(Clone)]
pub struct QrCodeMcpServer {
    /// Tool router for dispatching tool calls
    tool_router: ToolRouter<Self>,
    /// Encoder that turns validated requests into image data URLs
    encoder:     Arc<dyn QrEncoder>,
}

#[tool_router]
impl QrCodeMcpServer {
    /// Creates a new server using the given encoder
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use qrcode_mcp::{encoder::MockEncoder, mcp::QrCodeMcpServer};
    ///
    /// let server = QrCodeMcpServer::new(Arc::new(MockEncoder::new()));
    /// ```
    pub fn new(encoder: Arc<dyn QrEncoder>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            encoder,
        }
    }

    /// Creates a new server backed by the PNG encoder
    pub fn new_with_png() -> Self {
        Self::new(Arc::new(PngQrEncoder::new()))
    }

    /// Generates a QR code image from text
    ///
    /// # Parameters
    ///
    /// - `text` (required): 1-2000 characters to encode
    /// - `size` (optional): image side in pixels, 64-2048 (default: 256)
    /// - `darkColor` (optional): `#RRGGBB` (default: `#000000`)
    /// - `lightColor` (optional): `#RRGGBB` (default: `#ffffff`)
    /// - `errorCorrectionLevel` (optional): L, M, Q or H (default: M)
    /// - `margin` (optional): quiet zone in modules, 0-10 (default: 4)
    ///
    /// # Examples
    ///
    /// Request:
    /// ```json
    /// {
    ///   "method": "tools/call",
    ///   "params": {
    ///     "name": "qrcode",
    ///     "arguments": { "text": "https://example.com", "size": 512 }
    ///   }
    /// }
    /// ```
    ///
    /// Response:
    /// ```json
    /// {
    ///   "content": [{
    ///     "type": "image",
    ///     "data": "iVBORw0KGgoAAAANSUhEUgAA...",
    ///     "mimeType": "image/png"
    ///   }]
    /// }
    /// ```
    #[tool(description = "Generate a QR code image with customizable styling options")]
    pub async fn qrcode(
        &self,
        Parameters(request): Parameters<QrRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.generate(request).await.map_err(|error| {
            warn!(validation = error.is_validation(), "qrcode request failed: {}", error);
            convert_qr_error_to_mcp(error)
        })
    }
}

impl QrCodeMcpServer {
    /// Validates `request`, encodes it and builds the tool result
    ///
    /// The encoder is only invoked once every field has passed validation.
    ///
    /// # Errors
    ///
    /// - [`QrError::InvalidParameter`] if any field violates its constraint
    /// - any error reported by the encoder, unchanged
    pub async fn generate(&self, request: QrRequest) -> QrResult<CallToolResult> {
        let options = request.validate()?;
        debug!(
            text_len = text_len(&options.text),
            size = options.size,
            level = %options.error_correction_level,
            margin = options.margin,
            "generating QR code"
        );

        let data_url = self
            .encoder
            .to_data_url(&options.text, &options.render_options())
            .await?;

        build_qr_result(&data_url)
    }

    /// Lists the tools this server advertises
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

impl Default for QrCodeMcpServer {
    fn default() -> Self {
        Self::new_with_png()
    }
}

#[tool_handler]
impl ServerHandler for QrCodeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Call the `qrcode` tool with the text to encode. Optional styling: size (px), \
                 darkColor/lightColor (#RRGGBB), errorCorrectionLevel (L/M/Q/H) and margin \
                 (modules). Returns a PNG image."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
