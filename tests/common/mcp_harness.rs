//! MCP Server Test Harness
//!
//! Provides reusable test fixtures for exercising the qrcode MCP server with
//! both the mock and the real PNG encoder.
//!
//! # Usage
//!
//! ```rust
//! use common::mcp_harness::{ContentValidator, McpTestContext};
//!
//! #[tokio::test]
//! async fn test_generate() {
//!     let ctx = McpTestContext::new_with_png();
//!     let result = ctx.qrcode_text("hello").await.unwrap();
//!     let image = ContentValidator::validate_qr_result(&result).unwrap();
//!     assert!(image.bytes.starts_with(&[0x89, 0x50, 0x4e, 0x47])); // PNG
//! }
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use qrcode_mcp::{
    encoder::{MockEncoder, QrEncoder},
    mcp::QrCodeMcpServer,
    model::QrRequest,
};
use rmcp::{
    RoleClient, ServiceError, ServiceExt,
    handler::server::wrapper::Parameters,
    model::{CallToolRequestParam, CallToolResult, ErrorData, Tool},
    service::RunningService,
};
use serde_json::Value;
use tokio::task::JoinHandle;

/// Test fixture for MCP server integration tests
pub struct McpTestContext {
    /// The MCP server instance
    pub server: QrCodeMcpServer,
    /// Mock encoder, when the context was built with one
    mock:       Option<Arc<MockEncoder>>,
}

impl McpTestContext {
    /// Create test context backed by the real PNG encoder
    pub fn new_with_png() -> Self {
        Self {
            server: QrCodeMcpServer::new_with_png(),
            mock:   None,
        }
    }

    /// Create test context with a default MockEncoder
    pub fn new_with_mock() -> Self {
        Self::new_with_configured_mock(MockEncoder::new())
    }

    /// Create test context with a configured MockEncoder
    ///
    /// Use this to inject errors or delays.
    pub fn new_with_configured_mock(mock: MockEncoder) -> Self {
        let mock = Arc::new(mock);
        let encoder: Arc<dyn QrEncoder> = Arc::clone(&mock) as Arc<dyn QrEncoder>;
        Self {
            server: QrCodeMcpServer::new(encoder),
            mock:   Some(mock),
        }
    }

    // --- Tool invocation helpers ---

    /// Call the qrcode tool with a typed request
    pub async fn qrcode(&self, request: QrRequest) -> Result<CallToolResult, ErrorData> {
        self.server.qrcode(Parameters(request)).await
    }

    /// Convenience: call the qrcode tool with only `text`
    pub async fn qrcode_text(&self, text: &str) -> Result<CallToolResult, ErrorData> {
        self.qrcode(QrRequest::new(text)).await
    }

    /// Call the qrcode tool with raw JSON arguments
    ///
    /// Mirrors the transport: arguments that do not deserialize are rejected
    /// as invalid params before the tool runs.
    pub async fn qrcode_json(&self, arguments: Value) -> Result<CallToolResult, ErrorData> {
        let request: QrRequest = serde_json::from_value(arguments)
            .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;
        self.qrcode(request).await
    }

    // --- Utility methods ---

    /// Number of encoder calls (mock contexts only)
    pub fn encoder_calls(&self) -> usize {
        self.mock.as_ref().map_or(0, |mock| mock.call_count())
    }

    /// The mock encoder, if any
    pub fn mock(&self) -> Option<&MockEncoder> {
        self.mock.as_deref()
    }
}

/// In-process MCP client talking to a server over an in-memory pipe
///
/// Unlike [`McpTestContext`], requests go through the full JSON-RPC path:
/// initialize handshake, tool routing and rmcp's own argument parsing.
pub struct McpClientSession {
    /// Connected client; derefs to the peer used to send requests
    pub client: RunningService<RoleClient, ()>,
    server:     JoinHandle<()>,
}

impl McpClientSession {
    /// Serves `server` on one end of a duplex pipe and connects a client
    pub async fn connect(server: QrCodeMcpServer) -> anyhow::Result<Self> {
        let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);

        let server = tokio::spawn(async move {
            if let Ok(service) = server.serve(server_transport).await {
                let _ = service.waiting().await;
            }
        });
        let client = ().serve(client_transport).await?;

        Ok(Self { client, server })
    }

    /// Calls a tool by name with raw JSON arguments
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, ServiceError> {
        self.client
            .call_tool(CallToolRequestParam {
                name:      name.to_string().into(),
                arguments: arguments.as_object().cloned(),
            })
            .await
    }

    /// Lists every tool the server advertises
    pub async fn list_tools(&self) -> Result<Vec<Tool>, ServiceError> {
        self.client.list_all_tools().await
    }

    /// Shuts down both ends of the session
    pub async fn close(self) {
        let _ = self.client.cancel().await;
        self.server.abort();
    }
}

/// Extracts the JSON-RPC error carried by a failed request
pub fn rpc_error(error: ServiceError) -> Result<ErrorData, String> {
    match error {
        ServiceError::McpError(error) => Ok(error),
        other => Err(format!("expected a JSON-RPC error, got {}", other)),
    }
}

/// Decoded image from a qrcode tool result
#[derive(Debug)]
pub struct QrImage {
    /// Raw base64 `data` field as returned
    pub data:      String,
    /// MIME type reported by the result
    pub mime_type: String,
    /// Decoded image bytes
    pub bytes:     Vec<u8>,
}

impl QrImage {
    /// Decodes the PNG and returns its dimensions
    pub fn dimensions(&self) -> Result<(u32, u32), String> {
        let image = image::load_from_memory(&self.bytes)
            .map_err(|e| format!("image should decode: {}", e))?;
        Ok((image.width(), image.height()))
    }

    /// Decodes the PNG and returns the RGBA value of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4], String> {
        let image = image::load_from_memory(&self.bytes)
            .map_err(|e| format!("image should decode: {}", e))?
            .to_rgba8();
        Ok(image.get_pixel(x, y).0)
    }
}

/// Validates MCP tool result structure
pub struct ContentValidator;

impl ContentValidator {
    /// Checks that `result` is a success holding exactly one image item
    pub fn validate_qr_result(result: &CallToolResult) -> Result<QrImage, String> {
        if result.is_error.unwrap_or(false) {
            return Err("result should not be an error".to_string());
        }
        if result.content.len() != 1 {
            return Err(format!("expected 1 content item, got {}", result.content.len()));
        }

        let image = result.content[0]
            .as_image()
            .ok_or("content should be an image")?;
        if image.data.starts_with("data:") {
            return Err("data should not carry a data URL prefix".to_string());
        }

        let bytes = STANDARD
            .decode(&image.data)
            .map_err(|e| format!("data should be base64: {}", e))?;

        Ok(QrImage {
            data: image.data.clone(),
            mime_type: image.mime_type.clone(),
            bytes,
        })
    }

    /// Checks PNG magic bytes
    pub fn is_valid_png(data: &[u8]) -> bool {
        data.starts_with(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a])
    }
}
