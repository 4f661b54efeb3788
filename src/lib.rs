//! qrcode-mcp: QR code generation MCP server
//!
//! This library provides a Model Context Protocol (MCP) server exposing a
//! single `qrcode` tool that renders text as a styled QR code PNG (size,
//! colors, error correction level and margin).

pub mod config;
pub mod encoder;
pub mod error;
pub mod mcp;
pub mod mcp_content;
pub mod model;
pub mod util;
