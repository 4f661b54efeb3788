//! Data models and type definitions for qrcode-mcp
//!
//! This module defines the request/response contract of the `qrcode` tool:
//! - `QrRequest`: the wire-level parameter set, with defaults applied during
//!   deserialization and the JSON schema derived from the same struct
//! - `QrOptions`: the validated, strongly typed form of a request
//! - `RenderOptions`: the options shape handed to the encoder

use std::fmt;

use qrcode::EcLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{QrError, QrResult},
    util::serde_utils::whole_number,
};

/// Maximum text length in UTF-16 code units
pub const TEXT_MAX_LEN: usize = 2000;
/// Smallest accepted image size in pixels
pub const SIZE_MIN: u32 = 64;
/// Largest accepted image size in pixels
pub const SIZE_MAX: u32 = 2048;
/// Largest accepted quiet-zone margin in modules
pub const MARGIN_MAX: u32 = 10;

/// Default image size in pixels
pub const DEFAULT_SIZE: u32 = 256;
/// Default dark module color
pub const DEFAULT_DARK_COLOR: &str = "#000000";
/// Default light module color
pub const DEFAULT_LIGHT_COLOR: &str = "#ffffff";
/// Default quiet-zone margin in modules
pub const DEFAULT_MARGIN: u32 = 4;

/// Pattern advertised for both color fields; must agree with
/// [`HexColor::parse`]
pub const HEX_COLOR_PATTERN: &str = r"^#[0-9A-Fa-f]{6}$";

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ErrorCorrectionLevel {
    /// Low, recovers ~7% of damaged data
    L,
    /// Medium, recovers ~15% of damaged data
    #[default]
    M,
    /// Quartile, recovers ~25% of damaged data
    Q,
    /// High, recovers ~30% of damaged data
    H,
}

impl ErrorCorrectionLevel {
    /// Returns the level as its single-letter wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => "L",
            ErrorCorrectionLevel::M => "M",
            ErrorCorrectionLevel::Q => "Q",
            ErrorCorrectionLevel::H => "H",
        }
    }

    /// Converts to the encoder library's level
    pub fn to_ec_level(self) -> EcLevel {
        match self {
            ErrorCorrectionLevel::L => EcLevel::L,
            ErrorCorrectionLevel::M => EcLevel::M,
            ErrorCorrectionLevel::Q => EcLevel::Q,
            ErrorCorrectionLevel::H => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RGB color parsed from `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl HexColor {
    /// Black, the default dark color
    pub const BLACK: HexColor = HexColor { r: 0, g: 0, b: 0 };
    /// White, the default light color
    pub const WHITE: HexColor = HexColor {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    /// Parses a `#RRGGBB` string (hex digits in either case)
    ///
    /// Returns `None` for anything [`HEX_COLOR_PATTERN`] would not match.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrcode_mcp::model::HexColor;
    ///
    /// let color = HexColor::parse("#1A2b3C").unwrap();
    /// assert_eq!((color.r, color.g, color.b), (0x1a, 0x2b, 0x3c));
    ///
    /// assert!(HexColor::parse("red").is_none());
    /// assert!(HexColor::parse("#fff").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 7 || bytes[0] != b'#' || !bytes[1..].iter().all(u8::is_ascii_hexdigit)
        {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&value[i..i + 2], 16).ok();
        Some(HexColor {
            r: channel(1)?,
            g: channel(3)?,
            b: channel(5)?,
        })
    }

    /// Returns the color as an opaque RGBA quadruple
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_dark_color() -> String {
    DEFAULT_DARK_COLOR.to_string()
}

fn default_light_color() -> String {
    DEFAULT_LIGHT_COLOR.to_string()
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

/// Parameters for the `qrcode` tool
///
/// Omitted optional fields are filled in during deserialization, so a
/// `QrRequest` always holds effective values. Range and pattern checks are
/// performed by [`QrRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    /// The text content to encode in the QR code
    #[schemars(length(min = 1, max = 2000))]
    pub text: String,

    /// QR code size in pixels (64-2048)
    #[serde(default = "default_size", deserialize_with = "whole_number")]
    #[schemars(range(min = 64, max = 2048))]
    pub size: u32,

    /// Dark module color in hex format (e.g., #000000)
    #[serde(default = "default_dark_color")]
    #[schemars(regex(pattern = r"^#[0-9A-Fa-f]{6}$"))]
    pub dark_color: String,

    /// Light module color in hex format (e.g., #ffffff)
    #[serde(default = "default_light_color")]
    #[schemars(regex(pattern = r"^#[0-9A-Fa-f]{6}$"))]
    pub light_color: String,

    /// Error correction level: L(~7%), M(~15%), Q(~25%), H(~30%)
    #[serde(default)]
    pub error_correction_level: ErrorCorrectionLevel,

    /// Margin size around QR code (0-10 modules)
    #[serde(default = "default_margin", deserialize_with = "whole_number")]
    #[schemars(range(min = 0, max = 10))]
    pub margin: u32,
}

impl QrRequest {
    /// Creates a request for `text` with every optional field at its default
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text:                   text.into(),
            size:                   DEFAULT_SIZE,
            dark_color:             default_dark_color(),
            light_color:            default_light_color(),
            error_correction_level: ErrorCorrectionLevel::default(),
            margin:                 DEFAULT_MARGIN,
        }
    }

    /// Sets the image size in pixels
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Sets the dark and light colors
    pub fn with_colors(mut self, dark: impl Into<String>, light: impl Into<String>) -> Self {
        self.dark_color = dark.into();
        self.light_color = light.into();
        self
    }

    /// Sets the error correction level
    pub fn with_error_correction_level(mut self, level: ErrorCorrectionLevel) -> Self {
        self.error_correction_level = level;
        self
    }

    /// Sets the quiet-zone margin in modules
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Validates the request and converts it to [`QrOptions`]
    ///
    /// Checks run in a fixed order (text, size, darkColor, lightColor,
    /// margin) and the first violation is returned. The error correction
    /// level is already constrained by its type.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidParameter`] naming the offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrcode_mcp::model::QrRequest;
    ///
    /// let opts = QrRequest::new("hello").validate().unwrap();
    /// assert_eq!(opts.size, 256);
    ///
    /// let err = QrRequest::new("hello").with_size(32).validate().unwrap_err();
    /// assert!(err.to_string().contains("size"));
    /// ```
    pub fn validate(self) -> QrResult<QrOptions> {
        let len = text_len(&self.text);
        if len == 0 {
            return Err(QrError::invalid("text", "must not be empty"));
        }
        if len > TEXT_MAX_LEN {
            return Err(QrError::invalid(
                "text",
                format!("length {} exceeds maximum of {} characters", len, TEXT_MAX_LEN),
            ));
        }

        if !(SIZE_MIN..=SIZE_MAX).contains(&self.size) {
            return Err(QrError::invalid(
                "size",
                format!("value {} must be between {} and {}", self.size, SIZE_MIN, SIZE_MAX),
            ));
        }

        let dark_color = parse_color("darkColor", &self.dark_color)?;
        let light_color = parse_color("lightColor", &self.light_color)?;

        if self.margin > MARGIN_MAX {
            return Err(QrError::invalid(
                "margin",
                format!("value {} must be between 0 and {}", self.margin, MARGIN_MAX),
            ));
        }

        Ok(QrOptions {
            text: self.text,
            size: self.size,
            dark_color,
            light_color,
            error_correction_level: self.error_correction_level,
            margin: self.margin,
        })
    }
}

/// Length of `text` in UTF-16 code units, the unit JavaScript clients measure strings in
///
/// Characters outside the Basic Multilingual Plane count twice.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn parse_color(parameter: &str, value: &str) -> QrResult<HexColor> {
    HexColor::parse(value).ok_or_else(|| {
        QrError::invalid(
            parameter,
            format!("'{}' does not match pattern {}", value, HEX_COLOR_PATTERN),
        )
    })
}

/// A validated `qrcode` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    pub text:                   String,
    pub size:                   u32,
    pub dark_color:             HexColor,
    pub light_color:            HexColor,
    pub error_correction_level: ErrorCorrectionLevel,
    pub margin:                 u32,
}

impl QrOptions {
    /// Builds the encoder options for this request
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width:                  self.size,
            margin:                 self.margin,
            color:                  ColorPair {
                dark:  self.dark_color,
                light: self.light_color,
            },
            error_correction_level: self.error_correction_level,
        }
    }
}

/// Module colors passed to the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub dark:  HexColor,
    pub light: HexColor,
}

/// Options understood by a [`QrEncoder`](crate::encoder::QrEncoder)
///
/// `width` is the requested image side in pixels and `margin` the quiet
/// zone in modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width:                  u32,
    pub margin:                 u32,
    pub color:                  ColorPair,
    pub error_correction_level: ErrorCorrectionLevel,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width:                  DEFAULT_SIZE,
            margin:                 DEFAULT_MARGIN,
            color:                  ColorPair {
                dark:  HexColor::BLACK,
                light: HexColor::WHITE,
            },
            error_correction_level: ErrorCorrectionLevel::M,
        }
    }
}
