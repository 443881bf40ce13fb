//! Text style bitmask and its wire codec.
//!
//! A style is a bitmask over italic/bold/underline plus a color-present
//! bit. The color bit is never set by hand: it tracks whether a color is
//! attached, so the two can not drift apart. Wire form of a full style
//! record is `{"color": <color wire form>, "style": ["italic", ...]}`.

use serde_json::{Map, Value};

use crate::error::{FishroomError, Result};
use crate::protocol::color::{Color, ColorCodec};
use crate::protocol::json_type_name;

/// Style attributes for one run of text.
///
/// Immutable once built. Construct via [`TextStyle::plain`] or
/// [`TextStyle::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextStyle {
    style: u8,
    color: Option<Color>,
}

impl TextStyle {
    /// No attributes set.
    pub const NORMAL: u8 = 0;
    /// A color is attached.
    pub const COLOR: u8 = 1;
    pub const ITALIC: u8 = 2;
    pub const BOLD: u8 = 4;
    pub const UNDERLINE: u8 = 8;

    /// Unstyled text.
    pub const fn plain() -> Self {
        Self {
            style: Self::NORMAL,
            color: None,
        }
    }

    pub fn builder() -> TextStyleBuilder {
        TextStyleBuilder::new()
    }

    /// Rebuild from decoded parts, deriving the color bit from presence.
    pub(crate) fn from_parts(bits: u8, color: Option<Color>) -> Self {
        let style = if color.is_some() {
            bits | Self::COLOR
        } else {
            bits & !Self::COLOR
        };
        Self { style, color }
    }

    /// Raw bitmask.
    pub const fn style_bits(&self) -> u8 {
        self.style
    }

    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    pub const fn has_color(&self) -> bool {
        self.style & Self::COLOR != 0
    }

    pub const fn is_italic(&self) -> bool {
        self.style & Self::ITALIC != 0
    }

    pub const fn is_bold(&self) -> bool {
        self.style & Self::BOLD != 0
    }

    pub const fn is_underline(&self) -> bool {
        self.style & Self::UNDERLINE != 0
    }

    /// Set attribute names, in fixed italic/bold/underline order.
    pub fn style_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.is_italic() {
            names.push("italic");
        }
        if self.is_bold() {
            names.push("bold");
        }
        if self.is_underline() {
            names.push("underline");
        }
        names
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::plain()
    }
}

impl std::fmt::Display for TextStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.style_names();
        match (self.color, names.is_empty()) {
            (None, true) => write!(f, "<normal>"),
            (None, false) => write!(f, "<{}>", names.join(",")),
            (Some(color), true) => write!(f, "{color}"),
            (Some(color), false) => write!(f, "<{color}, [{}]>", names.join(",")),
        }
    }
}

/// Builds a [`TextStyle`] from named attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStyleBuilder {
    bits: u8,
    color: Option<Color>,
}

impl TextStyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn italic(self, on: bool) -> Self {
        self.toggle(TextStyle::ITALIC, on)
    }

    pub fn bold(self, on: bool) -> Self {
        self.toggle(TextStyle::BOLD, on)
    }

    pub fn underline(self, on: bool) -> Self {
        self.toggle(TextStyle::UNDERLINE, on)
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn build(self) -> TextStyle {
        TextStyle::from_parts(self.bits, self.color)
    }

    fn toggle(mut self, bit: u8, on: bool) -> Self {
        if on {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
        self
    }
}

/// Codec for style records and their `style` name lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStyleCodec {
    color: ColorCodec,
}

impl TextStyleCodec {
    pub const fn new() -> Self {
        Self {
            color: ColorCodec::new(),
        }
    }

    /// Encode the attribute-name list of a style, color excluded.
    pub fn encode_names(&self, style: &TextStyle) -> Value {
        Value::Array(
            style
                .style_names()
                .into_iter()
                .map(Value::from)
                .collect(),
        )
    }

    /// Decode an attribute-name list into a bitmask.
    ///
    /// Names are treated as a set: duplicates collapse and order is
    /// irrelevant. Unrecognized names and non-string entries are skipped
    /// so that newer peers can ship style tags this side does not know.
    /// A non-list value is a [`FishroomError::StyleList`].
    pub fn decode_names(&self, value: &Value) -> Result<u8> {
        let entries = value.as_array().ok_or_else(|| {
            FishroomError::StyleList(format!(
                "expected a list of style names, got {}",
                json_type_name(value)
            ))
        })?;
        let mut bits = TextStyle::NORMAL;
        for entry in entries {
            match entry.as_str() {
                Some("italic") => bits |= TextStyle::ITALIC,
                Some("bold") => bits |= TextStyle::BOLD,
                Some("underline") => bits |= TextStyle::UNDERLINE,
                _ => {}
            }
        }
        Ok(bits)
    }

    /// Encode a full style record, `{"color": ..., "style": [...]}`.
    pub fn encode_record(&self, style: &TextStyle) -> Value {
        let mut record = Map::new();
        record.insert("color".into(), self.color.encode(style.color().as_ref()));
        record.insert("style".into(), self.encode_names(style));
        Value::Object(record)
    }

    /// Decode a full style record.
    ///
    /// A missing `color` key means no color; a missing `style` key means
    /// no attributes. The color-present bit is derived from the decoded
    /// color, never read off the wire.
    pub fn decode_record(&self, value: &Value) -> Result<TextStyle> {
        let record = value.as_object().ok_or_else(|| {
            FishroomError::RichTextStructure(format!(
                "style record should be an object, got {}",
                json_type_name(value)
            ))
        })?;
        let color = match record.get("color") {
            None => None,
            Some(v) => self.color.decode(v)?,
        };
        let bits = match record.get("style") {
            None => TextStyle::NORMAL,
            Some(v) => self.decode_names(v)?,
        };
        Ok(TextStyle::from_parts(bits, color))
    }
}
