//! Palette color attachment for styled text.
//!
//! Wire form is a list of palette indices: `[]` (no color), `[fg]`, or
//! `[fg, bg]`. Arity carries background presence, so a foreground-only
//! color never serializes a filler value. Decoding additionally accepts
//! a bare integer (foreground only) and the legacy empty-string form.

use serde_json::Value;

use crate::error::{FishroomError, Result};
use crate::protocol::json_type_name;

/// Foreground color with an optional background, both 256-palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    fg: u8,
    bg: Option<u8>,
}

impl Color {
    /// Foreground-only color.
    pub const fn new(fg: u8) -> Self {
        Self { fg, bg: None }
    }

    /// Foreground and background pair.
    pub const fn with_bg(fg: u8, bg: u8) -> Self {
        Self { fg, bg: Some(bg) }
    }

    pub const fn fg(&self) -> u8 {
        self.fg
    }

    pub const fn bg(&self) -> Option<u8> {
        self.bg
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bg {
            Some(bg) => write!(f, "<color: {}/{}>", self.fg, bg),
            None => write!(f, "<color: {}>", self.fg),
        }
    }
}

/// Codec for the `color` entry of a style record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCodec;

impl ColorCodec {
    pub const fn new() -> Self {
        Self
    }

    /// Encode an optional color. Absent colors encode as `[]`.
    pub fn encode(&self, color: Option<&Color>) -> Value {
        match color {
            None => Value::Array(Vec::new()),
            Some(c) => {
                let mut parts = vec![Value::from(c.fg)];
                if let Some(bg) = c.bg {
                    parts.push(Value::from(bg));
                }
                Value::Array(parts)
            }
        }
    }

    /// Decode an optional color.
    ///
    /// `null`, `""`, and `[]` all decode to no color. A bare integer or
    /// `[fg]` decodes foreground-only; `[fg, bg]` decodes the pair. Any
    /// other shape is a [`FishroomError::ColorStructure`].
    pub fn decode(&self, value: &Value) -> Result<Option<Color>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            Value::Number(_) => Ok(Some(Color::new(palette_index(value, "fg")?))),
            Value::Array(parts) => match parts.as_slice() {
                [] => Ok(None),
                [fg] => Ok(Some(Color::new(palette_index(fg, "fg")?))),
                [fg, bg] => Ok(Some(Color::with_bg(
                    palette_index(fg, "fg")?,
                    palette_index(bg, "bg")?,
                ))),
                more => Err(FishroomError::ColorStructure(format!(
                    "expected fg and bg only, got {} entries",
                    more.len()
                ))),
            },
            other => Err(FishroomError::ColorStructure(format!(
                "expected a palette index or list, got {}",
                json_type_name(other)
            ))),
        }
    }
}

/// Read one palette index, rejecting non-integers and out-of-range values.
fn palette_index(value: &Value, part: &str) -> Result<u8> {
    let n = value.as_u64().ok_or_else(|| {
        FishroomError::ColorStructure(format!(
            "{part} should be a palette index, got {}",
            json_type_name(value)
        ))
    })?;
    u8::try_from(n).map_err(|_| {
        FishroomError::ColorStructure(format!("{part} palette index {n} out of range"))
    })
}
