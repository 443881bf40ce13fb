//! Styled text runs and their wire codec.
//!
//! A rich text is an ordered list of (style, text) runs; render order is
//! the list order. On the wire each run is a two-element list of the
//! encoded style record and the text. Absent (`null`) rich text is
//! distinct from an empty run list. Decoding is all-or-nothing: one bad
//! run fails the whole value.

use serde_json::Value;

use crate::error::{FishroomError, Result};
use crate::protocol::json_type_name;
use crate::protocol::style::{TextStyle, TextStyleCodec};

/// Ordered styled runs. Valid by construction: every run already holds a
/// well-formed [`TextStyle`] and owned text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText(Vec<(TextStyle, String)>);

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: TextStyle, text: impl Into<String>) {
        self.0.push((style, text.into()));
    }

    pub fn runs(&self) -> &[(TextStyle, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenation of all run texts, styles dropped.
    pub fn plain_text(&self) -> String {
        self.0.iter().map(|(_, text)| text.as_str()).collect()
    }
}

impl From<Vec<(TextStyle, String)>> for RichText {
    fn from(runs: Vec<(TextStyle, String)>) -> Self {
        Self(runs)
    }
}

impl FromIterator<(TextStyle, String)> for RichText {
    fn from_iter<I: IntoIterator<Item = (TextStyle, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RichText {
    type Item = (TextStyle, String);
    type IntoIter = std::vec::IntoIter<(TextStyle, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RichText {
    type Item = &'a (TextStyle, String);
    type IntoIter = std::slice::Iter<'a, (TextStyle, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Codec for rich-text run lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichTextCodec {
    style: TextStyleCodec,
}

impl RichTextCodec {
    pub const fn new() -> Self {
        Self {
            style: TextStyleCodec::new(),
        }
    }

    /// Encode optional rich text. Absent rich text encodes as `null`,
    /// which is not the same as an empty run list.
    pub fn encode(&self, rich_text: Option<&RichText>) -> Value {
        match rich_text {
            None => Value::Null,
            Some(rt) => Value::Array(
                rt.runs()
                    .iter()
                    .map(|(style, text)| {
                        Value::Array(vec![
                            self.style.encode_record(style),
                            Value::String(text.clone()),
                        ])
                    })
                    .collect(),
            ),
        }
    }

    /// Decode optional rich text.
    ///
    /// Every run must be a `[style record, text]` pair with string text;
    /// any malformed run fails the whole list with
    /// [`FishroomError::RichTextStructure`], nested style errors included.
    pub fn decode(&self, value: &Value) -> Result<Option<RichText>> {
        if value.is_null() {
            return Ok(None);
        }
        let entries = value.as_array().ok_or_else(|| {
            FishroomError::RichTextStructure(format!(
                "expected a list of style and text pairs, got {}",
                json_type_name(value)
            ))
        })?;
        let mut runs = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let Some([style_value, text_value]) = entry.as_array().map(Vec::as_slice) else {
                return Err(FishroomError::RichTextStructure(format!(
                    "run {i} should be a style and text pair"
                )));
            };
            let style = self
                .style
                .decode_record(style_value)
                .map_err(|e| FishroomError::RichTextStructure(format!("run {i}: {e}")))?;
            let text = text_value.as_str().ok_or_else(|| {
                FishroomError::RichTextStructure(format!(
                    "run {i} text should be a string, got {}",
                    json_type_name(text_value)
                ))
            })?;
            runs.push((style, text.to_owned()));
        }
        Ok(Some(RichText(runs)))
    }
}
