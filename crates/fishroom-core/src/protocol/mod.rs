//! Interchange codecs (color, style, rich text, message envelope).
//!
//! This module hosts the JSON interchange format spoken between bridge
//! workers and channel adapters:
//! - `color` / `style`: terminal-style attributes carried as compact lists.
//! - `rich_text`: styled text runs paired with their attribute records.
//! - `message`: the envelope every relayed chat line travels in.
//!
//! All decoders are panic-free: malformed input is reported as
//! `FishroomError` instead of panicking or indexing into untrusted values,
//! so a hostile peer cannot take down a relay worker.

pub mod color;
pub mod message;
pub mod rich_text;
pub mod style;

use serde_json::Value;

/// JSON type name for error messages, mirroring the wire-level view of
/// a value rather than any Rust-side type.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
