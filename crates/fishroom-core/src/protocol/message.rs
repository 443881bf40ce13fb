//! Message envelope and its wire codec.
//!
//! Every relayed chat line travels as one JSON object. [`MessageCodec`]
//! offers two decode paths: the error-preserving [`MessageCodec::decode`]
//! family, which reports exactly what was malformed, and the total
//! [`MessageCodec::decode_lossy`] family, which maps any failure to the
//! fixed error sentinel so a relay loop never has to branch on errors.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{FishroomError, Result};
use crate::protocol::json_type_name;
use crate::protocol::rich_text::{RichText, RichTextCodec};

/// Known channel kinds.
///
/// The envelope keeps `channel` as a free-form string (the sentinel uses
/// one outside this set); adapters and config use this enumeration when
/// they need a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Xmpp,
    Irc,
    Telegram,
    Web,
    Api,
}

impl ChannelType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ChannelType::Xmpp => "xmpp",
            ChannelType::Irc => "irc",
            ChannelType::Telegram => "telegram",
            ChannelType::Web => "web",
            ChannelType::Api => "api",
        }
    }
}

impl FromStr for ChannelType {
    type Err = FishroomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xmpp" => Ok(ChannelType::Xmpp),
            "irc" => Ok(ChannelType::Irc),
            "telegram" => Ok(ChannelType::Telegram),
            "web" => Ok(ChannelType::Web),
            "api" => Ok(ChannelType::Api),
            other => Err(FishroomError::EnumConstraint {
                field: "channel",
                value: other.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message kinds carried by the `mtype` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageType {
    #[default]
    Text,
    Photo,
    Sticker,
    Location,
    Audio,
    Video,
    Animation,
    File,
    Event,
    Command,
}

impl MessageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Photo => "photo",
            MessageType::Sticker => "sticker",
            MessageType::Location => "location",
            MessageType::Audio => "audio",
            MessageType::Video => "video",
            MessageType::Animation => "animation",
            MessageType::File => "file",
            MessageType::Event => "event",
            MessageType::Command => "command",
        }
    }

    /// True for kinds whose payload lives behind `media_url`.
    pub const fn is_media(self) -> bool {
        matches!(
            self,
            MessageType::Photo
                | MessageType::Sticker
                | MessageType::Audio
                | MessageType::Video
                | MessageType::Animation
                | MessageType::File
        )
    }
}

impl FromStr for MessageType {
    type Err = FishroomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(MessageType::Text),
            "photo" => Ok(MessageType::Photo),
            "sticker" => Ok(MessageType::Sticker),
            "location" => Ok(MessageType::Location),
            "audio" => Ok(MessageType::Audio),
            "video" => Ok(MessageType::Video),
            "animation" => Ok(MessageType::Animation),
            "file" => Ok(MessageType::File),
            "event" => Ok(MessageType::Event),
            "command" => Ok(MessageType::Command),
            other => Err(FishroomError::EnumConstraint {
                field: "mtype",
                value: other.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One relayed chat message.
///
/// Built by channel adapters, never by the codec layer itself. Fields are
/// public so adapters can fill extras with struct update syntax on top of
/// [`Message::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Which channel this message came from.
    pub channel: String,
    /// Sender name.
    pub sender: String,
    /// Receiver name, usually a group or room id.
    pub receiver: String,
    /// Message kind.
    pub mtype: MessageType,
    /// Media location when `mtype` is a media kind.
    pub media_url: Option<String>,
    /// Plain-text rendering of the message.
    pub content: String,
    /// Styled runs, when the source channel carries formatting.
    pub rich_text: Option<RichText>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// True when the bridge itself produced this message. Adapters must
    /// not re-echo such messages.
    pub botmsg: bool,
    /// Target room, when it differs from `receiver`.
    pub room: Option<String>,
    /// Channel-specific delivery options, opaque to the codec.
    pub opt: Map<String, Value>,
}

impl Message {
    /// Plain text message with every optional field unset.
    pub fn new(
        channel: impl Into<String>,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            sender: sender.into(),
            receiver: receiver.into(),
            mtype: MessageType::Text,
            media_url: None,
            content: content.into(),
            rich_text: None,
            date: None,
            time: None,
            botmsg: false,
            room: None,
            opt: Map::new(),
        }
    }

    /// The fixed message returned by the lossy decode path on any failure.
    pub fn error_sentinel() -> Self {
        Self::new("fishroom", "fishroom", "None", "Error")
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} from: {}, to: {}, {}",
            self.channel, self.mtype, self.sender, self.receiver, self.content
        )
    }
}

/// Codec for the full message envelope.
///
/// Stateless; build one at startup and share it freely across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCodec {
    rich_text: RichTextCodec,
}

impl MessageCodec {
    pub const fn new() -> Self {
        Self {
            rich_text: RichTextCodec::new(),
        }
    }

    /// Encode a message to wire text.
    ///
    /// Optional fields that are unset are omitted from the output; the
    /// always-meaningful `botmsg` and `opt` are always present.
    pub fn encode(&self, msg: &Message) -> Result<String> {
        let mut record = Map::new();
        record.insert("channel".into(), Value::String(msg.channel.clone()));
        record.insert("sender".into(), Value::String(msg.sender.clone()));
        record.insert("receiver".into(), Value::String(msg.receiver.clone()));
        record.insert("mtype".into(), Value::String(msg.mtype.as_str().into()));
        record.insert("content".into(), Value::String(msg.content.clone()));
        if let Some(url) = &msg.media_url {
            record.insert("media_url".into(), Value::String(url.clone()));
        }
        if msg.rich_text.is_some() {
            record.insert("rich_text".into(), self.rich_text.encode(msg.rich_text.as_ref()));
        }
        if let Some(date) = &msg.date {
            record.insert("date".into(), Value::String(date.clone()));
        }
        if let Some(time) = &msg.time {
            record.insert("time".into(), Value::String(time.clone()));
        }
        record.insert("botmsg".into(), Value::Bool(msg.botmsg));
        if let Some(room) = &msg.room {
            record.insert("room".into(), Value::String(room.clone()));
        }
        record.insert("opt".into(), Value::Object(msg.opt.clone()));
        serde_json::to_string(&Value::Object(record))
            .map_err(|e| FishroomError::Payload(e.to_string()))
    }

    /// Decode wire text, reporting exactly what was malformed.
    pub fn decode(&self, wire: &str) -> Result<Message> {
        let value: Value =
            serde_json::from_str(wire).map_err(|e| FishroomError::Payload(e.to_string()))?;
        self.decode_value(&value)
    }

    /// Decode wire bytes (UTF-8 JSON).
    pub fn decode_slice(&self, wire: &[u8]) -> Result<Message> {
        let value: Value =
            serde_json::from_slice(wire).map_err(|e| FishroomError::Payload(e.to_string()))?;
        self.decode_value(&value)
    }

    /// Decode an already-parsed JSON value.
    ///
    /// Unknown keys are ignored; explicit `null` counts as absent. Absent
    /// `mtype` defaults to text, absent `botmsg` to false, absent `opt`
    /// to empty.
    pub fn decode_value(&self, value: &Value) -> Result<Message> {
        let record = value.as_object().ok_or_else(|| {
            FishroomError::Payload(format!(
                "expected a message object, got {}",
                json_type_name(value)
            ))
        })?;
        let mtype = match field(record, "mtype") {
            None => MessageType::default(),
            Some(v) => v
                .as_str()
                .ok_or(FishroomError::FieldType {
                    field: "mtype",
                    expected: "string",
                })?
                .parse()?,
        };
        let rich_text = match field(record, "rich_text") {
            None => None,
            Some(v) => self.rich_text.decode(v)?,
        };
        let botmsg = match field(record, "botmsg") {
            None => false,
            Some(v) => v.as_bool().ok_or(FishroomError::FieldType {
                field: "botmsg",
                expected: "boolean",
            })?,
        };
        let opt = match field(record, "opt") {
            None => Map::new(),
            Some(v) => v
                .as_object()
                .cloned()
                .ok_or(FishroomError::FieldType {
                    field: "opt",
                    expected: "object",
                })?,
        };
        Ok(Message {
            channel: req_string(record, "channel")?,
            sender: req_string(record, "sender")?,
            receiver: req_string(record, "receiver")?,
            mtype,
            media_url: opt_string(record, "media_url")?,
            content: req_string(record, "content")?,
            rich_text,
            date: opt_string(record, "date")?,
            time: opt_string(record, "time")?,
            botmsg,
            room: opt_string(record, "room")?,
            opt,
        })
    }

    /// Total decode: any failure becomes [`Message::error_sentinel`].
    ///
    /// The error kind is logged before being discarded, since the sentinel
    /// itself carries no trace of what went wrong.
    pub fn decode_lossy(&self, wire: &str) -> Message {
        self.decode(wire).unwrap_or_else(|e| {
            tracing::debug!(kind = e.kind().as_str(), error = %e, "replacing undecodable message with sentinel");
            Message::error_sentinel()
        })
    }

    /// Total decode over raw bytes.
    pub fn decode_slice_lossy(&self, wire: &[u8]) -> Message {
        self.decode_slice(wire).unwrap_or_else(|e| {
            tracing::debug!(kind = e.kind().as_str(), error = %e, "replacing undecodable message with sentinel");
            Message::error_sentinel()
        })
    }
}

/// Field lookup that treats explicit `null` as absent.
fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn req_string(record: &Map<String, Value>, key: &'static str) -> Result<String> {
    field(record, key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(FishroomError::FieldType {
            field: key,
            expected: "string",
        })
}

fn opt_string(record: &Map<String, Value>, key: &'static str) -> Result<Option<String>> {
    match field(record, key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_owned()))
            .ok_or(FishroomError::FieldType {
                field: key,
                expected: "string",
            }),
    }
}
