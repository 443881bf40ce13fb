use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{BridgeError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub bus: BusSection,

    #[serde(default)]
    pub rooms: Vec<RoomConfig>,
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::UnsupportedVersion);
        }
        if self.rooms.is_empty() {
            return Err(BridgeError::Config("rooms must not be empty".into()));
        }

        self.bus.validate()?;
        for room in &self.rooms {
            room.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusSection {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for BusSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl BusSection {
    pub fn validate(&self) -> Result<()> {
        if !(16..=65536).contains(&self.capacity) {
            return Err(BridgeError::Config(
                "bus.capacity must be between 16 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_capacity() -> usize {
    256
}

/// One bridged room: a name plus the channel targets it spans.
///
/// `channels` maps a channel kind (`irc`, `telegram`, ...) to the room or
/// group id native to that channel. Kind strings are checked when the
/// room table is compiled into [`crate::config::Bindings`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomConfig {
    pub name: String,

    #[serde(default)]
    pub channels: BTreeMap<String, String>,
}

impl RoomConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(BridgeError::Config("room name must not be empty".into()));
        }
        if self.channels.is_empty() {
            return Err(BridgeError::Config(format!(
                "room {} has no channels",
                self.name
            )));
        }
        for target in self.channels.values() {
            if target.is_empty() {
                return Err(BridgeError::Config(format!(
                    "room {} has an empty channel target",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
