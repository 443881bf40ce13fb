//! Bridge config loader (strict parsing) and the compiled room table.

pub mod schema;

use std::collections::HashMap;
use std::fs;

use fishroom_core::ChannelType;

use crate::error::{BridgeError, Result};

pub use schema::{BridgeConfig, BusSection, RoomConfig};

pub fn load_from_file(path: &str) -> Result<BridgeConfig> {
    let s = fs::read_to_string(path)?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<BridgeConfig> {
    let cfg: BridgeConfig = serde_yaml::from_str(s)
        .map_err(|e| BridgeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// One (channel kind, native target) endpoint of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub channel: ChannelType,
    pub target: String,
}

/// Compiled room table, immutable after startup.
///
/// Forward direction answers "which endpoints make up this room"; the
/// reverse direction answers "which room does this (channel, target)
/// belong to", which is how inbound messages without an explicit `room`
/// get placed.
#[derive(Debug, Default)]
pub struct Bindings {
    rooms: HashMap<String, Vec<Binding>>,
    by_target: HashMap<ChannelType, HashMap<String, String>>,
}

impl Bindings {
    /// Compile the room table from validated config.
    ///
    /// Rejects unknown channel kinds, duplicate room names, and a
    /// (channel, target) pair claimed by more than one room, since the
    /// reverse lookup must be unambiguous.
    pub fn from_config(cfg: &BridgeConfig) -> Result<Self> {
        let mut rooms: HashMap<String, Vec<Binding>> = HashMap::new();
        let mut by_target: HashMap<ChannelType, HashMap<String, String>> = HashMap::new();

        for room in &cfg.rooms {
            let mut bindings = Vec::with_capacity(room.channels.len());
            for (kind, target) in &room.channels {
                let channel: ChannelType = kind.parse().map_err(|_| {
                    BridgeError::Config(format!(
                        "room {}: unknown channel kind {kind}",
                        room.name
                    ))
                })?;
                let taken = by_target
                    .entry(channel)
                    .or_default()
                    .insert(target.clone(), room.name.clone());
                if let Some(other) = taken {
                    return Err(BridgeError::Config(format!(
                        "{channel} target {target} is bound to both {other} and {}",
                        room.name
                    )));
                }
                bindings.push(Binding {
                    channel,
                    target: target.clone(),
                });
            }
            if rooms.insert(room.name.clone(), bindings).is_some() {
                return Err(BridgeError::Config(format!(
                    "duplicate room name {}",
                    room.name
                )));
            }
        }

        Ok(Self { rooms, by_target })
    }

    pub fn has_room(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Endpoints of a room, ordered by channel kind.
    pub fn peers(&self, room: &str) -> Option<&[Binding]> {
        self.rooms.get(room).map(Vec::as_slice)
    }

    /// Room owning a (channel, target) pair.
    pub fn room_of(&self, channel: ChannelType, target: &str) -> Option<&str> {
        self.by_target
            .get(&channel)?
            .get(target)
            .map(String::as_str)
    }

    pub fn room_names(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// Every channel kind bound in any room, deduplicated.
    pub fn channel_kinds(&self) -> Vec<ChannelType> {
        let mut kinds: Vec<ChannelType> = self
            .rooms
            .values()
            .flatten()
            .map(|binding| binding.channel)
            .collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds.dedup();
        kinds
    }
}
