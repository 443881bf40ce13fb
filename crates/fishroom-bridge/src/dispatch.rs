//! Channel adapter seam and registry.
//!
//! Concrete endpoints (an IRC client, a Telegram bot, a web session pool)
//! live outside this crate and plug in through [`ChannelAdapter`]. The
//! registry is keyed by channel kind: one live adapter per kind.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use fishroom_core::{ChannelType, Message};

use crate::error::Result;

#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Which channel kind this adapter serves.
    fn channel(&self) -> ChannelType;

    /// Deliver one message to `target`, a room or group id native to the
    /// channel. Implementations must not feed `botmsg` messages back onto
    /// the bus.
    async fn deliver(&self, target: &str, msg: &Message) -> Result<()>;
}

#[derive(Default)]
pub struct AdapterRegistry {
    adapters: DashMap<ChannelType, Arc<dyn ChannelAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: DashMap::new(),
        }
    }

    /// Register an adapter, replacing any previous one for its kind.
    pub fn register(&self, adapter: Arc<dyn ChannelAdapter>) {
        self.adapters.insert(adapter.channel(), adapter);
    }

    pub fn get(&self, channel: ChannelType) -> Option<Arc<dyn ChannelAdapter>> {
        self.adapters.get(&channel).map(|e| e.value().clone())
    }

    pub fn registered(&self) -> Vec<ChannelType> {
        self.adapters.iter().map(|e| *e.key()).collect()
    }
}
