use async_trait::async_trait;

use fishroom_core::{ChannelType, Message};

use crate::dispatch::ChannelAdapter;
use crate::error::Result;

/// Log-only adapter. Useful to prove routing without any network endpoint:
/// every delivery shows up as one `info` line.
pub struct EchoAdapter {
    channel: ChannelType,
}

impl EchoAdapter {
    pub fn new(channel: ChannelType) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ChannelAdapter for EchoAdapter {
    fn channel(&self) -> ChannelType {
        self.channel
    }

    async fn deliver(&self, target: &str, msg: &Message) -> Result<()> {
        tracing::info!(channel = %self.channel, target, %msg, "deliver");
        Ok(())
    }
}
