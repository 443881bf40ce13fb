//! Fan-out of bus messages to bound channel adapters.
//!
//! One router instance drains one bus subscription. Per message: suppress
//! bridge-originated echoes, resolve the room, then deliver concurrently
//! to every bound endpoint except the one the message came from.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;

use fishroom_core::{ChannelType, Message};

use crate::bus::BusReceiver;
use crate::config::Bindings;
use crate::dispatch::AdapterRegistry;
use crate::error::{BridgeError, Result};

/// Routing counters, shared-safe and updated relaxed.
#[derive(Debug, Default)]
pub struct RouterStats {
    pub delivered: AtomicU64,
    pub suppressed: AtomicU64,
    pub unroutable: AtomicU64,
    pub failed: AtomicU64,
}

pub struct Router {
    bindings: Bindings,
    adapters: Arc<AdapterRegistry>,
    stats: RouterStats,
}

impl Router {
    pub fn new(bindings: Bindings, adapters: Arc<AdapterRegistry>) -> Self {
        Self {
            bindings,
            adapters,
            stats: RouterStats::default(),
        }
    }

    pub fn stats(&self) -> &RouterStats {
        &self.stats
    }

    /// Route one message. Returns the number of successful deliveries;
    /// failed endpoints are logged and counted, not fatal.
    pub async fn route(&self, msg: &Message) -> Result<usize> {
        if msg.botmsg {
            self.stats.suppressed.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%msg, "suppressing bridge-originated message");
            return Ok(0);
        }

        let Some(room) = self.resolve_room(msg) else {
            self.stats.unroutable.fetch_add(1, Ordering::Relaxed);
            return Err(BridgeError::UnknownRoom(format!(
                "{} / {}",
                msg.channel, msg.receiver
            )));
        };

        let mut deliveries = FuturesUnordered::new();
        for binding in self.bindings.peers(&room).unwrap_or_default() {
            // Never echo back into the source channel.
            if msg.channel == binding.channel.as_str() {
                continue;
            }
            let Some(adapter) = self.adapters.get(binding.channel) else {
                tracing::debug!(channel = %binding.channel, "no adapter registered, skipping");
                continue;
            };
            let target = binding.target.clone();
            deliveries.push(async move {
                let res = adapter.deliver(&target, msg).await;
                (binding.channel, target, res)
            });
        }

        let mut delivered = 0usize;
        while let Some((channel, target, res)) = deliveries.next().await {
            match res {
                Ok(()) => {
                    delivered += 1;
                    self.stats.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.stats.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(%channel, target, error = %e, "delivery failed");
                }
            }
        }
        tracing::debug!(room, delivered, %msg, "routed");
        Ok(delivered)
    }

    /// Drain the bus until it closes. Unroutable messages (the error
    /// sentinel included) are logged and dropped.
    pub async fn run(&self, mut rx: BusReceiver) {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = self.route(&msg).await {
                tracing::debug!(error = %e, %msg, "message not routed");
            }
        }
        tracing::info!(
            delivered = self.stats.delivered.load(Ordering::Relaxed),
            suppressed = self.stats.suppressed.load(Ordering::Relaxed),
            unroutable = self.stats.unroutable.load(Ordering::Relaxed),
            failed = self.stats.failed.load(Ordering::Relaxed),
            "bus closed, router stopping"
        );
    }

    /// A message either names its room directly or is placed by the
    /// (channel, receiver) pair its source adapter stamped on it.
    fn resolve_room(&self, msg: &Message) -> Option<String> {
        if let Some(room) = &msg.room {
            return self.bindings.has_room(room).then(|| room.clone());
        }
        let channel: ChannelType = msg.channel.parse().ok()?;
        self.bindings
            .room_of(channel, &msg.receiver)
            .map(str::to_owned)
    }
}
