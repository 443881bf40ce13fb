//! In-process message bus.
//!
//! Adapters publish wire-format envelopes onto a bounded broadcast
//! channel; every subscriber sees every message. Payloads travel as
//! `Bytes` so fan-out to many subscribers never copies the wire text.

use bytes::Bytes;
use tokio::sync::broadcast;

use fishroom_core::{Message, MessageCodec};

use crate::error::Result;

pub struct MessageBus {
    codec: MessageCodec,
    tx: broadcast::Sender<Bytes>,
}

impl MessageBus {
    /// Bus with room for `capacity` in-flight messages per subscriber.
    /// Slow subscribers that fall further behind lose the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            codec: MessageCodec::new(),
            tx,
        }
    }

    pub fn codec(&self) -> &MessageCodec {
        &self.codec
    }

    /// Encode and publish one message. Returns the subscriber count the
    /// message was fanned out to.
    pub fn publish(&self, msg: &Message) -> Result<usize> {
        let wire = self.codec.encode(msg)?;
        Ok(self.publish_raw(Bytes::from(wire)))
    }

    /// Publish already-encoded wire bytes, unvalidated. Subscribers fold
    /// anything undecodable into the error sentinel on their side.
    pub fn publish_raw(&self, wire: Bytes) -> usize {
        self.tx.send(wire).unwrap_or(0)
    }

    pub fn subscribe(&self) -> BusReceiver {
        BusReceiver {
            codec: self.codec,
            rx: self.tx.subscribe(),
        }
    }
}

/// One subscriber's view of the bus.
pub struct BusReceiver {
    codec: MessageCodec,
    rx: broadcast::Receiver<Bytes>,
}

impl BusReceiver {
    /// Next message from the bus, or `None` once the bus is closed and
    /// drained. Undecodable payloads come out as the error sentinel, and
    /// lag (dropped backlog) is logged rather than surfaced.
    pub async fn recv(&mut self) -> Option<Message> {
        loop {
            match self.rx.recv().await {
                Ok(wire) => return Some(self.codec.decode_slice_lossy(&wire)),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "bus subscriber lagged, dropping backlog");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
