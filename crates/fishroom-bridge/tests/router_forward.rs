#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fishroom_bridge::bus::MessageBus;
use fishroom_bridge::config::{self, Bindings};
use fishroom_bridge::dispatch::{AdapterRegistry, ChannelAdapter};
use fishroom_bridge::error::{BridgeError, Result};
use fishroom_bridge::router::Router;
use fishroom_core::{ChannelType, Message};

const ROOMS: &str = r##"
version: 1
rooms:
  - name: "lobby"
    channels:
      irc: "#fishroom"
      telegram: "tg_lobby"
      xmpp: "lobby@conference.example.org"
"##;

type Seen = Arc<Mutex<Vec<(ChannelType, String, Message)>>>;

struct RecordingAdapter {
    channel: ChannelType,
    seen: Seen,
}

#[async_trait]
impl ChannelAdapter for RecordingAdapter {
    fn channel(&self) -> ChannelType {
        self.channel
    }

    async fn deliver(&self, target: &str, msg: &Message) -> Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push((self.channel, target.to_owned(), msg.clone()));
        Ok(())
    }
}

struct FailingAdapter {
    channel: ChannelType,
}

#[async_trait]
impl ChannelAdapter for FailingAdapter {
    fn channel(&self) -> ChannelType {
        self.channel
    }

    async fn deliver(&self, _target: &str, _msg: &Message) -> Result<()> {
        Err(BridgeError::Delivery {
            channel: self.channel.as_str().to_owned(),
            reason: "connection down".into(),
        })
    }
}

fn fixture() -> (Router, Seen) {
    let cfg = config::load_from_str(ROOMS).unwrap();
    let bindings = Bindings::from_config(&cfg).unwrap();
    let registry = Arc::new(AdapterRegistry::new());
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [ChannelType::Irc, ChannelType::Telegram, ChannelType::Xmpp] {
        registry.register(Arc::new(RecordingAdapter {
            channel: kind,
            seen: seen.clone(),
        }));
    }
    (Router::new(bindings, registry), seen)
}

#[tokio::test]
async fn fans_out_to_peer_channels_not_origin() {
    let (router, seen) = fixture();
    let msg = Message::new("irc", "alice", "#fishroom", "hello");

    let delivered = router.route(&msg).await.unwrap();
    assert_eq!(delivered, 2);

    let seen = seen.lock().unwrap();
    let mut channels: Vec<ChannelType> = seen.iter().map(|(c, _, _)| *c).collect();
    channels.sort_by_key(|c| c.as_str());
    assert_eq!(channels, [ChannelType::Telegram, ChannelType::Xmpp]);

    let (_, target, relayed) = seen
        .iter()
        .find(|(c, _, _)| *c == ChannelType::Telegram)
        .unwrap();
    assert_eq!(target, "tg_lobby");
    assert_eq!(relayed, &msg);
}

#[tokio::test]
async fn botmsg_is_suppressed() {
    let (router, seen) = fixture();
    let mut msg = Message::new("irc", "fishroom", "#fishroom", "relay notice");
    msg.botmsg = true;

    let delivered = router.route(&msg).await.unwrap();
    assert_eq!(delivered, 0);
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(router.stats().suppressed.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn explicit_room_overrides_reverse_lookup() {
    let (router, seen) = fixture();
    let mut msg = Message::new("api", "poster", "ignored", "announcement");
    msg.room = Some("lobby".into());

    let delivered = router.route(&msg).await.unwrap();
    assert_eq!(delivered, 3);
    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_room_is_unroutable() {
    let (router, seen) = fixture();
    let mut msg = Message::new("irc", "alice", "#fishroom", "hi");
    msg.room = Some("nowhere".into());

    let err = router.route(&msg).await.expect_err("must fail");
    assert!(matches!(err, BridgeError::UnknownRoom(_)), "{err}");
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(router.stats().unroutable.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn sentinel_never_routes() {
    let (router, seen) = fixture();

    let err = router.route(&Message::error_sentinel()).await.expect_err("must fail");
    assert!(matches!(err, BridgeError::UnknownRoom(_)), "{err}");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_delivery_is_counted_not_fatal() {
    let cfg = config::load_from_str(ROOMS).unwrap();
    let bindings = Bindings::from_config(&cfg).unwrap();
    let registry = Arc::new(AdapterRegistry::new());
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    registry.register(Arc::new(FailingAdapter {
        channel: ChannelType::Telegram,
    }));
    registry.register(Arc::new(RecordingAdapter {
        channel: ChannelType::Xmpp,
        seen: seen.clone(),
    }));
    let router = Router::new(bindings, registry);

    let msg = Message::new("irc", "alice", "#fishroom", "hi");
    let delivered = router.route(&msg).await.unwrap();

    assert_eq!(delivered, 1);
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(router.stats().failed.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn bus_roundtrip_reaches_subscriber() {
    let bus = MessageBus::new(16);
    let mut rx = bus.subscribe();

    let msg = Message::new("irc", "alice", "#fishroom", "over the bus");
    let fanned_out = bus.publish(&msg).unwrap();
    assert_eq!(fanned_out, 1);

    assert_eq!(rx.recv().await, Some(msg));
}

#[tokio::test]
async fn bus_folds_garbage_into_sentinel() {
    let bus = MessageBus::new(16);
    let mut rx = bus.subscribe();

    bus.publish_raw("not json".into());

    assert_eq!(rx.recv().await, Some(Message::error_sentinel()));
}

#[tokio::test]
async fn bus_lag_drops_oldest_not_newest() {
    let bus = MessageBus::new(16);
    let mut rx = bus.subscribe();

    // Overflow the capacity-16 ring while the subscriber sits idle.
    for i in 0..40 {
        bus.publish(&Message::new("irc", "alice", "#fishroom", format!("line {i}")))
            .unwrap();
    }
    drop(bus);

    let mut contents = Vec::new();
    while let Some(msg) = rx.recv().await {
        contents.push(msg.content);
    }

    // The lagged subscriber resumes at the retained tail and drains it.
    assert_eq!(contents.len(), 16);
    assert_eq!(contents.first().map(String::as_str), Some("line 24"));
    assert_eq!(contents.last().map(String::as_str), Some("line 39"));
}

#[tokio::test]
async fn run_drains_bus_until_close() {
    let (router, seen) = fixture();
    let bus = MessageBus::new(16);
    let rx = bus.subscribe();

    bus.publish(&Message::new("irc", "alice", "#fishroom", "hi"))
        .unwrap();
    bus.publish_raw("not json".into());
    drop(bus);

    // All senders are gone, so run() drains the backlog and returns.
    router.run(rx).await;

    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(router.stats().delivered.load(Ordering::Relaxed), 2);
    assert_eq!(router.stats().unroutable.load(Ordering::Relaxed), 1);
}
