#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fishroom_bridge::config::{self, Bindings};
use fishroom_bridge::error::BridgeError;
use fishroom_core::ChannelType;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r##"
version: 1
rooms:
  - name: "lobby"
    chanels: { irc: "#fishroom" } # typo should fail
"##;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)), "{err}");
}

#[test]
fn ok_minimal_config() {
    let ok = r##"
version: 1
rooms:
  - name: "lobby"
    channels:
      irc: "#fishroom"
      telegram: "tg_lobby"
"##;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.bus.capacity, 256);
    assert_eq!(cfg.rooms[0].name, "lobby");
}

#[test]
fn version_must_be_one() {
    let bad = r##"
version: 2
rooms:
  - name: "lobby"
    channels: { irc: "#fishroom" }
"##;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, BridgeError::UnsupportedVersion), "{err}");
}

#[test]
fn rooms_must_not_be_empty() {
    let bad = "version: 1\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)), "{err}");
}

#[test]
fn bus_capacity_range_checked() {
    let bad = r##"
version: 1
bus:
  capacity: 4
rooms:
  - name: "lobby"
    channels: { irc: "#fishroom" }
"##;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)), "{err}");
}

#[test]
fn bindings_compile_both_directions() {
    let src = r##"
version: 1
rooms:
  - name: "lobby"
    channels:
      irc: "#fishroom"
      telegram: "tg_lobby"
  - name: "dev"
    channels:
      irc: "#fishroom-dev"
"##;
    let cfg = config::load_from_str(src).unwrap();
    let bindings = Bindings::from_config(&cfg).unwrap();

    assert!(bindings.has_room("lobby"));
    assert_eq!(bindings.peers("lobby").unwrap().len(), 2);
    assert_eq!(bindings.room_of(ChannelType::Irc, "#fishroom-dev"), Some("dev"));
    assert_eq!(bindings.room_of(ChannelType::Telegram, "nowhere"), None);
    assert_eq!(
        bindings.channel_kinds(),
        [ChannelType::Irc, ChannelType::Telegram]
    );
}

#[test]
fn bindings_reject_unknown_channel_kind() {
    let src = r##"
version: 1
rooms:
  - name: "lobby"
    channels:
      pigeon: "coop"
"##;
    let cfg = config::load_from_str(src).unwrap();
    let err = Bindings::from_config(&cfg).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)), "{err}");
}

#[test]
fn bindings_reject_ambiguous_target() {
    let src = r##"
version: 1
rooms:
  - name: "lobby"
    channels:
      irc: "#fishroom"
  - name: "dev"
    channels:
      irc: "#fishroom"
"##;
    let cfg = config::load_from_str(src).unwrap();
    let err = Bindings::from_config(&cfg).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)), "{err}");
}
