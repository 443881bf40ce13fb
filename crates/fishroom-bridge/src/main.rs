//! fishroom bridge (pipe mode).
//!
//! Reads wire-format messages from stdin, one JSON object per line, and
//! routes each to every bound peer channel through log-only echo
//! adapters. Real endpoints embed the library instead; this binary is
//! the local relay loop for demos and smoke testing.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use fishroom_bridge::adapters::EchoAdapter;
use fishroom_bridge::bus::MessageBus;
use fishroom_bridge::config::{self, Bindings};
use fishroom_bridge::dispatch::AdapterRegistry;
use fishroom_bridge::router::Router;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fishroom.yaml".into());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let bindings = Bindings::from_config(&cfg).expect("room table invalid");

    let registry = Arc::new(AdapterRegistry::new());
    for kind in bindings.channel_kinds() {
        registry.register(Arc::new(EchoAdapter::new(kind)));
    }

    let bus = MessageBus::new(cfg.bus.capacity);
    let router = Router::new(bindings, registry);

    tracing::info!(config = %path, "fishroom bridge starting");

    let rx = bus.subscribe();
    let relay = tokio::spawn(async move { router.run(rx).await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        bus.publish_raw(line.into());
    }

    // Closing the bus lets the router drain and report its counters.
    drop(bus);
    let _ = relay.await;
}
