//! Bridge-side error type.
//!
//! Codec failures keep their own taxonomy in `fishroom_core`; this enum
//! adds the concerns that only exist once messages meet config, rooms,
//! and live adapters.

use fishroom_core::FishroomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("config: {0}")]
    Config(String),

    #[error("unsupported config version")]
    UnsupportedVersion,

    #[error("no room bound for {0}")]
    UnknownRoom(String),

    #[error("delivery to {channel} failed: {reason}")]
    Delivery { channel: String, reason: String },

    #[error(transparent)]
    Codec(#[from] FishroomError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
