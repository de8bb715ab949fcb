use std::sync::Arc;

use portside_core::{AudioHost, PortRegistry};

#[cfg(feature = "web")]
mod web_bridge;

#[cfg(feature = "web")]
pub use web_bridge::{WebAudioHost, WebBridge, WebScriptHost};

/// Construct the stock port registry over a host-provided audio adapter.
pub fn default_registry(audio: Arc<dyn AudioHost>) -> PortRegistry {
    PortRegistry::with_default_ports(audio)
}
