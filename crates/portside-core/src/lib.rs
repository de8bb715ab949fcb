mod audio;
mod audio_memory;
mod error;
mod registry;
mod script;
mod script_memory;
mod startup;

pub use audio::{AudioHost, DEFAULT_CHIRP_CLIP};
pub use audio_memory::InMemoryAudioHost;
pub use error::{BridgeError, ErrorCode, Result};
pub use registry::{PortBinding, PortRegistry, PORT_PLAY_CHIRP, PORT_PLAY_SOUND};
pub use script::{ScriptHost, ScriptTag, MHCHEM_SCRIPT_SRC, SCRIPT_TYPE_JS};
pub use script_memory::InMemoryScriptHost;
pub use startup::{run_startup, BridgeConfig, InjectPolicy};
