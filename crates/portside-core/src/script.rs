use serde::{Deserialize, Serialize};

use crate::Result;

/// Versioned mhchem plugin the application loads for chemistry markup
/// rendering.
pub const MHCHEM_SCRIPT_SRC: &str =
    "https://cdn.jsdelivr.net/npm/katex@0.15.3/dist/contrib/mhchem.min.js";

pub const SCRIPT_TYPE_JS: &str = "text/javascript";

/// A script element to append to the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub src: String,
    #[serde(rename = "type", default = "default_script_type")]
    pub script_type: String,
}

impl ScriptTag {
    pub fn external(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            script_type: SCRIPT_TYPE_JS.to_string(),
        }
    }
}

fn default_script_type() -> String {
    SCRIPT_TYPE_JS.to_string()
}

/// Appends script elements to the host document.
///
/// The fetch and execution of an appended script happen asynchronously;
/// implementations do not observe or report their outcome.
pub trait ScriptHost: Send + Sync {
    fn inject(&self, tag: &ScriptTag) -> Result<()>;

    /// Whether a script with this `src` is already attached.
    fn is_injected(&self, src: &str) -> bool;
}
