use serde::{Deserialize, Serialize};

use crate::{BridgeError, ErrorCode, Result, ScriptHost, ScriptTag, MHCHEM_SCRIPT_SRC};

/// Whether startup may attach the same vendor script more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectPolicy {
    /// Append unconditionally; a repeated startup duplicates the tag.
    Always,
    /// Skip scripts whose `src` is already attached.
    Once,
}

impl Default for InjectPolicy {
    fn default() -> Self {
        InjectPolicy::Always
    }
}

/// Startup-phase configuration for the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    pub vendor_scripts: Vec<ScriptTag>,
    pub script_policy: InjectPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            vendor_scripts: vec![ScriptTag::external(MHCHEM_SCRIPT_SRC)],
            script_policy: InjectPolicy::default(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            BridgeError::new(
                ErrorCode::InvalidInput,
                format!("invalid bridge config: {}", err),
            )
        })
    }
}

/// Run the startup phase: attach every configured vendor script.
///
/// This is an explicit call rather than a module-load side effect, so
/// initialization order stays deterministic. Per-tag failures are not
/// reported; the application never observes the outcome of script loading.
pub fn run_startup(script: &dyn ScriptHost, config: &BridgeConfig) {
    for tag in &config.vendor_scripts {
        if config.script_policy == InjectPolicy::Once && script.is_injected(&tag.src) {
            continue;
        }
        let _ = script.inject(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::{run_startup, BridgeConfig, InjectPolicy};
    use crate::{ErrorCode, InMemoryScriptHost, ScriptTag, MHCHEM_SCRIPT_SRC, SCRIPT_TYPE_JS};

    #[test]
    fn default_startup_attaches_versioned_vendor_script() {
        let script = InMemoryScriptHost::new();
        run_startup(&script, &BridgeConfig::default());
        let injected = script.injected();
        assert_eq!(injected.len(), 1);
        assert_eq!(injected[0].src, MHCHEM_SCRIPT_SRC);
        assert_eq!(injected[0].script_type, SCRIPT_TYPE_JS);
    }

    #[test]
    fn repeated_startup_duplicates_under_always() {
        let script = InMemoryScriptHost::new();
        let config = BridgeConfig::default();
        run_startup(&script, &config);
        run_startup(&script, &config);
        assert_eq!(script.injected_count(), 2);
    }

    #[test]
    fn repeated_startup_skips_under_once() {
        let script = InMemoryScriptHost::new();
        let config = BridgeConfig {
            script_policy: InjectPolicy::Once,
            ..BridgeConfig::default()
        };
        run_startup(&script, &config);
        run_startup(&script, &config);
        assert_eq!(script.injected_count(), 1);
    }

    #[test]
    fn injection_failure_is_silent() {
        let script = InMemoryScriptHost::new();
        script.fail_next();
        run_startup(&script, &BridgeConfig::default());
        assert_eq!(script.injected_count(), 0);
        run_startup(&script, &BridgeConfig::default());
        assert_eq!(script.injected_count(), 1);
    }

    #[test]
    fn config_parses_from_json() {
        let config = BridgeConfig::from_json(
            r#"{
                "vendorScripts": [{"src": "https://cdn.example/lib.js"}],
                "scriptPolicy": "once"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.vendor_scripts,
            vec![ScriptTag::external("https://cdn.example/lib.js")]
        );
        assert_eq!(config.script_policy, InjectPolicy::Once);
    }

    #[test]
    fn malformed_config_reports_invalid_input() {
        let err = BridgeConfig::from_json("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
