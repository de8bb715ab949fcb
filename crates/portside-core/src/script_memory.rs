use std::sync::Mutex;

use crate::{BridgeError, ErrorCode, Result, ScriptHost, ScriptTag};

/// Recording script host for tests and native harnesses.
#[derive(Debug, Default)]
pub struct InMemoryScriptHost {
    state: Mutex<ScriptState>,
}

#[derive(Debug, Default)]
struct ScriptState {
    injected: Vec<ScriptTag>,
    fail_next: bool,
}

impl InMemoryScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every appended tag recorded so far, in insertion order.
    pub fn injected(&self) -> Vec<ScriptTag> {
        self.state.lock().unwrap().injected.clone()
    }

    pub fn injected_count(&self) -> usize {
        self.state.lock().unwrap().injected.len()
    }

    /// Make the next `inject` call report a failure.
    pub fn fail_next(&self) {
        self.state.lock().unwrap().fail_next = true;
    }
}

impl ScriptHost for InMemoryScriptHost {
    fn inject(&self, tag: &ScriptTag) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next {
            state.fail_next = false;
            return Err(BridgeError::new(
                ErrorCode::Dom,
                format!("cannot append script {}", tag.src),
            ));
        }
        state.injected.push(tag.clone());
        Ok(())
    }

    fn is_injected(&self, src: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .injected
            .iter()
            .any(|tag| tag.src == src)
    }
}
