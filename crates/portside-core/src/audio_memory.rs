use std::sync::Mutex;

use crate::{AudioHost, BridgeError, ErrorCode, Result};

/// Recording audio host for tests and native harnesses.
#[derive(Debug, Default)]
pub struct InMemoryAudioHost {
    state: Mutex<AudioState>,
}

#[derive(Debug, Default)]
struct AudioState {
    started: Vec<String>,
    fail_next: bool,
}

impl InMemoryAudioHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every playback start recorded so far, in dispatch order.
    pub fn started(&self) -> Vec<String> {
        self.state.lock().unwrap().started.clone()
    }

    pub fn start_count(&self) -> usize {
        self.state.lock().unwrap().started.len()
    }

    /// Make the next `play` call report a failure.
    pub fn fail_next(&self) {
        self.state.lock().unwrap().fail_next = true;
    }
}

impl AudioHost for InMemoryAudioHost {
    fn play(&self, source: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_next {
            state.fail_next = false;
            return Err(BridgeError::new(
                ErrorCode::NotSupported,
                format!("cannot start playback of {}", source),
            ));
        }
        state.started.push(source.to_string());
        Ok(())
    }
}
