use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{AudioHost, DEFAULT_CHIRP_CLIP};

/// Port the application uses to request playback of a named resource.
pub const PORT_PLAY_SOUND: &str = "playSound";
/// Port the application uses to request the fixed notification chirp.
pub const PORT_PLAY_CHIRP: &str = "playChirp";

/// How a bound port turns a notification into a playback start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortBinding {
    /// The notification payload names the resource to play.
    NamedResource,
    /// The payload is ignored and the fixed clip plays.
    FixedClip(String),
}

/// Routes outbound application notifications to the audio adapter.
///
/// Dispatch is fire-and-forget: nothing is reported back to the
/// application, whatever the payload shape or the host outcome. Each
/// notification starts at most one independent playback; rapid
/// notifications are neither queued nor deduplicated.
pub struct PortRegistry {
    audio: Arc<dyn AudioHost>,
    bindings: BTreeMap<String, PortBinding>,
}

impl PortRegistry {
    pub fn new(audio: Arc<dyn AudioHost>) -> Self {
        Self {
            audio,
            bindings: BTreeMap::new(),
        }
    }

    /// Registry with the stock application ports bound.
    pub fn with_default_ports(audio: Arc<dyn AudioHost>) -> Self {
        let mut registry = Self::new(audio);
        registry.bind_sound(PORT_PLAY_SOUND);
        registry.bind_fixed_clip(PORT_PLAY_CHIRP, DEFAULT_CHIRP_CLIP);
        registry
    }

    /// Bind a channel whose payload names the resource to play.
    pub fn bind_sound(&mut self, port: &str) {
        self.bindings
            .insert(port.to_string(), PortBinding::NamedResource);
    }

    /// Bind a channel that always plays `clip`, payload or not.
    pub fn bind_fixed_clip(&mut self, port: &str, clip: &str) {
        self.bindings
            .insert(port.to_string(), PortBinding::FixedClip(clip.to_string()));
    }

    pub fn port_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn binding(&self, port: &str) -> Option<&PortBinding> {
        self.bindings.get(port)
    }

    /// Handle one notification.
    ///
    /// Unknown ports, absent or empty payloads on named-resource ports,
    /// and host failures are all swallowed.
    pub fn dispatch(&self, port: &str, payload: Option<&str>) {
        let Some(binding) = self.bindings.get(port) else {
            return;
        };
        let source = match binding {
            PortBinding::FixedClip(clip) => clip.as_str(),
            PortBinding::NamedResource => match payload {
                Some(name) if !name.is_empty() => name,
                _ => return,
            },
        };
        let _ = self.audio.play(source);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{PortBinding, PortRegistry, PORT_PLAY_CHIRP, PORT_PLAY_SOUND};
    use crate::{InMemoryAudioHost, DEFAULT_CHIRP_CLIP};

    fn registry() -> (Arc<InMemoryAudioHost>, PortRegistry) {
        let audio = Arc::new(InMemoryAudioHost::new());
        let registry = PortRegistry::with_default_ports(audio.clone());
        (audio, registry)
    }

    #[test]
    fn named_port_plays_payload_resource() {
        let (audio, registry) = registry();
        registry.dispatch(PORT_PLAY_SOUND, Some("win.mp3"));
        assert_eq!(audio.started(), vec!["win.mp3"]);
    }

    #[test]
    fn fixed_clip_port_ignores_payload() {
        let (audio, registry) = registry();
        registry.dispatch(PORT_PLAY_CHIRP, None);
        registry.dispatch(PORT_PLAY_CHIRP, Some("ignored.mp3"));
        assert_eq!(audio.started(), vec![DEFAULT_CHIRP_CLIP, DEFAULT_CHIRP_CLIP]);
    }

    #[test]
    fn rapid_dispatches_start_independent_playbacks() {
        let (audio, registry) = registry();
        for _ in 0..5 {
            registry.dispatch(PORT_PLAY_SOUND, Some("tick.mp3"));
        }
        assert_eq!(audio.start_count(), 5);
    }

    #[test]
    fn unknown_port_is_ignored() {
        let (audio, registry) = registry();
        registry.dispatch("openWindow", Some("anything"));
        assert_eq!(audio.start_count(), 0);
    }

    #[test]
    fn named_port_without_payload_is_ignored() {
        let (audio, registry) = registry();
        registry.dispatch(PORT_PLAY_SOUND, None);
        registry.dispatch(PORT_PLAY_SOUND, Some(""));
        assert_eq!(audio.start_count(), 0);
    }

    #[test]
    fn host_failure_never_reaches_the_caller() {
        let (audio, registry) = registry();
        audio.fail_next();
        registry.dispatch(PORT_PLAY_SOUND, Some("broken.ogg"));
        registry.dispatch(PORT_PLAY_SOUND, Some("next.mp3"));
        assert_eq!(audio.started(), vec!["next.mp3"]);
    }

    #[test]
    fn extra_variant_ports_can_be_bound() {
        let audio = Arc::new(InMemoryAudioHost::new());
        let mut registry = PortRegistry::with_default_ports(audio.clone());
        registry.bind_fixed_clip("playChime", "chime.mp3");
        assert_eq!(
            registry.binding("playChime"),
            Some(&PortBinding::FixedClip("chime.mp3".to_string()))
        );
        registry.dispatch("playChime", None);
        assert_eq!(audio.started(), vec!["chime.mp3"]);
    }
}
