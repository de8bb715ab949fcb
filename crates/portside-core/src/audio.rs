use crate::Result;

/// Clip played by fixed-clip ports when the notification carries no
/// resource name.
pub const DEFAULT_CHIRP_CLIP: &str = "boing-short.mp3";

/// Starts playback of named audio resources.
///
/// Every call allocates an independent playback handle and returns before
/// playback completes; overlapping calls produce overlapping playback.
/// There is no stop, pause, or completion surface.
pub trait AudioHost: Send + Sync {
    fn play(&self, source: &str) -> Result<()>;
}
