use std::path::PathBuf;

/// Stream properties reported when a source is opened.
///
/// `total_frames` comes from container metadata and may be 0 or inexact;
/// it is only ever used for progress display.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Frame count if the container reported one.
    pub fn known_total_frames(&self) -> Option<usize> {
        (self.total_frames > 0).then_some(self.total_frames)
    }
}
