use std::path::PathBuf;

use crate::sampling::domain::sampling_plan::SamplingPlan;
use crate::shared::video_metadata::VideoMetadata;

/// Outcome of one successful extraction run.
///
/// `frame_paths` is ordered by sequence number, which is also source order.
/// Only produced when at least one frame was written.
#[derive(Clone, Debug)]
pub struct ExtractionResult {
    pub frame_paths: Vec<PathBuf>,
    pub plan: SamplingPlan,
    pub metadata: VideoMetadata,
    /// Number of source frames decoded before extraction stopped.
    pub frames_scanned: usize,
}

impl ExtractionResult {
    pub fn frame_count(&self) -> usize {
        self.frame_paths.len()
    }
}
