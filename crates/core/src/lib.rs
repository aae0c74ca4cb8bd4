//! Video-to-point-cloud pipeline: sample frames from a video, then drive
//! COLMAP over the sampled images.

pub mod pipeline;
pub mod reconstruction;
pub mod sampling;
pub mod shared;
pub mod video;
