use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sampling::domain::extraction_result::ExtractionResult;
use crate::sampling::domain::frame_name::frame_path;
use crate::sampling::domain::sampling_plan::SamplingPlan;
use crate::shared::constants::DEFAULT_IMAGE_EXTENSION;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not open video file {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
    #[error("no frames could be extracted from {path}")]
    NoFramesExtracted { path: PathBuf },
    #[error("failed to write frame {path}: {source}")]
    WriteFrame {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

/// Progress callback: `(frames_written, expected_total)`.
/// `expected_total` is `None` when neither a frame limit nor a frame count
/// is known.
pub type ProgressFn = Box<dyn Fn(usize, Option<usize>) + Send>;

/// Samples evenly spaced frames from a video and writes them as a numbered
/// image sequence.
///
/// Frames are decoded strictly in order and written one at a time as
/// `frame_000000.jpg`, `frame_000001.jpg`, ... with no gaps. Running twice
/// into the same directory overwrites files by name; leftovers from a longer
/// earlier run are not removed.
pub struct ExtractFramesUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    source: PathBuf,
    output_dir: PathBuf,
    extension: String,
    on_progress: Option<ProgressFn>,
}

impl ExtractFramesUseCase {
    /// Creates the output directory (and parents) if needed. The video is
    /// not opened until [`execute`](Self::execute).
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        on_progress: Option<ProgressFn>,
    ) -> Result<Self, ExtractionError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| ExtractionError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        Ok(Self {
            reader,
            image_writer,
            source: source.into(),
            output_dir,
            extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            on_progress,
        })
    }

    /// Image format for written frames, by file extension (default `jpg`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs one extraction pass.
    ///
    /// - `max_frames <= 0`: no limit.
    /// - `target_fps <= 0`: keep every source frame.
    ///
    /// Succeeds only if at least one frame was written. The video is closed
    /// before this returns on every path.
    pub fn execute(
        &mut self,
        max_frames: i64,
        target_fps: f64,
    ) -> Result<ExtractionResult, ExtractionError> {
        let metadata =
            self.reader
                .open(&self.source)
                .map_err(|source| ExtractionError::SourceUnavailable {
                    path: self.source.clone(),
                    source,
                })?;
        let mut session = OpenSession {
            reader: self.reader.as_mut(),
        };

        let plan = SamplingPlan::new(max_frames, target_fps, metadata.fps);
        let expected_total = metadata
            .known_total_frames()
            .map(|n| plan.expected_count(n))
            .or(plan.limit());

        log::info!("Video FPS: {:.3}", metadata.fps);
        match metadata.known_total_frames() {
            Some(n) => log::info!("Total frames: {n} (approximate)"),
            None => log::info!("Total frames: unknown"),
        }
        log::info!(
            "Sampling every {} frame(s), limit {}",
            plan.stride(),
            plan.limit()
                .map_or_else(|| "none".to_string(), |n| n.to_string())
        );

        let mut frame_paths: Vec<PathBuf> = Vec::new();
        let mut frames_scanned = 0;

        for (source_index, frame) in session.reader.frames().enumerate() {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Decoding stopped at source frame {source_index}: {e}");
                    break;
                }
            };
            frames_scanned = source_index + 1;

            if !plan.selects(source_index) {
                continue;
            }

            let path = frame_path(&self.output_dir, frame_paths.len(), &self.extension);
            self.image_writer
                .write(&path, &frame)
                .map_err(|source| ExtractionError::WriteFrame {
                    path: path.clone(),
                    source,
                })?;
            log::debug!(
                "Wrote {} (source frame {source_index})",
                path.display()
            );
            frame_paths.push(path);

            if let Some(ref callback) = self.on_progress {
                callback(frame_paths.len(), expected_total);
            }

            if plan.is_satisfied(frame_paths.len()) {
                break;
            }
        }

        drop(session);
        log::info!("Extracted {} frames", frame_paths.len());

        if frame_paths.is_empty() {
            return Err(ExtractionError::NoFramesExtracted {
                path: self.source.clone(),
            });
        }

        Ok(ExtractionResult {
            frame_paths,
            plan,
            metadata,
            frames_scanned,
        })
    }
}

/// Closes the reader when dropped, so early returns cannot leak the open
/// video handle.
struct OpenSession<'a> {
    reader: &'a mut dyn VideoReader,
}

impl Drop for OpenSession<'_> {
    fn drop(&mut self) {
        self.reader.close();
    }
}
