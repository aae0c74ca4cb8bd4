use std::path::PathBuf;
use std::process;

use clap::Parser;

use vid2cloud_core::pipeline::extract_frames_use_case::{ExtractFramesUseCase, ProgressFn};
use vid2cloud_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use vid2cloud_core::pipeline::reconstruct_use_case::ReconstructUseCase;
use vid2cloud_core::reconstruction::domain::workspace::{
    ReconstructionWorkspace, WorkspaceState,
};
use vid2cloud_core::reconstruction::infrastructure::colmap_runner::ColmapRunner;
use vid2cloud_core::sampling::domain::extraction_result::ExtractionResult;
use vid2cloud_core::shared::constants::{
    COLMAP_PROGRAM, DEFAULT_FRAMES_DIR, DEFAULT_FRAME_RATE, DEFAULT_MAX_FRAMES,
    DEFAULT_OUTPUT_DIR,
};
use vid2cloud_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use vid2cloud_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Sample frames from a video and reconstruct a 3D point cloud with COLMAP.
#[derive(Parser, Debug)]
#[command(name = "vid2cloud", allow_negative_numbers = true)]
struct Cli {
    /// Input video file.
    video_path: PathBuf,

    /// Maximum number of frames to extract (0 or negative = no limit).
    #[arg(default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: i64,

    /// Frames per second to sample (0 or negative = every frame).
    #[arg(default_value_t = DEFAULT_FRAME_RATE)]
    frame_rate: f64,

    /// Directory for the extracted frame images.
    #[arg(long, default_value = DEFAULT_FRAMES_DIR)]
    frames_dir: PathBuf,

    /// Directory for the COLMAP database, sparse and dense models.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// COLMAP executable (name on PATH or full path).
    #[arg(long, default_value = COLMAP_PROGRAM)]
    colmap: PathBuf,

    /// Stop after extracting frames.
    #[arg(long)]
    extract_only: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    log::info!("Video to 3D Reconstruction Pipeline");
    log::info!("===================================");

    log::info!("Step 1: Extracting frames from video");
    let extraction = run_extraction(&cli)
        .map_err(|e| format!("Failed to extract frames from video: {e}"))?;
    log::info!(
        "Wrote {} frames to {}",
        extraction.frame_count(),
        cli.frames_dir.display()
    );

    if cli.extract_only {
        return Ok(());
    }

    log::info!("Step 2: Running COLMAP reconstruction pipeline");
    let state =
        run_reconstruction(&cli).map_err(|e| format!("COLMAP reconstruction failed: {e}"))?;
    report(&state);

    Ok(())
}

fn run_extraction(cli: &Cli) -> Result<ExtractionResult, Box<dyn std::error::Error>> {
    let progress: ProgressFn = Box::new(|current, total| match total {
        Some(total) => eprint!("\rExtracted frame {current}/{total}"),
        None => eprint!("\rExtracted frame {current}/all"),
    });

    let mut use_case = ExtractFramesUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(ImageFileWriter::new()),
        &cli.video_path,
        &cli.frames_dir,
        Some(progress),
    )?;
    let result = use_case.execute(cli.max_frames, cli.frame_rate);
    eprintln!();
    Ok(result?)
}

fn run_reconstruction(cli: &Cli) -> Result<WorkspaceState, Box<dyn std::error::Error>> {
    let workspace = ReconstructionWorkspace::new(&cli.frames_dir, &cli.output_dir);
    let mut use_case = ReconstructUseCase::new(
        Box::new(ColmapRunner::new(&cli.colmap)),
        Box::new(StdoutPipelineLogger::new()),
    );
    Ok(use_case.execute(&workspace)?)
}

fn report(state: &WorkspaceState) {
    match state {
        WorkspaceState::Fused { point_cloud } => {
            log::info!("Reconstruction complete!");
            log::info!("Output 3D model: {}", point_cloud.display());
        }
        WorkspaceState::SparseFallback {
            placeholder,
            sparse_points,
        } => {
            log::info!("Reconstruction complete (sparse only)!");
            log::info!("Placeholder dense model: {}", placeholder.display());
            log::info!("Sparse point cloud: {}", sparse_points.display());
        }
        other => {
            log::warn!("Reconstruction stopped in unexpected state {other:?}");
            return;
        }
    }
    log::info!("You can view the model with software like MeshLab or CloudCompare.");
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.video_path.is_file() {
        return Err(format!("Input file not found: {}", cli.video_path.display()).into());
    }
    if !cli.frame_rate.is_finite() {
        return Err(format!("Frame rate must be a finite number, got {}", cli.frame_rate).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vid2cloud", "clip.mp4"]).unwrap();
        assert_eq!(cli.video_path, PathBuf::from("clip.mp4"));
        assert_eq!(cli.max_frames, 100);
        assert!((cli.frame_rate - 2.0).abs() < f64::EPSILON);
        assert_eq!(cli.frames_dir, PathBuf::from("frames"));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert_eq!(cli.colmap, PathBuf::from("colmap"));
        assert!(!cli.extract_only);
    }

    #[test]
    fn test_positional_overrides() {
        let cli = Cli::try_parse_from(["vid2cloud", "clip.mp4", "25", "0.5"]).unwrap();
        assert_eq!(cli.max_frames, 25);
        assert!((cli.frame_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_values_mean_unlimited() {
        let cli = Cli::try_parse_from(["vid2cloud", "clip.mp4", "-1", "-1"]).unwrap();
        assert_eq!(cli.max_frames, -1);
        assert!(cli.frame_rate < 0.0);
    }

    #[test]
    fn test_missing_video_argument_is_rejected() {
        assert!(Cli::try_parse_from(["vid2cloud"]).is_err());
    }

    #[test]
    fn test_non_numeric_max_frames_is_rejected() {
        assert!(Cli::try_parse_from(["vid2cloud", "clip.mp4", "many"]).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let cli = Cli::try_parse_from(["vid2cloud", "/nonexistent/clip.mp4"]).unwrap();
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_validate_rejects_non_finite_rate() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["vid2cloud", path, "10", "NaN"]).unwrap();
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_validate_accepts_existing_input() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["vid2cloud", path]).unwrap();
        assert!(validate(&cli).is_ok());
    }
}
