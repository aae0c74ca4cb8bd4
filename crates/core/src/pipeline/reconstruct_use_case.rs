use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::reconstruction::domain::command_runner::{CommandRunner, RunError};
use crate::reconstruction::domain::ply::write_placeholder_ply;
use crate::reconstruction::domain::stage::ReconstructionStage;
use crate::reconstruction::domain::workspace::{ReconstructionWorkspace, WorkspaceState};

#[derive(Error, Debug)]
pub enum ReconstructionError {
    #[error("{stage} failed: {source}. Make sure COLMAP is installed")]
    ToolMissing {
        stage: ReconstructionStage,
        #[source]
        source: RunError,
    },
    #[error("{stage} failed: {source}")]
    StepFailed {
        stage: ReconstructionStage,
        #[source]
        source: RunError,
    },
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReconstructionError {
    fn from_run(stage: ReconstructionStage, source: RunError) -> Self {
        match source {
            RunError::NotFound { .. } => Self::ToolMissing { stage, source },
            _ => Self::StepFailed { stage, source },
        }
    }

    /// The stage whose subcommand failed, if the failure came from the tool.
    pub fn stage(&self) -> Option<ReconstructionStage> {
        match self {
            Self::ToolMissing { stage, .. } | Self::StepFailed { stage, .. } => Some(*stage),
            Self::Io { .. } => None,
        }
    }
}

/// Drives COLMAP from a directory of images to a point cloud.
///
/// feature extraction → exhaustive matching → mapper → undistortion →
/// patch-match stereo → stereo fusion. Each step must exit successfully
/// before the next starts. If patch-match stereo fails (typically no CUDA
/// device), the sparse model is exported instead and a placeholder is left
/// at `dense/fused.ply`; that outcome still counts as success.
pub struct ReconstructUseCase {
    runner: Box<dyn CommandRunner>,
    logger: Box<dyn PipelineLogger>,
}

impl ReconstructUseCase {
    pub fn new(runner: Box<dyn CommandRunner>, logger: Box<dyn PipelineLogger>) -> Self {
        Self { runner, logger }
    }

    /// Runs every stage and returns the terminal workspace state.
    pub fn execute(
        &mut self,
        workspace: &ReconstructionWorkspace,
    ) -> Result<WorkspaceState, ReconstructionError> {
        workspace.prepare().map_err(|source| ReconstructionError::Io {
            path: workspace.output_dir().to_path_buf(),
            source,
        })?;

        let mut state = WorkspaceState::Prepared;
        while !state.is_terminal() {
            state = self.advance(workspace, state)?;
        }

        self.logger.summary();
        Ok(state)
    }

    /// Runs the stage that follows `state`.
    fn advance(
        &mut self,
        ws: &ReconstructionWorkspace,
        state: WorkspaceState,
    ) -> Result<WorkspaceState, ReconstructionError> {
        use ReconstructionStage as Stage;

        match state {
            WorkspaceState::Prepared => {
                self.run_stage(ws, Stage::FeatureExtraction)?;
                Ok(WorkspaceState::FeaturesExtracted)
            }
            WorkspaceState::FeaturesExtracted => {
                self.run_stage(ws, Stage::ExhaustiveMatching)?;
                Ok(WorkspaceState::FeaturesMatched)
            }
            WorkspaceState::FeaturesMatched => {
                self.run_stage(ws, Stage::SparseMapping)?;
                Ok(WorkspaceState::SparseModel)
            }
            WorkspaceState::SparseModel => {
                self.run_stage(ws, Stage::ImageUndistortion)?;
                Ok(WorkspaceState::Undistorted)
            }
            WorkspaceState::Undistorted => match self.run_stage(ws, Stage::PatchMatchStereo) {
                Ok(()) => Ok(WorkspaceState::DepthMaps),
                Err(e) => {
                    self.logger.warn(&format!(
                        "{e}; falling back to exporting the sparse model"
                    ));
                    self.sparse_fallback(ws)
                }
            },
            WorkspaceState::DepthMaps => {
                self.run_stage(ws, Stage::StereoFusion)?;
                Ok(WorkspaceState::Fused {
                    point_cloud: ws.fused_ply(),
                })
            }
            terminal => Ok(terminal),
        }
    }

    fn sparse_fallback(
        &mut self,
        ws: &ReconstructionWorkspace,
    ) -> Result<WorkspaceState, ReconstructionError> {
        self.run_stage(ws, ReconstructionStage::SparseExport)?;

        let placeholder = ws.fused_ply();
        write_placeholder_ply(&placeholder).map_err(|source| ReconstructionError::Io {
            path: placeholder.clone(),
            source,
        })?;

        let sparse_points = ws.sparse_points_ply();
        fs::copy(ws.sparse_ply(), &sparse_points).map_err(|source| ReconstructionError::Io {
            path: sparse_points.clone(),
            source,
        })?;

        self.logger
            .info("Created simplified output. For better results, use a CUDA-enabled GPU.");

        Ok(WorkspaceState::SparseFallback {
            placeholder,
            sparse_points,
        })
    }

    fn run_stage(
        &mut self,
        ws: &ReconstructionWorkspace,
        stage: ReconstructionStage,
    ) -> Result<(), ReconstructionError> {
        let invocation = stage.invocation(ws);
        self.logger.stage_started(stage.description());

        let start = Instant::now();
        let result = self.runner.run(&invocation);
        self.logger
            .timing(stage.description(), start.elapsed().as_secs_f64() * 1000.0);

        result.map_err(|e| ReconstructionError::from_run(stage, e))
    }
}
