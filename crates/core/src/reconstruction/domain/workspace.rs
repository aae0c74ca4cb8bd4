use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::{
    DATABASE_FILE, DENSE_DIR, FUSED_PLY, SPARSE_DIR, SPARSE_MODEL_DIR, SPARSE_PLY,
    SPARSE_POINTS_PLY,
};

/// On-disk layout shared by every reconstruction stage.
///
/// ```text
/// {output}/database.db
/// {output}/sparse/0/          mapper output
/// {output}/dense/             undistorted images, depth maps
/// {output}/dense/fused.ply    final point cloud (or placeholder)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconstructionWorkspace {
    image_dir: PathBuf,
    output_dir: PathBuf,
}

impl ReconstructionWorkspace {
    pub fn new(image_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.output_dir.join(DATABASE_FILE)
    }

    pub fn sparse_dir(&self) -> PathBuf {
        self.output_dir.join(SPARSE_DIR)
    }

    pub fn sparse_model_dir(&self) -> PathBuf {
        self.sparse_dir().join(SPARSE_MODEL_DIR)
    }

    pub fn dense_dir(&self) -> PathBuf {
        self.output_dir.join(DENSE_DIR)
    }

    pub fn fused_ply(&self) -> PathBuf {
        self.dense_dir().join(FUSED_PLY)
    }

    pub fn sparse_ply(&self) -> PathBuf {
        self.dense_dir().join(SPARSE_PLY)
    }

    pub fn sparse_points_ply(&self) -> PathBuf {
        self.dense_dir().join(SPARSE_POINTS_PLY)
    }

    /// Creates `sparse/` and `dense/` (and the output directory itself).
    ///
    /// The tool refuses to write into missing directories, so this runs
    /// before the first stage.
    pub fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(self.sparse_dir())?;
        fs::create_dir_all(self.dense_dir())
    }
}

/// How far a reconstruction has progressed.
///
/// Each stage consumes one state and yields the next; the two terminal
/// states carry the artifact paths the caller should look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceState {
    Prepared,
    FeaturesExtracted,
    FeaturesMatched,
    SparseModel,
    Undistorted,
    DepthMaps,
    /// Dense fusion succeeded.
    Fused { point_cloud: PathBuf },
    /// Dense stereo was unavailable; only the sparse model was exported.
    SparseFallback {
        placeholder: PathBuf,
        sparse_points: PathBuf,
    },
}

impl WorkspaceState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Fused { .. } | Self::SparseFallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let ws = ReconstructionWorkspace::new("frames", "output");
        let out = Path::new("output");
        assert_eq!(ws.image_dir(), Path::new("frames"));
        assert_eq!(ws.database_path(), out.join("database.db"));
        assert_eq!(ws.sparse_dir(), out.join("sparse"));
        assert_eq!(ws.sparse_model_dir(), out.join("sparse").join("0"));
        assert_eq!(ws.dense_dir(), out.join("dense"));
        assert_eq!(ws.fused_ply(), out.join("dense").join("fused.ply"));
        assert_eq!(ws.sparse_ply(), out.join("dense").join("sparse.ply"));
        assert_eq!(
            ws.sparse_points_ply(),
            out.join("dense").join("sparse_points.ply")
        );
    }

    #[test]
    fn test_prepare_creates_sparse_and_dense() {
        let dir = tempfile::tempdir().unwrap();
        let ws = ReconstructionWorkspace::new(dir.path().join("frames"), dir.path().join("out"));
        ws.prepare().unwrap();
        assert!(ws.sparse_dir().is_dir());
        assert!(ws.dense_dir().is_dir());
        // Idempotent.
        ws.prepare().unwrap();
    }

    #[test]
    fn test_terminal_states() {
        assert!(!WorkspaceState::Prepared.is_terminal());
        assert!(!WorkspaceState::DepthMaps.is_terminal());
        assert!(WorkspaceState::Fused {
            point_cloud: PathBuf::from("fused.ply")
        }
        .is_terminal());
    }
}
