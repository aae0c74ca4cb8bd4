/// Frame limit used by the CLI when none is given.
pub const DEFAULT_MAX_FRAMES: i64 = 100;

/// Target sampling rate (frames per second) used by the CLI when none is given.
pub const DEFAULT_FRAME_RATE: f64 = 2.0;

pub const FRAME_FILE_PREFIX: &str = "frame_";
/// Zero-padding width of the sequence number in frame file names.
pub const FRAME_SEQUENCE_WIDTH: usize = 6;
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

pub const DEFAULT_FRAMES_DIR: &str = "frames";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const COLMAP_PROGRAM: &str = "colmap";

// Workspace layout, relative to the reconstruction output directory.
pub const DATABASE_FILE: &str = "database.db";
pub const SPARSE_DIR: &str = "sparse";
/// The mapper writes its first (and usually only) model here.
pub const SPARSE_MODEL_DIR: &str = "0";
pub const DENSE_DIR: &str = "dense";
pub const FUSED_PLY: &str = "fused.ply";
pub const SPARSE_PLY: &str = "sparse.ply";
pub const SPARSE_POINTS_PLY: &str = "sparse_points.ply";
