use std::fmt;

use crate::reconstruction::domain::tool_invocation::ToolInvocation;
use crate::reconstruction::domain::workspace::ReconstructionWorkspace;

/// A single COLMAP subcommand in the reconstruction pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReconstructionStage {
    FeatureExtraction,
    ExhaustiveMatching,
    SparseMapping,
    ImageUndistortion,
    PatchMatchStereo,
    StereoFusion,
    /// Converts the sparse model to PLY when dense stereo is unavailable.
    SparseExport,
}

impl ReconstructionStage {
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::FeatureExtraction => "feature_extractor",
            Self::ExhaustiveMatching => "exhaustive_matcher",
            Self::SparseMapping => "mapper",
            Self::ImageUndistortion => "image_undistorter",
            Self::PatchMatchStereo => "patch_match_stereo",
            Self::StereoFusion => "stereo_fusion",
            Self::SparseExport => "model_converter",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FeatureExtraction => "feature extraction",
            Self::ExhaustiveMatching => "feature matching",
            Self::SparseMapping => "sparse reconstruction",
            Self::ImageUndistortion => "image undistortion",
            Self::PatchMatchStereo => "dense stereo",
            Self::StereoFusion => "stereo fusion",
            Self::SparseExport => "sparse model export",
        }
    }

    /// Whether a failure of this stage has a fallback instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::PatchMatchStereo)
    }

    pub fn invocation(&self, ws: &ReconstructionWorkspace) -> ToolInvocation {
        let inv = ToolInvocation::new(self.subcommand());
        match self {
            Self::FeatureExtraction => inv
                .path_option("database_path", &ws.database_path())
                .path_option("image_path", ws.image_dir()),
            Self::ExhaustiveMatching => inv.path_option("database_path", &ws.database_path()),
            Self::SparseMapping => inv
                .path_option("database_path", &ws.database_path())
                .path_option("image_path", ws.image_dir())
                .path_option("output_path", &ws.sparse_dir()),
            Self::ImageUndistortion => inv
                .path_option("image_path", ws.image_dir())
                .path_option("input_path", &ws.sparse_model_dir())
                .path_option("output_path", &ws.dense_dir()),
            Self::PatchMatchStereo => inv.path_option("workspace_path", &ws.dense_dir()),
            Self::StereoFusion => inv
                .path_option("workspace_path", &ws.dense_dir())
                .path_option("output_path", &ws.fused_ply()),
            Self::SparseExport => inv
                .path_option("input_path", &ws.sparse_model_dir())
                .path_option("output_path", &ws.sparse_ply())
                .option("output_type", "PLY"),
        }
    }
}

impl fmt::Display for ReconstructionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::ffi::OsStr;
    use std::path::Path;

    fn workspace() -> ReconstructionWorkspace {
        ReconstructionWorkspace::new("frames", "output")
    }

    #[test]
    fn test_feature_extraction_args() {
        let inv = ReconstructionStage::FeatureExtraction.invocation(&workspace());
        assert_eq!(inv.subcommand(), "feature_extractor");
        assert_eq!(
            inv.value_of("database_path"),
            Some(Path::new("output").join("database.db").as_os_str())
        );
        assert_eq!(inv.value_of("image_path"), Some(OsStr::new("frames")));
    }

    #[test]
    fn test_mapper_writes_into_sparse_dir() {
        let inv = ReconstructionStage::SparseMapping.invocation(&workspace());
        assert_eq!(
            inv.value_of("output_path"),
            Some(Path::new("output").join("sparse").as_os_str())
        );
    }

    #[test]
    fn test_undistorter_reads_first_sparse_model() {
        let inv = ReconstructionStage::ImageUndistortion.invocation(&workspace());
        assert_eq!(
            inv.value_of("input_path"),
            Some(Path::new("output").join("sparse").join("0").as_os_str())
        );
        assert_eq!(
            inv.value_of("output_path"),
            Some(Path::new("output").join("dense").as_os_str())
        );
    }

    #[test]
    fn test_fusion_targets_fused_ply() {
        let inv = ReconstructionStage::StereoFusion.invocation(&workspace());
        assert_eq!(
            inv.value_of("output_path"),
            Some(Path::new("output").join("dense").join("fused.ply").as_os_str())
        );
    }

    #[test]
    fn test_sparse_export_requests_ply() {
        let inv = ReconstructionStage::SparseExport.invocation(&workspace());
        assert_eq!(inv.subcommand(), "model_converter");
        assert_eq!(inv.value_of("output_type"), Some(OsStr::new("PLY")));
        assert_eq!(
            inv.value_of("output_path"),
            Some(Path::new("output").join("dense").join("sparse.ply").as_os_str())
        );
    }

    #[rstest]
    #[case(ReconstructionStage::FeatureExtraction, false)]
    #[case(ReconstructionStage::ExhaustiveMatching, false)]
    #[case(ReconstructionStage::SparseMapping, false)]
    #[case(ReconstructionStage::ImageUndistortion, false)]
    #[case(ReconstructionStage::PatchMatchStereo, true)]
    #[case(ReconstructionStage::StereoFusion, false)]
    #[case(ReconstructionStage::SparseExport, false)]
    fn test_only_dense_stereo_is_recoverable(
        #[case] stage: ReconstructionStage,
        #[case] expected: bool,
    ) {
        assert_eq!(stage.is_recoverable(), expected);
    }
}
