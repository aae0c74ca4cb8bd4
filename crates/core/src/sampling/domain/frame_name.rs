use std::path::{Path, PathBuf};

use crate::shared::constants::{FRAME_FILE_PREFIX, FRAME_SEQUENCE_WIDTH};

/// File name of the `sequence`-th sampled frame, e.g. `frame_000042.jpg`.
pub fn frame_file_name(sequence: usize, extension: &str) -> String {
    format!(
        "{FRAME_FILE_PREFIX}{sequence:0width$}.{extension}",
        width = FRAME_SEQUENCE_WIDTH
    )
}

pub fn frame_path(output_dir: &Path, sequence: usize, extension: &str) -> PathBuf {
    output_dir.join(frame_file_name(sequence, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "frame_000000.jpg")]
    #[case(7, "frame_000007.jpg")]
    #[case(123_456, "frame_123456.jpg")]
    #[case(1_000_000, "frame_1000000.jpg")]
    fn test_frame_file_name(#[case] sequence: usize, #[case] expected: &str) {
        assert_eq!(frame_file_name(sequence, "jpg"), expected);
    }

    #[test]
    fn test_frame_path_joins_directory() {
        let path = frame_path(Path::new("frames"), 3, "png");
        assert_eq!(path, Path::new("frames").join("frame_000003.png"));
    }

    #[test]
    fn test_names_sort_in_sequence_order() {
        let mut names: Vec<String> = (0..20).rev().map(|i| frame_file_name(i, "jpg")).collect();
        names.sort();
        let expected: Vec<String> = (0..20).map(|i| frame_file_name(i, "jpg")).collect();
        assert_eq!(names, expected);
    }
}
