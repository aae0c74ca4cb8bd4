use std::fs;
use std::io;
use std::path::Path;

/// Minimal ASCII PLY holding a single vertex at the origin.
///
/// Written in place of `fused.ply` when dense stereo cannot run, so that
/// consumers expecting a point cloud at that path still find a parseable
/// file. The vertex itself carries no meaning.
pub fn placeholder_ply() -> String {
    [
        "ply",
        "format ascii 1.0",
        "comment COLMAP sparse reconstruction converted to PLY",
        "comment Dense stereo unavailable; see sparse_points.ply for the sparse model",
        "element vertex 1",
        "property float x",
        "property float y",
        "property float z",
        "end_header",
        "0 0 0",
        "",
    ]
    .join("\n")
}

pub fn write_placeholder_ply(path: &Path) -> io::Result<()> {
    fs::write(path, placeholder_ply())
}

/// The parts of a PLY header needed to sanity-check a point cloud.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlyHeader {
    pub format: String,
    pub vertex_count: usize,
    pub comments: Vec<String>,
}

/// Parses the header of a PLY document.
///
/// Returns `None` unless the text starts with the `ply` magic line, declares
/// a format and a vertex element, and reaches `end_header`.
pub fn parse_header(text: &str) -> Option<PlyHeader> {
    let mut lines = text.lines();
    if lines.next()?.trim() != "ply" {
        return None;
    }

    let mut format = None;
    let mut vertex_count = None;
    let mut comments = Vec::new();

    for line in lines {
        let line = line.trim();
        if line == "end_header" {
            return Some(PlyHeader {
                format: format?,
                vertex_count: vertex_count?,
                comments,
            });
        }
        if let Some(rest) = line.strip_prefix("format ") {
            format = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("comment ") {
            comments.push(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("element vertex ") {
            vertex_count = rest.trim().parse().ok();
        }
    }

    None
}
