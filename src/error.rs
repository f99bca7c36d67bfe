use thiserror::Error;

/// Errors that can occur while turning an image into cutter geometry.
///
/// Empty intermediate results (no foreground, no detail) are *not*
/// errors; the pipeline carries them through as empty contour sets and
/// warns on stderr. Only unreadable input, unwritable output, and a
/// bounding-box request over zero points abort a run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("empty outline: no points to compute a bounding box from")]
    EmptyOutline,

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
