/// Error types for camera operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Invalid camera intrinsics matrix.
    #[error("Invalid camera intrinsics: {0}")]
    InvalidIntrinsics(String),

    /// The image size has a zero dimension.
    #[error("Invalid image size ({0}x{1})")]
    InvalidImageSize(usize, usize),
}
