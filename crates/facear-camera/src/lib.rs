#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for camera operations.
pub mod error;

/// Angular field of view derived from the camera intrinsics.
pub mod fov;

/// Pinhole camera intrinsics and image sizes.
pub mod intrinsics;

/// Capture video formats and format selection.
pub mod video_format;

pub use crate::error::CameraError;
pub use crate::fov::{field_of_view, try_field_of_view, FieldOfView};
pub use crate::intrinsics::{CameraIntrinsics, ImageSize};
pub use crate::video_format::VideoFormat;
