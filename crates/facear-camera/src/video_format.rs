use serde::{Deserialize, Serialize};

use crate::intrinsics::ImageSize;

/// A capture video format supported by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoFormat {
    /// The resolution of the captured images.
    pub image_resolution: ImageSize,
    /// The capture rate.
    pub frames_per_second: u32,
}

impl VideoFormat {
    /// Create a new video format.
    pub fn new(width: usize, height: usize, frames_per_second: u32) -> Self {
        Self {
            image_resolution: ImageSize::new(width, height),
            frames_per_second,
        }
    }

    /// Pick a format with the given image height from a list of supported formats.
    ///
    /// Among the formats whose height matches, the first one running at `fps` is
    /// preferred, otherwise the first matching one is returned.
    ///
    /// # Returns
    ///
    /// `None` if no format has the requested height.
    ///
    /// Example:
    ///
    /// ```
    /// use facear_camera::VideoFormat;
    ///
    /// let formats = [
    ///     VideoFormat::new(1920, 1080, 60),
    ///     VideoFormat::new(1280, 720, 60),
    ///     VideoFormat::new(1280, 720, 30),
    /// ];
    /// let format = VideoFormat::select(&formats, 720, 30);
    /// assert_eq!(format, Some(VideoFormat::new(1280, 720, 30)));
    /// ```
    pub fn select(formats: &[VideoFormat], height: usize, fps: u32) -> Option<VideoFormat> {
        let mut candidates = formats
            .iter()
            .filter(|f| f.image_resolution.height == height)
            .peekable();

        let first = candidates.peek().copied().copied();

        candidates
            .find(|f| f.frames_per_second == fps)
            .copied()
            .or(first)
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}fps", self.image_resolution, self.frames_per_second)
    }
}
