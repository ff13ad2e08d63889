use facear_camera::{field_of_view, CameraIntrinsics, FieldOfView, ImageSize};

use crate::pose::Pose;

/// The tracked camera of a frame: its world pose and its projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera pose in world space.
    pub transform: Pose,
    /// The camera intrinsics, relative to `image_resolution`.
    pub intrinsics: CameraIntrinsics,
    /// The resolution of the captured image.
    pub image_resolution: ImageSize,
}

impl Camera {
    /// Create a new camera.
    pub fn new(transform: Pose, intrinsics: CameraIntrinsics, image_resolution: ImageSize) -> Self {
        Self {
            transform,
            intrinsics,
            image_resolution,
        }
    }

    /// The horizontal and vertical field of view of the camera, in degrees.
    pub fn field_of_view(&self) -> FieldOfView {
        field_of_view(&self.intrinsics, self.image_resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_field_of_view() {
        let size = ImageSize::new(1920, 1440);
        let camera = Camera::new(
            Pose::IDENTITY,
            CameraIntrinsics::centered(1400.0, 1400.0, size),
            size,
        );
        let fov = camera.field_of_view();
        assert_relative_eq!(fov.horizontal, 68.878, epsilon = 1e-3);
        assert!(fov.vertical < fov.horizontal);
    }
}
