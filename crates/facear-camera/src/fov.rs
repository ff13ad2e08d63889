use crate::{
    error::CameraError,
    intrinsics::{CameraIntrinsics, ImageSize},
};

/// Horizontal and vertical angular field of view, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    /// Horizontal field of view in degrees.
    pub horizontal: f64,
    /// Vertical field of view in degrees.
    pub vertical: f64,
}

impl FieldOfView {
    /// Returns `(horizontal, vertical)` in radians.
    pub fn radians(&self) -> (f64, f64) {
        (self.horizontal.to_radians(), self.vertical.to_radians())
    }

    /// Returns true if both angles are finite.
    pub fn is_finite(&self) -> bool {
        self.horizontal.is_finite() && self.vertical.is_finite()
    }
}

/// Angle in degrees subtended by a sensor extent at the optical center.
#[inline]
fn subtended_angle(extent: f64, focal_length: f64) -> f64 {
    2.0 * (extent / (2.0 * focal_length)).atan() * 180.0 / std::f64::consts::PI
}

/// Compute the field of view of a pinhole camera.
///
/// Uses the pinhole relation `2 * atan(extent / (2 * f))` for each axis.
///
/// # Arguments
///
/// * `intrinsics` - The camera intrinsics in pixels.
/// * `size` - The image resolution the intrinsics refer to.
///
/// # Returns
///
/// The horizontal and vertical field of view in degrees.
///
/// PRECONDITION: the focal lengths are finite and positive. Degenerate
/// intrinsics are not checked and produce non-finite or meaningless angles,
/// use [`try_field_of_view`] to validate them.
///
/// Example:
///
/// ```
/// use facear_camera::{field_of_view, CameraIntrinsics, ImageSize};
///
/// let size = ImageSize::new(1280, 720);
/// let fov = field_of_view(&CameraIntrinsics::centered(1000.0, 1000.0, size), size);
/// assert!((fov.vertical - 39.60).abs() < 1e-2);
/// ```
pub fn field_of_view(intrinsics: &CameraIntrinsics, size: ImageSize) -> FieldOfView {
    FieldOfView {
        horizontal: subtended_angle(size.width as f64, intrinsics.fx),
        vertical: subtended_angle(size.height as f64, intrinsics.fy),
    }
}

/// Compute the field of view, rejecting degenerate intrinsics and empty images.
///
/// # Errors
///
/// * [`CameraError::InvalidIntrinsics`] if a focal length is not finite and positive.
/// * [`CameraError::InvalidImageSize`] if the image has a zero dimension.
pub fn try_field_of_view(
    intrinsics: &CameraIntrinsics,
    size: ImageSize,
) -> Result<FieldOfView, CameraError> {
    intrinsics.validate()?;

    if size.is_empty() {
        return Err(CameraError::InvalidImageSize(size.width, size.height));
    }

    Ok(field_of_view(intrinsics, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_field_of_view_720p() {
        let size = ImageSize::new(1280, 720);
        let intrinsics = CameraIntrinsics::centered(1000.0, 1000.0, size);
        let fov = field_of_view(&intrinsics, size);
        assert_relative_eq!(fov.horizontal, 65.24, epsilon = 5e-3);
        assert_relative_eq!(fov.vertical, 39.60, epsilon = 5e-3);
    }

    #[test]
    fn test_field_of_view_square_sensor() {
        // extent == 2f gives a right angle
        let size = ImageSize::new(1000, 1000);
        let fov = field_of_view(&CameraIntrinsics::centered(500.0, 500.0, size), size);
        assert_relative_eq!(fov.horizontal, 90.0, epsilon = 1e-9);
        assert_relative_eq!(fov.vertical, 90.0, epsilon = 1e-9);
        let (h, v) = fov.radians();
        assert_relative_eq!(h, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(v, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_field_of_view_degenerate_is_silent() {
        let size = ImageSize::new(1280, 720);
        let fov = field_of_view(&CameraIntrinsics::centered(0.0, 0.0, size), size);
        // atan(inf) saturates, the angle is not an error
        assert_relative_eq!(fov.horizontal, 180.0, epsilon = 1e-9);

        let fov = field_of_view(&CameraIntrinsics::centered(f64::NAN, 1.0, size), size);
        assert!(!fov.is_finite());
    }

    #[test]
    fn test_try_field_of_view() {
        let size = ImageSize::new(1280, 720);
        assert!(try_field_of_view(&CameraIntrinsics::centered(1000.0, 1000.0, size), size).is_ok());

        let err = try_field_of_view(&CameraIntrinsics::centered(0.0, 1000.0, size), size);
        assert!(matches!(err, Err(CameraError::InvalidIntrinsics(_))));

        let empty = ImageSize::new(0, 720);
        let err = try_field_of_view(&CameraIntrinsics::centered(1000.0, 1000.0, size), empty);
        assert_eq!(err, Err(CameraError::InvalidImageSize(0, 720)));
    }
}
