use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
}

impl ImageSize {
    /// Create a new image size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Represents the intrinsic parameters of a pinhole camera, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in x direction
    pub fx: f64,
    /// Focal length in y direction
    pub fy: f64,
    /// Principal point x coordinate
    pub cx: f64,
    /// Principal point y coordinate
    pub cy: f64,
}

impl CameraIntrinsics {
    /// Create camera intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Create intrinsics with the principal point at the image center.
    pub fn centered(fx: f64, fy: f64, size: ImageSize) -> Self {
        Self::new(fx, fy, size.width as f64 / 2.0, size.height as f64 / 2.0)
    }

    /// Create camera intrinsics from a row-major 3x3 intrinsics matrix.
    ///
    /// The matrix must have the form `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`.
    pub fn from_matrix(k: &[[f64; 3]; 3]) -> Result<Self, CameraError> {
        if k[0][1] != 0.0 || k[1][0] != 0.0 || k[2][0] != 0.0 || k[2][1] != 0.0 || k[2][2] != 1.0
        {
            return Err(CameraError::InvalidIntrinsics(
                "matrix must have form [[fx, 0, cx], [0, fy, cy], [0, 0, 1]]".to_string(),
            ));
        }

        Ok(Self {
            fx: k[0][0],
            fy: k[1][1],
            cx: k[0][2],
            cy: k[1][2],
        })
    }

    /// Convert to a row-major 3x3 intrinsics matrix.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }

    /// Check that both focal lengths are finite and strictly positive.
    pub fn validate(&self) -> Result<(), CameraError> {
        for (name, f) in [("fx", self.fx), ("fy", self.fy)] {
            if !f.is_finite() || f <= 0.0 {
                return Err(CameraError::InvalidIntrinsics(format!(
                    "{name} must be finite and positive, got {f}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_roundtrip() -> Result<(), CameraError> {
        let k = [[800.0, 0.0, 640.0], [0.0, 810.0, 360.0], [0.0, 0.0, 1.0]];
        let intrinsics = CameraIntrinsics::from_matrix(&k)?;
        assert_eq!(intrinsics, CameraIntrinsics::new(800.0, 810.0, 640.0, 360.0));
        assert_eq!(intrinsics.to_matrix(), k);
        Ok(())
    }

    #[test]
    fn test_from_matrix_rejects_skew() {
        let k = [[800.0, 1.0, 640.0], [0.0, 800.0, 360.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            CameraIntrinsics::from_matrix(&k),
            Err(CameraError::InvalidIntrinsics(_))
        ));
    }

    #[test]
    fn test_validate() {
        let size = ImageSize::new(1280, 720);
        assert!(CameraIntrinsics::centered(1000.0, 1000.0, size)
            .validate()
            .is_ok());
        assert!(CameraIntrinsics::centered(0.0, 1000.0, size)
            .validate()
            .is_err());
        assert!(CameraIntrinsics::centered(1000.0, f64::NAN, size)
            .validate()
            .is_err());
        assert!(CameraIntrinsics::centered(-5.0, 1000.0, size)
            .validate()
            .is_err());
    }

    #[test]
    fn test_centered() {
        let intrinsics = CameraIntrinsics::centered(500.0, 500.0, ImageSize::new(640, 480));
        assert_eq!(intrinsics.cx, 320.0);
        assert_eq!(intrinsics.cy, 240.0);
    }
}
