use glam::{Mat4, Quat, Vec3, Vec4};

/// A rigid transform (rotation + translation) in world space.
///
/// Stored as a column-major 4x4 matrix with the translation in the last column,
/// the layout used by the tracking platform for camera and anchor transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    matrix: Mat4,
}

impl Pose {
    /// The identity pose.
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    /// Create a pose from a 4x4 rigid transform matrix.
    ///
    /// NOTE: the matrix is assumed to be rigid, no orthogonality check is done.
    #[inline]
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Create a pose from a rotation and a translation.
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            matrix: Mat4::from_rotation_translation(rotation, translation),
        }
    }

    /// Create a translation-only pose.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(translation),
        }
    }

    /// The underlying 4x4 matrix.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// The translation component.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// The rotation component as a unit quaternion.
    pub fn rotation(&self) -> Quat {
        let (_, rotation, _) = self.matrix.to_scale_rotation_translation();
        rotation
    }

    /// The forward direction (local -Z) expressed in world space.
    pub fn forward(&self) -> Vec3 {
        -self.matrix.z_axis.truncate()
    }

    /// Compose two poses: `self * other`, where `other` is expressed in the frame of `self`.
    #[inline]
    pub fn compose(&self, other: &Pose) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// The inverse rigid transform.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation().inverse();
        let translation = -(rotation * self.translation());
        Self::from_rotation_translation(rotation, translation)
    }

    /// Map a point from the local frame of the pose into world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        (self.matrix * Vec4::new(point.x, point.y, point.z, 1.0)).truncate()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        self.compose(&rhs)
    }
}

impl From<Mat4> for Pose {
    fn from(matrix: Mat4) -> Self {
        Self::from_matrix(matrix)
    }
}
