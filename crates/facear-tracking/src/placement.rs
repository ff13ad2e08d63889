use glam::Vec3;

use crate::{
    anchor::{Anchor, AnchorId},
    pose::Pose,
    session::TrackingSession,
};

/// Distance in meters at which anchors are placed in front of the camera.
pub const DEFAULT_PLACEMENT_DISTANCE: f32 = 0.2;

/// Compute the world transform `distance` in front of the camera.
///
/// The offset `(0, 0, -distance)` is expressed in the camera frame (-Z is forward)
/// and mapped to world space by the camera pose: `camera_pose * T(0, 0, -distance)`.
/// The result keeps the camera orientation.
///
/// Example:
///
/// ```
/// use facear_tracking::{anchor_transform, Pose};
///
/// let transform = anchor_transform(&Pose::IDENTITY, 0.2);
/// assert_eq!(transform.translation().z, -0.2);
/// ```
pub fn anchor_transform(camera_pose: &Pose, distance: f32) -> Pose {
    let offset = Pose::from_translation(Vec3::new(0.0, 0.0, -distance));
    camera_pose.compose(&offset)
}

/// Place an anchor `distance` in front of the current camera and register it with the session.
///
/// # Returns
///
/// The id of the new anchor, or `None` if the session has no frame yet. In that
/// case the anchor set is left untouched.
pub fn place_anchor<S>(session: &mut S, distance: f32) -> Option<AnchorId>
where
    S: TrackingSession + ?Sized,
{
    let Some(camera_pose) = session.current_pose() else {
        log::debug!("no current frame, skipping anchor placement");
        return None;
    };

    let anchor = Anchor::new(anchor_transform(&camera_pose, distance));
    let id = anchor.id();
    session.add_anchor(anchor);

    log::debug!(
        "placed {id} at {:?}",
        anchor.transform.translation().to_array()
    );

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        camera::Camera, configuration::DeviceCapabilities, RunOptions, SimulatedSession,
        TrackingConfiguration,
    };
    use approx::assert_relative_eq;
    use facear_camera::{CameraIntrinsics, ImageSize};
    use glam::Quat;

    #[test]
    fn test_identity_pose_places_straight_ahead() {
        let transform = anchor_transform(&Pose::IDENTITY, DEFAULT_PLACEMENT_DISTANCE);
        assert_eq!(transform.translation(), Vec3::new(0.0, 0.0, -0.2));
        assert!(transform.rotation().angle_between(Quat::IDENTITY) < 1e-6);
    }

    #[test]
    fn test_inherits_camera_orientation() {
        let rotation = Quat::from_rotation_x(-0.4) * Quat::from_rotation_y(1.1);
        let camera = Pose::from_rotation_translation(rotation, Vec3::new(0.3, 1.5, -2.0));
        let transform = anchor_transform(&camera, 0.5);

        assert!(transform.rotation().angle_between(rotation) < 1e-4);
        let expected = camera.translation() + camera.forward() * 0.5;
        let actual = transform.translation();
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn test_place_anchor_without_frame_is_noop() {
        let mut session = SimulatedSession::new(DeviceCapabilities::default());
        session
            .run(&TrackingConfiguration::default(), RunOptions::reset())
            .expect("run");
        let events = session.subscribe();

        assert_eq!(place_anchor(&mut session, DEFAULT_PLACEMENT_DISTANCE), None);
        assert!(session.anchors().is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_place_anchor_registers_with_session() {
        let mut session = SimulatedSession::new(DeviceCapabilities::default());
        session
            .run(&TrackingConfiguration::default(), RunOptions::reset())
            .expect("run");

        let size = ImageSize::new(1280, 720);
        let pose = Pose::from_translation(Vec3::new(1.0, 0.0, 0.0));
        session.push_frame(
            Camera::new(pose, CameraIntrinsics::centered(1000.0, 1000.0, size), size),
            0.0,
        );

        let id = place_anchor(&mut session, DEFAULT_PLACEMENT_DISTANCE).expect("anchor placed");
        let anchors = session.anchors();
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].id(), id);
        assert_eq!(anchors[0].transform.translation(), Vec3::new(1.0, 0.0, -0.2));
    }
}
