use approx::assert_relative_eq;
use facear_camera::{CameraIntrinsics, ImageSize};
use facear_tracking::{
    anchor_transform, place_anchor, Camera, DeviceCapabilities, Pose, RunOptions,
    SimulatedSession, TrackingConfiguration, TrackingSession, DEFAULT_PLACEMENT_DISTANCE,
};
use glam::{Quat, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_rotation(rng: &mut StdRng) -> Quat {
    let axis = Vec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
    )
    .try_normalize()
    .unwrap_or(Vec3::Y);
    Quat::from_axis_angle(axis, rng.random_range(-3.0..3.0))
}

#[test]
fn roll_about_optical_axis_keeps_anchor_position() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let rotation = random_rotation(&mut rng);
        let translation = Vec3::new(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
        );
        let camera = Pose::from_rotation_translation(rotation, translation);

        // roll the camera about its own forward (local Z) axis
        let roll = Quat::from_rotation_z(rng.random_range(-3.0..3.0));
        let rolled = Pose::from_rotation_translation(rotation * roll, translation);

        let a = anchor_transform(&camera, DEFAULT_PLACEMENT_DISTANCE).translation();
        let b = anchor_transform(&rolled, DEFAULT_PLACEMENT_DISTANCE).translation();
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }
}

#[test]
fn anchor_lies_on_the_forward_ray_at_distance() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let camera = Pose::from_rotation_translation(
            random_rotation(&mut rng),
            Vec3::new(rng.random_range(-2.0..2.0), 1.5, rng.random_range(-2.0..2.0)),
        );
        let distance = rng.random_range(0.05..3.0);
        let anchor = anchor_transform(&camera, distance).translation();
        let offset = anchor - camera.translation();
        assert_relative_eq!(offset.length(), distance, epsilon = 1e-4);
        assert_relative_eq!(offset.normalize().dot(camera.forward()), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn placement_before_first_frame_leaves_anchor_set_unchanged() {
    let mut session = SimulatedSession::new(DeviceCapabilities::default());
    let before = session.anchors().len();
    assert!(place_anchor(&mut session, DEFAULT_PLACEMENT_DISTANCE).is_none());
    assert_eq!(session.anchors().len(), before);

    session
        .run(&TrackingConfiguration::default(), RunOptions::reset())
        .expect("run");
    assert!(place_anchor(&mut session, DEFAULT_PLACEMENT_DISTANCE).is_none());
    assert_eq!(session.anchors().len(), before);
}

#[test]
fn concurrent_frames_and_placement() {
    let mut session = SimulatedSession::new(DeviceCapabilities::default());
    session
        .run(&TrackingConfiguration::default(), RunOptions::reset())
        .expect("run");

    let size = ImageSize::new(1280, 720);
    let intrinsics = CameraIntrinsics::centered(1000.0, 1000.0, size);
    session.push_frame(Camera::new(Pose::IDENTITY, intrinsics, size), 0.0);

    let producer = std::thread::spawn({
        let session = session.clone();
        move || {
            for i in 1..200 {
                let pose = Pose::from_translation(Vec3::new(i as f32 * 0.01, 0.0, 0.0));
                session.push_frame(Camera::new(pose, intrinsics, size), i as f64 / 30.0);
            }
        }
    });

    let mut placed = 0;
    for _ in 0..50 {
        if place_anchor(&mut session, DEFAULT_PLACEMENT_DISTANCE).is_some() {
            placed += 1;
        }
    }
    producer.join().expect("producer thread");

    assert_eq!(placed, 50);
    assert_eq!(session.anchors().len(), 50);
    let last = session.current_frame().expect("frame");
    assert!(last.anchors.len() <= 50);
}
