use argh::FromArgs;
use std::{path::PathBuf, time::Duration};

use facear::{
    camera::{CameraIntrinsics, ImageSize, VideoFormat},
    tracking::{DeviceCapabilities, Pose, SimulatedSession, TrackingConfiguration, TrackingSession},
    view::{CameraController, ControllerConfig, Renderer},
};
use glam::{Mat4, Vec3};

#[derive(FromArgs)]
/// Orbit a simulated camera around the origin and place anchors on taps
struct Args {
    /// the number of frames to draw
    #[argh(option, short = 'n', default = "90")]
    frames: u32,

    /// the frames per second of the tracking session
    #[argh(option, short = 'f', default = "30")]
    fps: u32,

    /// the number of taps spread over the run
    #[argh(option, short = 't', default = "3")]
    taps: u32,

    /// path to a JSON tracking configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

/// A renderer that only counts what it is asked to do.
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn drawable_size_changed(&mut self, size: ImageSize) {
        log::info!("drawable resized to {size}");
    }

    fn update(&mut self) {
        self.frames += 1;
    }
}

/// Camera poses on a circle of `radius` at eye height, looking at the origin.
fn orbit(num_poses: usize, radius: f32) -> Vec<Pose> {
    (0..num_poses)
        .map(|i| {
            let angle = i as f32 / num_poses as f32 * std::f32::consts::TAU;
            let eye = Vec3::new(radius * angle.cos(), 1.5, radius * angle.sin());
            // look_at gives the world-to-camera transform
            Pose::from_matrix(Mat4::look_at_rh(eye, Vec3::new(0.0, 1.0, 0.0), Vec3::Y).inverse())
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let capabilities = DeviceCapabilities {
        supports_user_face_tracking: true,
        supports_person_segmentation: true,
        supported_video_formats: vec![
            VideoFormat::new(1920, 1440, 60),
            VideoFormat::new(1920, 1080, 60),
            VideoFormat::new(1280, 720, 60),
            VideoFormat::new(1280, 720, 30),
        ],
    };

    let mut controller = CameraController::load(
        SimulatedSession::new(capabilities.clone()),
        &capabilities,
        Some(LogRenderer::default()),
        ImageSize::new(1170, 2532),
        ControllerConfig::default(),
    )?;

    if let Some(path) = args.config {
        controller.set_configuration(TrackingConfiguration::from_json_file(path)?);
    }
    println!("configuration: {}", controller.configuration().to_json_string()?);

    controller.will_appear()?;

    let image_size = controller
        .configuration()
        .video_format
        .map(|f| f.image_resolution)
        .unwrap_or(ImageSize::new(1920, 1440));
    let intrinsics = CameraIntrinsics::centered(
        image_size.width as f64 * 0.75,
        image_size.width as f64 * 0.75,
        image_size,
    );

    controller
        .session()
        .start_playback(orbit(120, 1.0), intrinsics, image_size, args.fps)?;

    let tap_every = (args.frames / args.taps.max(1)).max(1);
    let period = Duration::from_secs_f64(1.0 / args.fps.max(1) as f64);

    for frame in 1..=args.frames {
        std::thread::sleep(period);
        controller.draw();
        controller.pump_events();

        if args.taps > 0 && frame % tap_every == 0 {
            match controller.handle_tap() {
                Some(id) => println!("frame {frame}: placed {id}"),
                None => println!("frame {frame}: no camera frame yet, tap ignored"),
            }
        }
    }

    if let Some(fov) = controller.field_of_view() {
        println!(
            "field of view: {:.2} x {:.2} degrees",
            fov.horizontal, fov.vertical
        );
    }

    controller.will_disappear();
    controller.pump_events();

    for anchor in controller.session().anchors() {
        let t = anchor.transform.translation();
        println!("{}: ({:.3}, {:.3}, {:.3})", anchor.id(), t.x, t.y, t.z);
    }
    println!(
        "drew {} frames at {:.1} fps",
        controller.surface().renderer().frames,
        controller.surface().fps()
    );

    Ok(())
}
