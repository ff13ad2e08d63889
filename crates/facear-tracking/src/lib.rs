#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Tracking sessions
//!
//! A [`TrackingSession`] estimates the camera pose over time and owns the set of
//! world [`Anchor`]s. The session is an explicitly owned handle with the lifecycle
//! `create -> run(configuration) -> [events] -> pause -> drop`. Frame and anchor
//! notifications are delivered through the channel returned by
//! [`TrackingSession::subscribe`].
//!
//! ## Example
//!
//! ```rust
//! use facear_camera::{CameraIntrinsics, ImageSize};
//! use facear_tracking::{
//!     place_anchor, Camera, DeviceCapabilities, Pose, RunOptions, SimulatedSession,
//!     TrackingConfiguration, TrackingSession, DEFAULT_PLACEMENT_DISTANCE,
//! };
//!
//! let mut session = SimulatedSession::new(DeviceCapabilities::default());
//! let configuration = TrackingConfiguration::world_tracking(session.capabilities());
//! session.run(&configuration, RunOptions::reset()).unwrap();
//!
//! let size = ImageSize::new(1280, 720);
//! let camera = Camera::new(Pose::IDENTITY, CameraIntrinsics::centered(1000.0, 1000.0, size), size);
//! session.push_frame(camera, 0.0);
//!
//! let id = place_anchor(&mut session, DEFAULT_PLACEMENT_DISTANCE);
//! assert!(id.is_some());
//! assert_eq!(session.anchors().len(), 1);
//! ```

/// World anchors registered with a session.
pub mod anchor;

/// The tracked camera of a frame.
pub mod camera;

/// Tracking configuration and device capabilities.
pub mod configuration;

/// Error types for the tracking crate.
pub mod error;

/// Events delivered by a tracking session.
pub mod event;

/// Frames produced by a tracking session.
pub mod frame;

/// Anchor placement in front of the camera.
pub mod placement;

/// Rigid camera and anchor poses.
pub mod pose;

/// The tracking session interface.
pub mod session;

/// An in-process tracking session driven by pushed or played back frames.
pub mod simulated;

pub use crate::anchor::{Anchor, AnchorId};
pub use crate::camera::Camera;
pub use crate::configuration::{
    DeviceCapabilities, FrameSemantics, PlaneDetection, RunOptions, TrackingConfiguration,
};
pub use crate::error::{ConfigError, SessionError};
pub use crate::event::{EventReceiver, SessionEvent, MAX_PENDING_FRAMES};
pub use crate::frame::Frame;
pub use crate::placement::{anchor_transform, place_anchor, DEFAULT_PLACEMENT_DISTANCE};
pub use crate::pose::Pose;
pub use crate::session::TrackingSession;
pub use crate::simulated::SimulatedSession;
