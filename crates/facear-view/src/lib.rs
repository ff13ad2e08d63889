#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// The camera controller owning the session, the configuration and the surface.
pub mod controller;

/// Error types for the view crate.
pub mod error;

/// Frame rate counter for the render loop.
pub mod fps_counter;

/// The render surface forwarding callbacks to a renderer.
pub mod surface;

pub use crate::controller::{CameraController, ControllerConfig};
pub use crate::error::ViewError;
pub use crate::fps_counter::FpsCounter;
pub use crate::surface::{RenderSurface, RenderSurfaceConfig, Renderer};
