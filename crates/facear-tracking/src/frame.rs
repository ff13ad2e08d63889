use crate::{anchor::Anchor, camera::Camera};

/// A snapshot produced by the tracking session.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Capture time in seconds.
    pub timestamp: f64,
    /// The camera that captured the frame.
    pub camera: Camera,
    /// The anchors known to the session when the frame was produced.
    pub anchors: Vec<Anchor>,
}
