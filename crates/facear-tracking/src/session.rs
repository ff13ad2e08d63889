use crate::{
    anchor::{Anchor, AnchorId},
    configuration::{RunOptions, TrackingConfiguration},
    error::SessionError,
    event::EventReceiver,
    frame::Frame,
    pose::Pose,
};

/// A service that estimates the camera pose over time and manages world anchors.
///
/// Implementations own their anchor set: once added, an anchor lives until it is
/// removed or the session is run with [`RunOptions::remove_existing_anchors`].
/// Frame and anchor notifications are delivered on the channel returned by
/// [`TrackingSession::subscribe`], possibly from another thread.
pub trait TrackingSession {
    /// Start or reconfigure the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedConfiguration`] if the device cannot
    /// provide what the configuration requests.
    fn run(
        &mut self,
        configuration: &TrackingConfiguration,
        options: RunOptions,
    ) -> Result<(), SessionError>;

    /// Pause tracking. The anchors and the last frame are kept.
    fn pause(&mut self);

    /// Returns true between a successful [`run`](TrackingSession::run) and [`pause`](TrackingSession::pause).
    fn is_running(&self) -> bool;

    /// The most recent frame, `None` if no frame was processed yet.
    fn current_frame(&self) -> Option<Frame>;

    /// The camera pose of the most recent frame.
    fn current_pose(&self) -> Option<Pose> {
        self.current_frame().map(|frame| frame.camera.transform)
    }

    /// Register an anchor with the session.
    fn add_anchor(&mut self, anchor: Anchor);

    /// Remove an anchor. Returns false if the session does not know it.
    fn remove_anchor(&mut self, id: AnchorId) -> bool;

    /// Snapshot of the anchors registered with the session.
    fn anchors(&self) -> Vec<Anchor>;

    /// Open the event channel of the session.
    ///
    /// A session has a single subscriber: subscribing again disconnects the
    /// previous [`EventReceiver`].
    fn subscribe(&mut self) -> EventReceiver;
}
