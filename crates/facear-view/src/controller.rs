use std::sync::mpsc::TryRecvError;

use facear_camera::{FieldOfView, ImageSize};
use facear_tracking::{
    place_anchor, AnchorId, DeviceCapabilities, EventReceiver, RunOptions, SessionEvent, TrackingConfiguration,
    TrackingSession, DEFAULT_PLACEMENT_DISTANCE,
};

use crate::{
    error::ViewError,
    surface::{RenderSurface, RenderSurfaceConfig, Renderer},
};

/// Configuration of a [`CameraController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// The render surface configuration.
    pub surface: RenderSurfaceConfig,
    /// Distance in meters at which taps place anchors.
    pub placement_distance: f32,
    /// Options used every time the session is (re)started.
    pub run_options: RunOptions,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            surface: RenderSurfaceConfig::default(),
            placement_distance: DEFAULT_PLACEMENT_DISTANCE,
            run_options: RunOptions::reset(),
        }
    }
}

/// Hosts a tracking session and a render surface.
///
/// The controller runs the session when it becomes visible, pauses it when it
/// is hidden, turns taps into anchors and forwards surface callbacks to the
/// renderer. Session events are drained with [`CameraController::pump_events`].
///
/// The controller must be the only subscriber of its session: calling
/// [`TrackingSession::subscribe`] through [`session_mut`](Self::session_mut)
/// disconnects the controller from the session events.
pub struct CameraController<S: TrackingSession, R: Renderer> {
    session: S,
    configuration: TrackingConfiguration,
    surface: RenderSurface<R>,
    events: EventReceiver,
    events_connected: bool,
    config: ControllerConfig,
}

impl<S: TrackingSession, R: Renderer> CameraController<S, R> {
    /// Set up the controller.
    ///
    /// Builds the world tracking configuration for the device, subscribes to the
    /// session events and sizes the surface to `bounds`.
    ///
    /// # Arguments
    ///
    /// * `session` - The tracking session, owned by the controller from now on.
    /// * `capabilities` - What the device running the session supports.
    /// * `renderer` - The renderer, `None` if no render device could be created.
    /// * `bounds` - The initial size of the surface.
    /// * `config` - The controller configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoRenderDevice`] if there is no renderer.
    pub fn load(
        mut session: S,
        capabilities: &DeviceCapabilities,
        renderer: Option<R>,
        bounds: ImageSize,
        config: ControllerConfig,
    ) -> Result<Self, ViewError> {
        let renderer = renderer.ok_or(ViewError::NoRenderDevice)?;

        let configuration = TrackingConfiguration::world_tracking(capabilities);
        log::debug!("tracking configuration: {configuration:?}");

        let events = session.subscribe();

        let mut surface = RenderSurface::new(renderer, config.surface);
        surface.resize(bounds);

        Ok(Self {
            session,
            configuration,
            surface,
            events,
            events_connected: true,
            config,
        })
    }

    /// Replace the tracking configuration. Takes effect on the next [`will_appear`](Self::will_appear).
    pub fn set_configuration(&mut self, configuration: TrackingConfiguration) {
        self.configuration = configuration;
    }

    /// The tracking configuration used to run the session.
    pub fn configuration(&self) -> &TrackingConfiguration {
        &self.configuration
    }

    /// The controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The view is about to become visible: run the session.
    pub fn will_appear(&mut self) -> Result<(), ViewError> {
        self.session
            .run(&self.configuration, self.config.run_options)?;
        Ok(())
    }

    /// The view is about to be hidden: pause the session.
    pub fn will_disappear(&mut self) {
        self.session.pause();
    }

    /// Place an anchor in front of the camera.
    ///
    /// # Returns
    ///
    /// The new anchor id, `None` if the session has no frame yet.
    pub fn handle_tap(&mut self) -> Option<AnchorId> {
        place_anchor(&mut self.session, self.config.placement_distance)
    }

    /// The surface bounds changed, e.g. on rotation.
    pub fn drawable_size_will_change(&mut self, size: ImageSize) {
        self.surface.resize(size);
    }

    /// The surface asks for a new frame.
    pub fn draw(&mut self) {
        self.surface.draw();
    }

    /// Drain the pending session events without blocking.
    ///
    /// Events are only logged, failures and interruptions do not change the
    /// controller state. At most [`facear_tracking::MAX_PENDING_FRAMES`] frame
    /// events are kept between two calls, older frames are dropped by the session.
    ///
    /// # Returns
    ///
    /// The number of events drained.
    pub fn pump_events(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    log_event(&event);
                    count += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.events_connected {
                        log::warn!("session event channel closed");
                        self.events_connected = false;
                    }
                    break;
                }
            }
        }
        count
    }

    /// Returns false once the session stopped delivering events to the controller.
    pub fn is_receiving_events(&self) -> bool {
        self.events_connected
    }

    /// The field of view of the camera of the current frame.
    pub fn field_of_view(&self) -> Option<FieldOfView> {
        self.session
            .current_frame()
            .map(|frame| frame.camera.field_of_view())
    }

    /// The tracking session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// The tracking session, mutably.
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// The render surface.
    pub fn surface(&self) -> &RenderSurface<R> {
        &self.surface
    }
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::FrameUpdated(frame) => {
            log::trace!("frame {:.3}s, {} anchors", frame.timestamp, frame.anchors.len())
        }
        SessionEvent::AnchorsAdded(anchors)
        | SessionEvent::AnchorsUpdated(anchors)
        | SessionEvent::AnchorsRemoved(anchors) => {
            log::debug!("{}: {} anchors", event.name(), anchors.len())
        }
        SessionEvent::Failed(error) => log::warn!("session failed: {error}"),
        SessionEvent::InterruptionBegan => log::warn!("session interrupted"),
        SessionEvent::InterruptionEnded => log::info!("session interruption ended"),
    }
}
