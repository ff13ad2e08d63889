use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
    thread::JoinHandle,
    time::Duration,
};

use facear_camera::{CameraIntrinsics, ImageSize};

use crate::{
    anchor::{Anchor, AnchorId},
    camera::Camera,
    configuration::{DeviceCapabilities, RunOptions, TrackingConfiguration},
    error::SessionError,
    event::{subscription, EventReceiver, EventSender, SessionEvent},
    frame::Frame,
    pose::Pose,
    session::TrackingSession,
};

#[derive(Default)]
struct SessionState {
    running: bool,
    interrupted: bool,
    configuration: Option<TrackingConfiguration>,
    current_frame: Option<Frame>,
    events: Option<EventSender>,
}

struct Shared {
    capabilities: DeviceCapabilities,
    state: Mutex<SessionState>,
    anchors: RwLock<Vec<Anchor>>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn anchors(&self) -> RwLockReadGuard<'_, Vec<Anchor>> {
        self.anchors.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn anchors_mut(&self) -> RwLockWriteGuard<'_, Vec<Anchor>> {
        self.anchors.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        let mut state = self.state();
        if let Some(sender) = state.events.as_ref() {
            if !sender.send(event) {
                log::debug!("session event receiver dropped, unsubscribing");
                state.events = None;
            }
        }
    }

    fn push_frame(&self, camera: Camera, timestamp: f64) -> bool {
        let frame = {
            let mut state = self.state();
            if !state.running || state.interrupted {
                return false;
            }
            let frame = Frame {
                timestamp,
                camera,
                anchors: self.anchors().clone(),
            };
            state.current_frame = Some(frame.clone());
            frame
        };

        log::trace!("frame at {timestamp:.3}s");
        self.emit(SessionEvent::FrameUpdated(frame));
        true
    }
}

/// A background thread feeding frames into the session.
struct Playback {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("playback thread panicked");
            }
        }
    }
}

/// An in-process tracking session.
///
/// Frames are either pushed by the caller with [`SimulatedSession::push_frame`]
/// or played back from a list of poses by a worker thread started with
/// [`SimulatedSession::start_playback`]. Cloning returns another handle to the
/// same session so a producer thread can feed frames while the owner places
/// anchors.
#[derive(Clone)]
pub struct SimulatedSession {
    shared: Arc<Shared>,
    playback: Arc<Mutex<Option<Playback>>>,
}

impl SimulatedSession {
    /// Create a paused session on a device with the given capabilities.
    pub fn new(capabilities: DeviceCapabilities) -> Self {
        Self {
            shared: Arc::new(Shared {
                capabilities,
                state: Mutex::new(SessionState::default()),
                anchors: RwLock::new(Vec::new()),
            }),
            playback: Arc::new(Mutex::new(None)),
        }
    }

    /// The capabilities of the simulated device.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.shared.capabilities
    }

    /// The configuration of the last successful run.
    pub fn configuration(&self) -> Option<TrackingConfiguration> {
        self.shared.state().configuration.clone()
    }

    /// Deliver a new frame.
    ///
    /// # Returns
    ///
    /// False if the frame was dropped because the session is paused or interrupted.
    pub fn push_frame(&self, camera: Camera, timestamp: f64) -> bool {
        self.shared.push_frame(camera, timestamp)
    }

    /// Start a worker thread that plays back `poses` in a loop at `fps`.
    ///
    /// The worker stops on [`pause`](TrackingSession::pause), when a new playback is
    /// started, or when the last handle to the session is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotRunning`] if the session is not running and
    /// [`SessionError::EmptyPlayback`] if there are no poses to play.
    pub fn start_playback(
        &self,
        poses: Vec<Pose>,
        intrinsics: CameraIntrinsics,
        image_resolution: ImageSize,
        fps: u32,
    ) -> Result<(), SessionError> {
        if !self.shared.state().running {
            return Err(SessionError::NotRunning);
        }

        if poses.is_empty() {
            return Err(SessionError::EmptyPlayback);
        }

        self.stop_playback();

        let fps = fps.max(1);
        let period = Duration::from_secs_f64(1.0 / fps as f64);
        let stop = Arc::new(AtomicBool::new(false));

        let handle = std::thread::spawn({
            let shared = self.shared.clone();
            let stop = stop.clone();
            move || {
                for (i, pose) in poses.iter().cycle().enumerate() {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    let camera = Camera::new(*pose, intrinsics, image_resolution);
                    shared.push_frame(camera, i as f64 / fps as f64);
                    std::thread::sleep(period);
                }
            }
        });

        log::debug!("playback started at {fps} fps");
        *self.playback.lock().unwrap_or_else(PoisonError::into_inner) = Some(Playback {
            stop,
            handle: Some(handle),
        });

        Ok(())
    }

    fn stop_playback(&self) {
        let playback = self
            .playback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        // joins the worker outside of the lock
        drop(playback);
    }

    /// Move an anchor to a new pose.
    ///
    /// # Returns
    ///
    /// False if the session does not know the anchor.
    pub fn update_anchor(&self, id: AnchorId, transform: Pose) -> bool {
        let updated = {
            let mut anchors = self.shared.anchors_mut();
            match anchors.iter_mut().find(|a| a.id() == id) {
                Some(anchor) => {
                    anchor.transform = transform;
                    *anchor
                }
                None => return false,
            }
        };
        self.shared.emit(SessionEvent::AnchorsUpdated(vec![updated]));
        true
    }

    /// Signal that tracking was interrupted. Frames are dropped until it ends.
    pub fn interrupt(&self) {
        self.shared.state().interrupted = true;
        log::debug!("session interrupted");
        self.shared.emit(SessionEvent::InterruptionBegan);
    }

    /// Signal the end of an interruption.
    pub fn end_interruption(&self) {
        self.shared.state().interrupted = false;
        log::debug!("session interruption ended");
        self.shared.emit(SessionEvent::InterruptionEnded);
    }

    /// Stop the session because of an error.
    pub fn fail(&self, error: SessionError) {
        self.shared.state().running = false;
        self.stop_playback();
        log::debug!("session failed: {error}");
        self.shared.emit(SessionEvent::Failed(error));
    }
}

impl TrackingSession for SimulatedSession {
    fn run(
        &mut self,
        configuration: &TrackingConfiguration,
        options: RunOptions,
    ) -> Result<(), SessionError> {
        configuration.validate(&self.shared.capabilities)?;

        {
            let mut state = self.shared.state();
            state.running = true;
            state.interrupted = false;
            state.configuration = Some(configuration.clone());
            if options.reset_tracking {
                state.current_frame = None;
            }
        }

        if options.remove_existing_anchors {
            let removed = std::mem::take(&mut *self.shared.anchors_mut());
            if !removed.is_empty() {
                log::debug!("removed {} anchors on run", removed.len());
                self.shared.emit(SessionEvent::AnchorsRemoved(removed));
            }
        }

        log::debug!("session running with {configuration:?}");
        Ok(())
    }

    fn pause(&mut self) {
        self.shared.state().running = false;
        self.stop_playback();
        log::debug!("session paused");
    }

    fn is_running(&self) -> bool {
        self.shared.state().running
    }

    fn current_frame(&self) -> Option<Frame> {
        self.shared.state().current_frame.clone()
    }

    fn add_anchor(&mut self, anchor: Anchor) {
        self.shared.anchors_mut().push(anchor);
        log::debug!("added {}", anchor.id());
        self.shared.emit(SessionEvent::AnchorsAdded(vec![anchor]));
    }

    fn remove_anchor(&mut self, id: AnchorId) -> bool {
        let removed = {
            let mut anchors = self.shared.anchors_mut();
            match anchors.iter().position(|a| a.id() == id) {
                Some(index) => anchors.remove(index),
                None => return false,
            }
        };
        log::debug!("removed {id}");
        self.shared.emit(SessionEvent::AnchorsRemoved(vec![removed]));
        true
    }

    fn anchors(&self) -> Vec<Anchor> {
        self.shared.anchors().clone()
    }

    fn subscribe(&mut self) -> EventReceiver {
        let (sender, receiver) = subscription();
        self.shared.state().events = Some(sender);
        receiver
    }
}
