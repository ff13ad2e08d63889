use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Arc,
    },
    time::Duration,
};

use crate::{anchor::Anchor, error::SessionError, frame::Frame};

/// A notification delivered by a tracking session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new frame is available.
    FrameUpdated(Frame),
    /// Anchors were added to the session.
    AnchorsAdded(Vec<Anchor>),
    /// Anchors changed their pose.
    AnchorsUpdated(Vec<Anchor>),
    /// Anchors were removed from the session.
    AnchorsRemoved(Vec<Anchor>),
    /// The session stopped because of an error.
    Failed(SessionError),
    /// Tracking was interrupted, no frames are delivered until it ends.
    InterruptionBegan,
    /// Tracking resumed after an interruption.
    InterruptionEnded,
}

impl SessionEvent {
    /// A short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::FrameUpdated(_) => "frame_updated",
            SessionEvent::AnchorsAdded(_) => "anchors_added",
            SessionEvent::AnchorsUpdated(_) => "anchors_updated",
            SessionEvent::AnchorsRemoved(_) => "anchors_removed",
            SessionEvent::Failed(_) => "failed",
            SessionEvent::InterruptionBegan => "interruption_began",
            SessionEvent::InterruptionEnded => "interruption_ended",
        }
    }
}

/// The maximum number of `FrameUpdated` events waiting in a subscription.
///
/// Once reached, new frames are not queued until the subscriber receives one.
/// Anchor, failure and interruption events are always queued. The latest frame
/// stays available through [`TrackingSession::current_frame`](crate::TrackingSession::current_frame).
pub const MAX_PENDING_FRAMES: usize = 8;

/// Create a connected sender and receiver pair.
pub(crate) fn subscription() -> (EventSender, EventReceiver) {
    let (sender, receiver) = mpsc::channel();
    let pending_frames = Arc::new(AtomicUsize::new(0));
    (
        EventSender {
            sender,
            pending_frames: pending_frames.clone(),
        },
        EventReceiver {
            receiver,
            pending_frames,
        },
    )
}

/// The session side of a subscription.
pub(crate) struct EventSender {
    sender: Sender<SessionEvent>,
    pending_frames: Arc<AtomicUsize>,
}

impl EventSender {
    /// Queue an event, dropping frames over the backlog limit.
    ///
    /// Returns false if the receiver is gone.
    pub(crate) fn send(&self, event: SessionEvent) -> bool {
        let is_frame = matches!(event, SessionEvent::FrameUpdated(_));
        if is_frame {
            if self.pending_frames.load(Ordering::Acquire) >= MAX_PENDING_FRAMES {
                log::trace!("frame backlog full, dropping frame event");
                return true;
            }
            self.pending_frames.fetch_add(1, Ordering::AcqRel);
        }

        if self.sender.send(event).is_err() {
            if is_frame {
                self.pending_frames.fetch_sub(1, Ordering::AcqRel);
            }
            return false;
        }
        true
    }
}

/// The subscriber side of a session event channel.
///
/// Disconnects once the session drops the subscription, either because the
/// session is gone or because another subscriber replaced this one.
pub struct EventReceiver {
    receiver: Receiver<SessionEvent>,
    pending_frames: Arc<AtomicUsize>,
}

impl EventReceiver {
    fn received(&self, event: SessionEvent) -> SessionEvent {
        if matches!(event, SessionEvent::FrameUpdated(_)) {
            self.pending_frames.fetch_sub(1, Ordering::AcqRel);
        }
        event
    }

    /// Receive an event without blocking.
    pub fn try_recv(&self) -> Result<SessionEvent, TryRecvError> {
        self.receiver.try_recv().map(|event| self.received(event))
    }

    /// Block until an event arrives or the timeout elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.receiver
            .recv_timeout(timeout)
            .map(|event| self.received(event))
    }

    /// Iterate over the events already queued, without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = SessionEvent> + '_ {
        std::iter::from_fn(move || self.try_recv().ok())
    }

    /// The number of frame events waiting to be received.
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{camera::Camera, pose::Pose};
    use facear_camera::{CameraIntrinsics, ImageSize};

    fn frame(timestamp: f64) -> SessionEvent {
        let size = ImageSize::new(640, 480);
        SessionEvent::FrameUpdated(Frame {
            timestamp,
            camera: Camera::new(
                Pose::IDENTITY,
                CameraIntrinsics::centered(500.0, 500.0, size),
                size,
            ),
            anchors: Vec::new(),
        })
    }

    #[test]
    fn test_frame_backlog_is_bounded() {
        let (sender, receiver) = subscription();
        for i in 0..100 {
            assert!(sender.send(frame(i as f64)));
        }
        assert!(sender.send(SessionEvent::InterruptionBegan));

        assert_eq!(receiver.pending_frames(), MAX_PENDING_FRAMES);
        let names: Vec<_> = receiver.try_iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), MAX_PENDING_FRAMES + 1);
        assert_eq!(names.last(), Some(&"interruption_began"));
        assert_eq!(receiver.pending_frames(), 0);

        // receiving frees room for new frames
        assert!(sender.send(frame(100.0)));
        assert_eq!(receiver.pending_frames(), 1);
    }

    #[test]
    fn test_send_fails_once_receiver_dropped() {
        let (sender, receiver) = subscription();
        drop(receiver);
        assert!(!sender.send(SessionEvent::InterruptionEnded));
        assert!(!sender.send(frame(0.0)));
    }
}
