use std::{collections::BTreeSet, path::Path};

use facear_camera::VideoFormat;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SessionError};

/// The image height of the preferred capture format.
pub const PREFERRED_VIDEO_HEIGHT: usize = 720;

/// The frame rate of the preferred capture format.
pub const PREFERRED_FRAMES_PER_SECOND: u32 = 30;

/// Orientation of the planes to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDetection {
    /// Planes perpendicular to gravity.
    Horizontal,
    /// Planes parallel to gravity.
    Vertical,
}

/// Additional per-frame outputs requested from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSemantics {
    /// No additional outputs.
    #[default]
    None,
    /// Segment people in the camera image.
    PersonSegmentation,
}

/// What the device running the session is able to track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCapabilities {
    /// The front camera can track the user's face during world tracking.
    pub supports_user_face_tracking: bool,
    /// People segmentation is available as a frame semantic.
    pub supports_person_segmentation: bool,
    /// The capture formats of the world-facing camera.
    pub supported_video_formats: Vec<VideoFormat>,
}

/// The capabilities requested from a tracking session.
///
/// A configuration is immutable while the session runs, changing it means
/// running the session again with the new value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfiguration {
    /// The plane orientations to detect.
    pub plane_detection: BTreeSet<PlaneDetection>,
    /// Track the user's face with the front camera.
    pub user_face_tracking_enabled: bool,
    /// Additional per-frame outputs.
    pub frame_semantics: FrameSemantics,
    /// The capture format, `None` keeps the session default.
    pub video_format: Option<VideoFormat>,
}

impl TrackingConfiguration {
    /// Build the world tracking configuration used by the camera controller.
    ///
    /// Detects horizontal and vertical planes and enables face tracking and
    /// person segmentation when the device supports them. The capture format is
    /// a 720p format, preferably at 30 fps, when the device offers one.
    pub fn world_tracking(capabilities: &DeviceCapabilities) -> Self {
        let mut configuration = Self::default()
            .with_plane_detection([PlaneDetection::Horizontal, PlaneDetection::Vertical]);

        if capabilities.supports_user_face_tracking {
            configuration.user_face_tracking_enabled = true;
        }

        if capabilities.supports_person_segmentation {
            configuration.frame_semantics = FrameSemantics::PersonSegmentation;
        }

        configuration.video_format = VideoFormat::select(
            &capabilities.supported_video_formats,
            PREFERRED_VIDEO_HEIGHT,
            PREFERRED_FRAMES_PER_SECOND,
        );

        configuration
    }

    /// Set the plane orientations to detect.
    pub fn with_plane_detection(
        mut self,
        planes: impl IntoIterator<Item = PlaneDetection>,
    ) -> Self {
        self.plane_detection = planes.into_iter().collect();
        self
    }

    /// Enable or disable user face tracking.
    pub fn with_user_face_tracking(mut self, enabled: bool) -> Self {
        self.user_face_tracking_enabled = enabled;
        self
    }

    /// Set the frame semantics.
    pub fn with_frame_semantics(mut self, semantics: FrameSemantics) -> Self {
        self.frame_semantics = semantics;
        self
    }

    /// Set the capture format.
    pub fn with_video_format(mut self, format: VideoFormat) -> Self {
        self.video_format = Some(format);
        self
    }

    /// Check that the device can provide everything the configuration requests.
    pub fn validate(&self, capabilities: &DeviceCapabilities) -> Result<(), SessionError> {
        if self.user_face_tracking_enabled && !capabilities.supports_user_face_tracking {
            return Err(SessionError::UnsupportedConfiguration(
                "user face tracking".to_string(),
            ));
        }

        if self.frame_semantics == FrameSemantics::PersonSegmentation
            && !capabilities.supports_person_segmentation
        {
            return Err(SessionError::UnsupportedConfiguration(
                "person segmentation".to_string(),
            ));
        }

        if let Some(format) = self.video_format {
            if !capabilities.supported_video_formats.contains(&format) {
                return Err(SessionError::UnsupportedConfiguration(format!(
                    "video format {format}"
                )));
            }
        }

        Ok(())
    }

    /// Parse a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize the configuration as pretty printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Options applied when (re)running a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Discard the current camera pose and start tracking from scratch.
    pub reset_tracking: bool,
    /// Remove every anchor registered with the session.
    pub remove_existing_anchors: bool,
}

impl RunOptions {
    /// Reset tracking and remove existing anchors.
    pub fn reset() -> Self {
        Self {
            reset_tracking: true,
            remove_existing_anchors: true,
        }
    }
}
