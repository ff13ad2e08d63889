use std::time::Instant;

/// The smoothing factor for the FPS calculation.
const SMOOTHING: f32 = 0.95;

/// A frame per second (FPS) counter with exponential smoothing.
///
/// # Examples
///
/// ```
/// use facear_view::FpsCounter;
///
/// let mut fps_counter = FpsCounter::new();
///
/// for _ in 0..100 {
///    fps_counter.update();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    last_time: Option<Instant>,
    frame_count: u64,
    fps: f32,
}

impl FpsCounter {
    /// Creates a new `FpsCounter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the smoothed FPS, zero until two frames were counted.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Returns the number of frames counted.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Counts a frame presented now.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Counts a frame presented at `now`.
    pub fn update_at(&mut self, now: Instant) {
        self.frame_count += 1;

        let Some(last_time) = self.last_time.replace(now) else {
            return;
        };

        let elapsed = now.saturating_duration_since(last_time).as_secs_f32();
        if elapsed <= 0.0 {
            return;
        }

        let instant_fps = 1.0 / elapsed;
        self.fps = if self.fps == 0.0 {
            instant_fps
        } else {
            self.fps * SMOOTHING + instant_fps * (1.0 - SMOOTHING)
        };
    }
}
