use std::time::{Duration, Instant};

use facear_camera::ImageSize;

use crate::fps_counter::FpsCounter;

/// Draws the camera image and the anchors into the surface.
///
/// Both callbacks run on the render loop and should return within one refresh
/// interval of the surface.
pub trait Renderer {
    /// The drawable changed size, e.g. after a rotation or a layout change.
    fn drawable_size_changed(&mut self, size: ImageSize);

    /// Render one frame into the surface.
    fn update(&mut self);
}

/// Configuration of a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSurfaceConfig {
    /// The rate at which the surface asks for frames.
    pub preferred_frames_per_second: u32,
    /// Resize the drawable when the surface bounds change.
    pub auto_resize_drawable: bool,
    /// The drawable is only used as a render target, never read back.
    pub framebuffer_only: bool,
}

impl Default for RenderSurfaceConfig {
    fn default() -> Self {
        Self {
            preferred_frames_per_second: 30,
            auto_resize_drawable: true,
            framebuffer_only: false,
        }
    }
}

/// A GPU-backed surface that forwards size changes and frame requests to a renderer.
pub struct RenderSurface<R: Renderer> {
    renderer: R,
    config: RenderSurfaceConfig,
    drawable_size: ImageSize,
    fps_counter: FpsCounter,
    frames_over_budget: u64,
}

impl<R: Renderer> RenderSurface<R> {
    /// Create a surface drawing with `renderer`.
    pub fn new(renderer: R, config: RenderSurfaceConfig) -> Self {
        Self {
            renderer,
            config,
            drawable_size: ImageSize::default(),
            fps_counter: FpsCounter::new(),
            frames_over_budget: 0,
        }
    }

    /// The surface configuration.
    pub fn config(&self) -> &RenderSurfaceConfig {
        &self.config
    }

    /// The current drawable size.
    pub fn drawable_size(&self) -> ImageSize {
        self.drawable_size
    }

    /// The time a frame may take at the preferred frame rate.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.preferred_frames_per_second.max(1) as f64)
    }

    /// Notify the surface of new bounds.
    ///
    /// # Returns
    ///
    /// True if the renderer was told about a new drawable size. Empty sizes, unchanged
    /// sizes and surfaces without `auto_resize_drawable` are ignored.
    pub fn resize(&mut self, size: ImageSize) -> bool {
        if !self.config.auto_resize_drawable || size.is_empty() || size == self.drawable_size {
            return false;
        }

        log::debug!("drawable size {} -> {}", self.drawable_size, size);
        self.drawable_size = size;
        self.renderer.drawable_size_changed(size);
        true
    }

    /// Render one frame.
    ///
    /// # Returns
    ///
    /// The time spent in the renderer.
    pub fn draw(&mut self) -> Duration {
        let start = Instant::now();
        self.renderer.update();
        let elapsed = start.elapsed();

        self.fps_counter.update();

        let budget = self.frame_budget();
        if elapsed > budget {
            self.frames_over_budget += 1;
            log::warn!(
                "frame {} took {:?}, over the {:?} budget",
                self.fps_counter.frame_count(),
                elapsed,
                budget
            );
        }

        elapsed
    }

    /// The smoothed presentation rate.
    pub fn fps(&self) -> f32 {
        self.fps_counter.fps()
    }

    /// The number of frames drawn.
    pub fn frame_count(&self) -> u64 {
        self.fps_counter.frame_count()
    }

    /// The number of frames that exceeded the frame budget.
    pub fn frames_over_budget(&self) -> u64 {
        self.frames_over_budget
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
