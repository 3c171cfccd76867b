/// Drawing-buffer size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

impl BufferSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Display-side view of the output surface: logical size plus scale factor.
///
/// The drawing buffer a renderer writes into should track
/// `floor(display × scale_factor)`, but it is only required to catch up once
/// per frame, not on every window-system event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    /// Logical width in display pixels.
    pub display_width: f32,
    /// Logical height in display pixels.
    pub display_height: f32,
    /// Ratio between physical and logical pixels (winit `scale_factor`).
    pub scale_factor: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(display_width: f32, display_height: f32, scale_factor: f64) -> Self {
        Self {
            display_width,
            display_height,
            scale_factor,
        }
    }

    /// The drawing-buffer size this display size calls for.
    #[inline]
    pub fn target_buffer_size(self) -> BufferSize {
        BufferSize {
            width: (self.display_width as f64 * self.scale_factor).floor() as u32,
            height: (self.display_height as f64 * self.scale_factor).floor() as u32,
        }
    }

    /// Resize decision rule: true iff `current` does not exactly match the
    /// target buffer size. Checking before resizing avoids redundant surface
    /// and depth-texture reallocation every frame.
    #[inline]
    pub fn needs_resize(self, current: BufferSize) -> bool {
        current != self.target_buffer_size()
    }

    /// Display aspect ratio (width / height). Falls back to 1 for degenerate
    /// heights so camera projection stays finite.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.display_height > 0.0 {
            self.display_width / self.display_height
        } else {
            1.0
        }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.display_width > 0.0
            && self.display_height > 0.0
            && self.display_width.is_finite()
            && self.display_height.is_finite()
            && self.scale_factor > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── resize predicate ──────────────────────────────────────────────────

    #[test]
    fn fresh_buffer_triggers_resize() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert!(vp.needs_resize(BufferSize::new(0, 0)));
        assert_eq!(vp.target_buffer_size(), BufferSize::new(800, 600));
    }

    #[test]
    fn matching_buffer_does_not_trigger() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert!(!vp.needs_resize(BufferSize::new(800, 600)));
    }

    #[test]
    fn either_axis_mismatch_triggers() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert!(vp.needs_resize(BufferSize::new(800, 599)));
        assert!(vp.needs_resize(BufferSize::new(799, 600)));
    }

    #[test]
    fn scale_factor_is_floored() {
        // 640 × 1.5 = 960, 480 × 1.5 = 720
        let vp = Viewport::new(640.0, 480.0, 1.5);
        assert_eq!(vp.target_buffer_size(), BufferSize::new(960, 720));

        // 801 × 1.25 = 1001.25 → floor 1001
        let vp = Viewport::new(801.0, 600.0, 1.25);
        assert_eq!(vp.target_buffer_size().width, 1001);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        let mut buffer = BufferSize::new(0, 0);
        let mut resizes = 0;

        // Two frames with no display change in between: at most one resize.
        for _ in 0..2 {
            if vp.needs_resize(buffer) {
                buffer = vp.target_buffer_size();
                resizes += 1;
            }
        }

        assert_eq!(resizes, 1);
        assert_eq!(buffer, BufferSize::new(1600, 1200));
    }

    // ── aspect ────────────────────────────────────────────────────────────

    #[test]
    fn aspect_matches_display_ratio() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert!((vp.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_is_invalid_but_aspect_is_finite() {
        let vp = Viewport::new(800.0, 0.0, 1.0);
        assert!(!vp.is_valid());
        assert_eq!(vp.aspect(), 1.0);
    }
}
