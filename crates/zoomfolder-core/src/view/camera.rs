//! Pan/zoom camera with exponential smoothing toward a target.
//!
//! Gestures only ever move the *target*; [`Camera::update`] pulls the
//! current view a fraction of the way there each frame. World coordinates map
//! to the screen as `screen = (world + offset) * zoom`.

/// Rate constant for camera smoothing, per second.
pub const CAMERA_RATE: f32 = 12.0;

/// Zoom multiplier applied per wheel tick.
pub const ZOOM_STEP: f32 = 1.1;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 100.0;

/// Distance below which current and target count as equal.
const SETTLE_EPSILON: f32 = 1e-3;

/// Fraction of the remaining distance covered in one frame of `dt` seconds.
///
/// Clamped to 1 so a long frame snaps to the target instead of overshooting.
#[inline]
pub fn smoothing_fraction(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// One zoom/pan state, used both for the current view and the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CameraView {
    /// Zoom 1, no pan.
    pub const HOME: Self = Self {
        zoom: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        (world_x + self.offset_x) * self.zoom
    }

    #[inline]
    pub fn to_screen_y(&self, world_y: f32) -> f32 {
        (world_y + self.offset_y) * self.zoom
    }

    /// World coordinate under a screen point.
    #[inline]
    pub fn to_world(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (
            screen_x / self.zoom - self.offset_x,
            screen_y / self.zoom - self.offset_y,
        )
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Self::HOME
    }
}

/// Wheel direction of one zoom tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Camera state for one view, including its drag gesture.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    current: CameraView,
    target: CameraView,
    dragging: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap both current and target home and end any drag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The view to draw this frame.
    #[inline]
    pub fn view(&self) -> CameraView {
        self.current
    }

    /// Where the view is heading.
    #[inline]
    pub fn target(&self) -> CameraView {
        self.target
    }

    /// World point drawn at a screen position this frame.
    pub fn world_at(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        self.current.to_world(screen_x, screen_y)
    }

    /// World point that will sit at a screen position once settled.
    pub fn target_world_at(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        self.target.to_world(screen_x, screen_y)
    }

    /// Advance the smoothing by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let t = smoothing_fraction(CAMERA_RATE, dt);
        let (cur, tgt) = (&mut self.current, &self.target);
        if t >= 1.0 {
            *cur = *tgt;
            return;
        }
        cur.zoom += (tgt.zoom - cur.zoom) * t;
        cur.offset_x += (tgt.offset_x - cur.offset_x) * t;
        cur.offset_y += (tgt.offset_y - cur.offset_y) * t;
    }

    /// `true` once the current view has caught up with the target.
    pub fn is_settled(&self) -> bool {
        let (c, t) = (&self.current, &self.target);
        (c.zoom - t.zoom).abs() < SETTLE_EPSILON
            && (c.offset_x - t.offset_x).abs() < SETTLE_EPSILON
            && (c.offset_y - t.offset_y).abs() < SETTLE_EPSILON
    }

    /// Zoom one tick around a pointer position, keeping the world point under
    /// the pointer fixed (as far as the pan clamp allows).
    pub fn zoom_at(
        &mut self,
        pointer_x: f32,
        pointer_y: f32,
        direction: ZoomDirection,
        viewport_width: f32,
    ) {
        let (world_x, world_y) = self.target.to_world(pointer_x, pointer_y);
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };

        self.target.zoom = (self.target.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.target.offset_x = pointer_x / self.target.zoom - world_x;
        self.target.offset_y = pointer_y / self.target.zoom - world_y;
        self.clamp_target(viewport_width);
    }

    /// Primary button went down over the view.
    pub fn press(&mut self) {
        self.dragging = true;
    }

    /// Primary button released.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pan by a pointer movement in screen pixels, if a drag is in progress.
    ///
    /// The delta is scaled by the *current* zoom so content tracks the
    /// pointer. Returns whether the move was applied.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_width: f32) -> bool {
        if !self.dragging {
            return false;
        }
        self.target.offset_x += dx / self.current.zoom;
        self.target.offset_y += dy / self.current.zoom;
        self.clamp_target(viewport_width);
        true
    }

    /// Keep the content's top edge at or above the viewport top and its
    /// horizontal extent covering the viewport.
    fn clamp_target(&mut self, viewport_width: f32) {
        let width = viewport_width.max(0.0);
        let t = &mut self.target;
        t.offset_y = t.offset_y.min(0.0);
        let min_x = width / t.zoom - width;
        t.offset_x = t.offset_x.max(min_x).min(0.0);
    }
}
