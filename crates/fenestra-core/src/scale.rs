//! Integer GUI scale derived from the viewport.

use crate::{Vec2, Viewport};

/// Upper bound on the multiplier search; no real display gets near it.
const SCALE_SEARCH_LIMIT: u32 = 1024;

/// Falls back to 1.0 for zero, negative or non-finite ratios.
pub fn sanitize_dpr(dpr: f32) -> f32 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        log::warn!("ignoring device pixel ratio {dpr}, using 1.0");
        1.0
    }
}

/// Largest multiplier whose scaled base resolution still fits strictly inside
/// the viewport on both axes, never less than 1.
pub fn max_scale(viewport: Viewport, base_width: u32, base_height: u32, dpr: f32) -> u32 {
    let dpr = sanitize_dpr(dpr);
    let bw = base_width.max(1) as f32 * dpr;
    let bh = base_height.max(1) as f32 * dpr;
    let (vx, vy) = (viewport.width as f32, viewport.height as f32);

    let mut i = 1u32;
    while i < SCALE_SEARCH_LIMIT && vx > bw * i as f32 && vy > bh * i as f32 {
        i += 1;
    }
    (i - 1).max(1)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    /// User preference.
    pub desired: u32,
    /// Largest multiplier that fits the current viewport.
    pub max: u32,
    /// `desired` clamped into `1..=max`.
    pub current: u32,
    /// Device pixel ratio observed with the last resize.
    pub dpr: f32,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ScaleState {
    pub fn new(desired: u32) -> Self {
        let max = desired.max(1);
        Self {
            desired,
            max,
            current: max,
            dpr: 1.0,
        }
    }

    pub fn recompute(&mut self, viewport: Viewport, base_width: u32, base_height: u32, dpr: f32) {
        self.dpr = sanitize_dpr(dpr);
        self.max = max_scale(viewport, base_width, base_height, self.dpr);
        self.clamp_current();
    }

    pub fn set_desired(&mut self, desired: u32) {
        self.desired = desired;
        self.clamp_current();
    }

    fn clamp_current(&mut self) {
        self.current = self.desired.clamp(1, self.max);
    }

    /// Device pixels per logical pixel.
    pub fn pixel_ratio(&self) -> f32 {
        self.current as f32 * self.dpr
    }

    pub fn to_logical(&self, device: Vec2) -> Vec2 {
        device.divide_scalar(self.pixel_ratio())
    }

    /// Logical size of the whole viewport, floored.
    pub fn logical_frame(&self, viewport: Viewport) -> Vec2 {
        self.to_logical(viewport.as_vec2()).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_for_common_viewports() {
        assert_eq!(max_scale(Viewport::new(640, 480), 320, 240, 1.0), 1);
        // i = 1, 2, 3 pass; i = 4 stops at 1280 > 1280.
        assert_eq!(max_scale(Viewport::new(1280, 960), 320, 240, 1.0), 3);
        assert_eq!(max_scale(Viewport::new(1281, 961), 320, 240, 1.0), 4);
        assert_eq!(max_scale(Viewport::new(1920, 1080), 320, 240, 1.0), 4);
        assert_eq!(max_scale(Viewport::new(1920, 1080), 320, 240, 2.0), 2);
        assert_eq!(max_scale(Viewport::new(100, 100), 320, 240, 1.0), 1);
    }

    #[test]
    fn max_scale_is_monotonic() {
        let mut last = 0;
        for w in (0..4000).step_by(37) {
            let h = w * 3 / 4;
            let m = max_scale(Viewport::new(w, h), 320, 240, 1.5);
            assert!(m >= last, "{w}x{h}: {m} < {last}");
            assert!(m >= 1);
            last = m;
        }
    }

    #[test]
    fn bad_dpr_falls_back_to_one() {
        let v = Viewport::new(1280, 960);
        assert_eq!(max_scale(v, 320, 240, 0.0), max_scale(v, 320, 240, 1.0));
        assert_eq!(max_scale(v, 320, 240, f32::NAN), max_scale(v, 320, 240, 1.0));
        let huge = Viewport::new(4000, 4000);
        assert_eq!(max_scale(huge, 0, 0, 1.0), SCALE_SEARCH_LIMIT - 1);
    }

    #[test]
    fn current_is_clamped_both_ways() {
        let mut s = ScaleState::new(2);
        s.recompute(Viewport::new(640, 480), 320, 240, 1.0);
        assert_eq!((s.max, s.current), (1, 1));

        s.recompute(Viewport::new(1920, 1080), 320, 240, 1.0);
        assert_eq!((s.max, s.current), (4, 2));

        s.set_desired(9);
        assert_eq!(s.current, 4);
        s.set_desired(0);
        assert_eq!(s.current, 1);
    }

    #[test]
    fn logical_frame_divides_by_scale_and_dpr() {
        let mut s = ScaleState::new(2);
        s.recompute(Viewport::new(1920, 1080), 320, 240, 1.5);
        // max = 2 (1920 > 960, 1080 > 720; then 1920 > 1440, 1080 > 1080 fails)
        assert_eq!(s.current, 2);
        assert_eq!(s.pixel_ratio(), 3.0);
        assert_eq!(s.logical_frame(Viewport::new(1920, 1080)), Vec2::new(640.0, 360.0));
        assert_eq!(s.to_logical(Vec2::new(30.0, 45.0)), Vec2::new(10.0, 15.0));
    }
}
