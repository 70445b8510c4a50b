use crate::Viewport;

/// A resize notification as reported by the host.
///
/// Hosts either report the surface in device pixels directly or in logical
/// (CSS-like) pixels together with the device pixel ratio. Both are reduced to
/// a device-pixel [`Viewport`] by [`ResizeObservation::normalize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeObservation {
    DevicePixels { width: u32, height: u32, dpr: f32 },
    Logical { width: f32, height: f32, dpr: f32 },
}

impl ResizeObservation {
    /// Device-pixel viewport and the ratio it was observed with. Negative or
    /// NaN logical sizes saturate to zero; the caller clamps to 1x1.
    pub fn normalize(&self) -> (Viewport, f32) {
        match *self {
            ResizeObservation::DevicePixels { width, height, dpr } => {
                (Viewport::new(width, height), dpr)
            }
            ResizeObservation::Logical { width, height, dpr } => {
                let w = (width * dpr).floor() as u32;
                let h = (height * dpr).floor() as u32;
                (Viewport::new(w, h), dpr)
            }
        }
    }
}

/// Native events the core consumes. Pointer coordinates are device pixels
/// relative to the output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Resized(ResizeObservation),
    PointerMoved { x: f32, y: f32 },
    PointerDown,
}
