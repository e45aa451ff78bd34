/// Unrounded output size of the resize calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSize {
    pub width: f64,
    pub height: f64,
}

impl ScaledSize {
    /// Rasterizes to whole pixels, never below 1x1.
    pub fn to_pixels(self) -> (u32, u32) {
        (
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

/// Fits `width`x`height` inside `max_width`x`max_height` preserving aspect ratio.
///
/// Images that already fit are returned unchanged; nothing is ever upscaled.
pub fn scale_to_fit(width: u32, height: u32, max_width: u32, max_height: u32) -> ScaledSize {
    let (w, h) = (width as f64, height as f64);

    if width <= max_width && height <= max_height {
        return ScaledSize {
            width: w,
            height: h,
        };
    }

    let ratio = (max_width as f64 / w).min(max_height as f64 / h);
    ScaledSize {
        width: w * ratio,
        height: h * ratio,
    }
}

pub fn target_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    scale_to_fit(width, height, max_width, max_height).to_pixels()
}
