/// Upper bound for the device pixel ratio
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Size of the display surface in surface pixels, plus the supersampling ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Viewport {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Width / height; 1.0 for an empty surface
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Size of the backing render buffer
    pub fn buffer_size(&self) -> (usize, usize) {
        (
            (self.width as f32 * self.pixel_ratio).round() as usize,
            (self.height as f32 * self.pixel_ratio).round() as usize,
        )
    }
}

/// Keeps the ratio within `1.0..=MAX_PIXEL_RATIO`
pub fn clamp_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() {
        ratio.clamp(1.0, MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_clamped() {
        assert_eq!(Viewport::new(10, 10, 3.0).pixel_ratio, 2.0);
        assert_eq!(Viewport::new(10, 10, 0.5).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(10, 10, f32::NAN).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(10, 10, 1.5).pixel_ratio, 1.5);
    }

    #[test]
    fn buffer_scales_with_ratio() {
        let viewport = Viewport::new(800, 600, 2.0);
        assert_eq!(viewport.buffer_size(), (1600, 1200));
        assert_eq!(viewport.aspect(), 800.0 / 600.0);
        assert_eq!(Viewport::new(5, 0, 1.0).aspect(), 1.0);
    }
}
