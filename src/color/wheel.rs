//! Interactive color wheel with gradient hit-testing
//!
//! Renders a hue/saturation disc once per diameter and answers "what color
//! is at pixel (x, y)?" in O(1) by sampling the cached image:
//! - an angular sweep of hues (red, magenta, blue, cyan, green, yellow,
//!   back to red) around the center
//! - saturation ramping from zero at the center to full at the rim
//! - a one-pixel antialiased rim; everything outside the disc is
//!   transparent
//!
//! Sampling is a pure function of the rendered image and the position, so
//! the drag-to-pick contract reduces to "only act on `Some`".

use crate::color::HexColor;
use crate::constants::wheel::{RIM_FEATHER_PX, SWEEP_STOPS};
use image::{Rgba, RgbaImage};

/// A color wheel image of a fixed diameter
///
/// Construction renders the full bitmap; lookups never recompute gradient
/// math.
pub struct ColorWheel {
    diameter: u32,
    image: RgbaImage,
}

impl ColorWheel {
    /// Render a wheel image of `diameter` x `diameter` pixels
    pub fn new(diameter: u32) -> Self {
        let radius = diameter as f32 / 2.0;
        let mut image = RgbaImage::new(diameter, diameter);

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            // Distances are measured from the pixel center
            let dx = x as f32 + 0.5 - radius;
            let dy = y as f32 + 0.5 - radius;
            let dist = (dx * dx + dy * dy).sqrt();

            let coverage = ((radius - dist) / RIM_FEATHER_PX).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                // Outside the disc: stays fully transparent
                continue;
            }

            let hue = sweep_color(dx, dy);
            let saturation = (dist / radius).min(1.0);
            let blend = |channel: f32| -> u8 {
                (channel * saturation + 255.0 * (1.0 - saturation)).round() as u8
            };

            *pixel = Rgba([
                blend(hue[0]),
                blend(hue[1]),
                blend(hue[2]),
                (coverage * 255.0).round() as u8,
            ]);
        }

        Self { diameter, image }
    }

    /// Diameter this wheel was rendered at
    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// The rendered RGBA bitmap, for display
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The color under a pointer position, or `None` when the position
    /// does not select one
    ///
    /// Coordinates are clamped to non-negative values before truncating
    /// to a pixel. Returns `None` if the pixel is outside the image
    /// bounds or is not fully opaque (outside the drawn disc, or on the
    /// antialiased rim). Callers must treat `None` as "keep the previous
    /// selection", never as black or white.
    pub fn color_for_position(&self, x: f32, y: f32) -> Option<HexColor> {
        let px = x.max(0.0) as u32;
        let py = y.max(0.0) as u32;
        if px >= self.diameter || py >= self.diameter {
            return None;
        }

        let Rgba([r, g, b, a]) = *self.image.get_pixel(px, py);
        if a != u8::MAX {
            return None;
        }
        Some(HexColor::from_rgb(r, g, b))
    }
}

/// Fully saturated sweep-gradient color at the angle of (dx, dy),
/// interpolated linearly in RGB between adjacent stops
fn sweep_color(dx: f32, dy: f32) -> [f32; 3] {
    let mut turns = dy.atan2(dx) / std::f32::consts::TAU;
    if turns < 0.0 {
        turns += 1.0;
    }

    // Rounding can push `turns * segments` to exactly the segment count;
    // clamp the index so the seam stays in the last segment
    let position = turns * (SWEEP_STOPS.len() - 1) as f32;
    let index = (position as usize).min(SWEEP_STOPS.len() - 2);
    let frac = (position - index as f32).clamp(0.0, 1.0);

    let from = SWEEP_STOPS[index];
    let to = SWEEP_STOPS[index + 1];
    [
        from[0] as f32 + (to[0] as f32 - from[0] as f32) * frac,
        from[1] as f32 + (to[1] as f32 - from[1] as f32) * frac,
        from[2] as f32 + (to[2] as f32 - from[2] as f32) * frac,
    ]
}

/// Single-entry wheel memo keyed by diameter
///
/// The interactive layer re-renders only when the drawing surface is
/// resized; repeated lookups at the same diameter reuse the same bitmap.
#[derive(Default)]
pub struct WheelCache {
    current: Option<ColorWheel>,
}

impl WheelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The wheel for `diameter`, rendering it only when the diameter
    /// changed since the last call
    pub fn wheel(&mut self, diameter: u32) -> &ColorWheel {
        if self
            .current
            .as_ref()
            .map_or(true, |wheel| wheel.diameter() != diameter)
        {
            self.current = Some(ColorWheel::new(diameter));
        }
        self.current.get_or_insert_with(|| ColorWheel::new(diameter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::{FromColor, Hsv};

    fn saturation_of(color: HexColor) -> f32 {
        Hsv::from_color(color.to_srgb()).saturation
    }

    #[test]
    fn test_center_is_unsaturated_odd_diameter() {
        // Odd diameter puts a pixel center exactly on the wheel center
        let wheel = ColorWheel::new(101);
        let color = wheel.color_for_position(50.5, 50.5).unwrap();
        let (r, g, b) = color.rgb();
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(saturation_of(color), 0.0);
    }

    #[test]
    fn test_center_is_unsaturated_even_diameter() {
        // Even diameters sample half a pixel away from the true center,
        // so allow the residual saturation of that half-pixel offset
        let wheel = ColorWheel::new(100);
        let color = wheel.color_for_position(50.0, 50.0).unwrap();
        assert!(saturation_of(color) < 0.05);
    }

    #[test]
    fn test_angle_zero_near_rim_is_red() {
        // 255px wheel, pixel (252, 127) sits exactly on the +x axis
        let wheel = ColorWheel::new(255);
        let color = wheel.color_for_position(252.3, 127.2).unwrap();
        let (r, g, b) = color.rgb();
        assert_eq!(r, 255);
        assert_eq!(g, b);
        assert!(g < 10, "expected near-pure red, got ({r}, {g}, {b})");
    }

    #[test]
    fn test_outside_bounding_square_is_none() {
        let wheel = ColorWheel::new(64);
        assert!(wheel.color_for_position(64.0, 10.0).is_none());
        assert!(wheel.color_for_position(10.0, 64.0).is_none());
        assert!(wheel.color_for_position(1000.0, 1000.0).is_none());
    }

    #[test]
    fn test_corner_inside_square_outside_disc_is_none() {
        let wheel = ColorWheel::new(64);
        assert!(wheel.color_for_position(1.0, 1.0).is_none());
        assert!(wheel.color_for_position(62.5, 62.5).is_none());
    }

    #[test]
    fn test_negative_coordinates_clamp_to_origin() {
        // Clamping lands on the transparent corner pixel, not an error
        let wheel = ColorWheel::new(64);
        assert!(wheel.color_for_position(-10.0, -3.5).is_none());
    }

    #[test]
    fn test_antialiased_rim_is_not_selectable() {
        // Pixel (254, 127) of a 255px wheel is half-covered by the disc
        // edge; partial alpha must read as "no color"
        let wheel = ColorWheel::new(255);
        assert!(wheel.color_for_position(254.2, 127.4).is_none());
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let wheel = ColorWheel::new(128);
        let first = wheel.color_for_position(90.0, 40.0);
        let second = wheel.color_for_position(90.0, 40.0);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_sweep_covers_opposing_hues() {
        // Angle 0 is red territory; angle 180 lands on the cyan side
        let wheel = ColorWheel::new(255);
        let right = wheel.color_for_position(240.0, 127.2).unwrap();
        let left = wheel.color_for_position(14.0, 127.2).unwrap();
        let (r, _, _) = right.rgb();
        let (lr, lg, lb) = left.rgb();
        assert_eq!(r, 255);
        assert!(lg > lr && lb > lr, "expected cyan-side color, got ({lr}, {lg}, {lb})");
    }

    #[test]
    fn test_cache_reuses_wheel_for_same_diameter() {
        let mut cache = WheelCache::new();
        // Pixel buffer identity: a second lookup at the same diameter
        // must not re-render
        let first = cache.wheel(96).image().as_ptr();
        let second = cache.wheel(96).image().as_ptr();
        assert_eq!(first, second);

        // A new diameter re-renders
        assert_eq!(cache.wheel(128).diameter(), 128);
    }
}
