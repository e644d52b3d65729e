//! Cell brightness sampling.

use image::{GenericImageView, Pixel};

use crate::sizing::CellRect;

/// Pixels with alpha below this value do not contribute to a cell.
pub const ALPHA_VISIBILITY_THRESHOLD: u8 = 10;

/// Contrast factor applied when high contrast is enabled.
pub const HIGH_CONTRAST_FACTOR: f64 = 1.7;

const BT709_R_WEIGHT: f64 = 0.2126;
const BT709_G_WEIGHT: f64 = 0.7152;
const BT709_B_WEIGHT: f64 = 0.0722;

/// Relative luminance of an sRGB pixel, normalised to 0.0..=1.0.
#[inline]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let weighted = BT709_R_WEIGHT * f64::from(r)
        + BT709_G_WEIGHT * f64::from(g)
        + BT709_B_WEIGHT * f64::from(b);
    weighted / 255.0
}

#[inline]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Stretch a brightness value away from the 0.5 midpoint.
#[inline]
pub fn apply_contrast(luminance: f64, factor: f64) -> f64 {
    clamp01((luminance - 0.5) * factor + 0.5)
}

/// Average brightness of the pixels inside `rect`.
///
/// The rectangle is clamped to the image; an empty or fully transparent
/// cell yields 0.0. The result is always within 0.0..=1.0.
///
/// ## Example
///
/// ```rust
/// use glyphcast_core::{sample_luminance, CellRect};
/// use image::{Rgba, RgbaImage};
///
/// let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
/// let luma = sample_luminance(&img, CellRect::new(0, 0, 2, 2), false);
/// assert!((luma - 1.0).abs() < 1e-9);
///
/// // Outside the image: nothing to sample
/// assert_eq!(sample_luminance(&img, CellRect::new(10, 10, 12, 12), false), 0.0);
/// ```
pub fn sample_luminance<I>(img: &I, rect: CellRect, high_contrast: bool) -> f64
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let rect = rect.clamp_to(img.width(), img.height());
    if rect.is_empty() {
        return 0.0;
    }

    let mut luma_sum = 0.0;
    let mut sample_count = 0u64;

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let [r, g, b, a] = img.get_pixel(x, y).to_rgba().0;
            if a < ALPHA_VISIBILITY_THRESHOLD {
                continue;
            }
            luma_sum += relative_luminance(r, g, b);
            sample_count += 1;
        }
    }

    let mut cell_luma = if sample_count == 0 {
        0.0
    } else {
        luma_sum / sample_count as f64
    };

    if high_contrast {
        cell_luma = apply_contrast(cell_luma, HIGH_CONTRAST_FACTOR);
    }

    clamp01(cell_luma)
}
