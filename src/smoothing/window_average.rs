use std::ops::RangeInclusive;

use image::{Pixel, Rgb, Rgba};
use itertools::iproduct;

use crate::Image;

/// 8-bit pixel types whose first three channels are red, green and blue
///
/// Any channels past the third (alpha) are ignored by the averager.
pub trait ColorPixel: Pixel<Subpixel = u8> + Sync {}

impl ColorPixel for Rgb<u8> {}
impl ColorPixel for Rgba<u8> {}

/// Square neighborhood of a pixel clipped to the image bounds
///
/// Bounds are inclusive. Neighbors that would fall outside the image are
/// dropped rather than wrapped or mirrored, so windows at the border are
/// smaller than `(2 * radius + 1)²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    x_min: u32,
    y_min: u32,
    x_max: u32,
    y_max: u32,
}

impl Window {
    /// Clips the window of `radius` around `(x, y)` to a `width × height` image.
    ///
    /// `(x, y)` must lie inside the image.
    pub fn new(x: u32, y: u32, radius: u32, width: u32, height: u32) -> Self {
        debug_assert!(x < width && y < height);
        Self {
            x_min: x.saturating_sub(radius),
            y_min: y.saturating_sub(radius),
            x_max: x.saturating_add(radius).min(width.saturating_sub(1)),
            y_max: y.saturating_add(radius).min(height.saturating_sub(1)),
        }
    }

    pub fn columns(&self) -> RangeInclusive<u32> {
        self.x_min..=self.x_max
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.y_min..=self.y_max
    }

    /// Number of in-bounds pixels in the window, never zero
    pub fn count(&self) -> u64 {
        u64::from(self.x_max - self.x_min + 1) * u64::from(self.y_max - self.y_min + 1)
    }
}

/// Computes the unweighted mean color of the window around `(x, y)`.
///
/// Each channel is summed over every in-bounds neighbor and divided by the
/// neighbor count with truncating integer division.
///
/// # Panics
///
/// Panics if `(x, y)` lies outside `source`.
pub fn window_average<P: ColorPixel>(source: &Image<P>, x: u32, y: u32, radius: u32) -> Rgb<u8> {
    let (width, height) = source.dimensions();
    assert!(
        x < width && y < height,
        "pixel ({x}, {y}) is outside a {width}x{height} image"
    );

    let window = Window::new(x, y, radius, width, height);
    let channels = usize::from(P::CHANNEL_COUNT);
    let stride = width as usize * channels;
    let samples = source.as_raw();

    // u64 keeps very large windows from overflowing
    let mut sums = [0u64; 3];
    for (ny, nx) in iproduct!(window.rows(), window.columns()) {
        let index = ny as usize * stride + nx as usize * channels;
        for (sum, &sample) in sums.iter_mut().zip(&samples[index..index + 3]) {
            *sum += u64::from(sample);
        }
    }

    let count = window.count();
    Rgb(sums.map(|sum| (sum / count) as u8))
}
