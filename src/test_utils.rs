//! Test utilities for imageops-smooth
//!
//! This module provides common fixtures for testing smoothing operations.
//! It is only compiled when running tests.

use image::Rgb;

use crate::Image;

/// Creates a 2x2 RGB image with known pixel values:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_rgb_image() -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgb([200, 150, 100]));
    image.put_pixel(1, 0, Rgb([100, 200, 150]));
    image.put_pixel(0, 1, Rgb([150, 100, 200]));
    image.put_pixel(1, 1, Rgb([50, 75, 25]));
    image
}

/// Creates an RGB image whose channels vary with position, so that no two
/// neighboring windows share the same mean.
pub fn create_gradient_rgb_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    Image::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 37 + y * 11) % 256) as u8,
            ((x * 5 + y * 53) % 256) as u8,
            ((x * y * 7 + 19) % 256) as u8,
        ])
    })
}

/// Box mean computed the slow way: visit every offset in `[-radius, radius]²`
/// and skip the ones that land outside the image.
pub fn naive_box_mean(image: &Image<Rgb<u8>>, radius: u32) -> Image<Rgb<u8>> {
    let (width, height) = image.dimensions();
    let d = i64::from(radius);

    Image::from_fn(width, height, |x, y| {
        let mut sums = [0u64; 3];
        let mut count = 0u64;
        for i in -d..=d {
            for j in -d..=d {
                let (nx, ny) = (i64::from(x) + j, i64::from(y) + i);
                if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                    continue;
                }
                let pixel = image.get_pixel(nx as u32, ny as u32);
                for (sum, &sample) in sums.iter_mut().zip(pixel.0.iter()) {
                    *sum += u64::from(sample);
                }
                count += 1;
            }
        }
        Rgb(sums.map(|sum| (sum / count) as u8))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgb_image_with_valid_input_creates_image() {
        let image = create_test_rgb_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 150, 100]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([50, 75, 25]));
    }

    #[test]
    fn naive_box_mean_with_zero_radius_is_identity() {
        let image = create_gradient_rgb_image(5, 3);
        assert_eq!(naive_box_mean(&image, 0), image);
    }
}
