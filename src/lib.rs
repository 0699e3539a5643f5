mod codec;
mod error;
mod smoothing;
#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use codec::{open_rgb, save_rgb};
pub use error::{CodecError, SmoothError};
pub use smoothing::config::SmoothConfig;
pub use smoothing::partition::partition_rows;
pub use smoothing::smooth::Smooth;
pub use smoothing::window_average::{window_average, ColorPixel, Window};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
