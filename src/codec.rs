//! Thin file I/O around the `image` crate.

use std::path::Path;

use image::Rgb;
use log::debug;

use crate::error::CodecError;
use crate::Image;

/// Decodes an image file into 8-bit RGB.
///
/// Channels past the third are dropped and grayscale inputs are expanded,
/// so the result always has exactly three channels.
pub fn open_rgb(path: impl AsRef<Path>) -> Result<Image<Rgb<u8>>, CodecError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| CodecError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Decoded {}: {}x{} {:?}",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    Ok(decoded.to_rgb8())
}

/// Encodes `image` to `path`, picking the format from the file extension.
pub fn save_rgb(image: &Image<Rgb<u8>>, path: impl AsRef<Path>) -> Result<(), CodecError> {
    let path = path.as_ref();
    image.save(path).map_err(|source| CodecError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
