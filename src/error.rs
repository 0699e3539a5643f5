use std::path::PathBuf;

use thiserror::Error;

/// Error type for smoothing operations
///
/// Configuration problems are reported before any worker thread is
/// started. Worker failures are reported after every worker has been joined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmoothError {
    /// The thread count was zero
    #[error("Thread count must be at least 1")]
    ZeroThreadCount,

    /// The source image has no pixels
    ///
    /// A zero width or height leaves nothing to partition.
    #[error("Image dimensions must be non-zero")]
    EmptyImage,

    /// More workers were requested than the image has rows
    ///
    /// Every worker must own at least one row, so `thread_count`
    /// may not exceed the image height.
    #[error("Thread count ({thread_count}) must not exceed image height ({height})")]
    TooManyThreads {
        /// Requested number of workers
        thread_count: usize,
        /// Height of the source image
        height: u32,
    },

    /// The operating system refused to start a worker thread
    #[error("Failed to spawn worker {worker}: {reason}")]
    SpawnFailed { worker: usize, reason: String },

    /// A worker thread panicked before finishing its rows
    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// The cancellation flag was raised while workers were running
    #[error("Smoothing was cancelled")]
    Cancelled,
}

/// Error type for reading and writing image files
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input file could not be opened or decoded
    #[error("Failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output file could not be encoded or written
    #[error("Failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
