use crate::error::SmoothError;

/// Parameters for a smoothing run
///
/// `window_size` is the side length of the averaging window. The window
/// radius is `window_size / 2`, so even sizes behave like the next lower
/// odd size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothConfig {
    window_size: u32,
    thread_count: usize,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            thread_count: 1,
        }
    }
}

impl SmoothConfig {
    pub const fn new(window_size: u32, thread_count: usize) -> Self {
        Self {
            window_size,
            thread_count,
        }
    }

    #[must_use]
    pub const fn with_window_size(mut self, window_size: u32) -> Self {
        self.window_size = window_size;
        self
    }

    #[must_use]
    pub const fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub const fn window_size(&self) -> u32 {
        self.window_size
    }

    pub const fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Half-width of the averaging window
    pub const fn radius(&self) -> u32 {
        self.window_size / 2
    }

    /// Checks the configuration against an image of the given size.
    ///
    /// # Errors
    ///
    /// * `EmptyImage` if either dimension is zero
    /// * `ZeroThreadCount` if no workers were requested
    /// * `TooManyThreads` if there are more workers than rows
    pub fn validate(&self, width: u32, height: u32) -> Result<(), SmoothError> {
        if width == 0 || height == 0 {
            return Err(SmoothError::EmptyImage);
        }
        if self.thread_count == 0 {
            return Err(SmoothError::ZeroThreadCount);
        }
        if self.thread_count > height as usize {
            return Err(SmoothError::TooManyThreads {
                thread_count: self.thread_count,
                height,
            });
        }
        Ok(())
    }
}
