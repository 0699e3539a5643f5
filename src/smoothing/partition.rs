use std::ops::Range;

use crate::error::SmoothError;

/// Splits `[0, height)` into `thread_count` contiguous row ranges.
///
/// Every worker gets `height / thread_count` rows. The remainder
/// `height % thread_count` is appended to the last range only, so the
/// last worker may carry up to `thread_count - 1` extra rows.
///
/// # Errors
///
/// * `ZeroThreadCount` if `thread_count` is zero
/// * `TooManyThreads` if `thread_count` exceeds `height`
pub fn partition_rows(height: u32, thread_count: usize) -> Result<Vec<Range<u32>>, SmoothError> {
    if thread_count == 0 {
        return Err(SmoothError::ZeroThreadCount);
    }
    if thread_count > height as usize {
        return Err(SmoothError::TooManyThreads {
            thread_count,
            height,
        });
    }

    // thread_count <= height, so it fits in u32
    let workers = thread_count as u32;
    let rows_per_worker = height / workers;
    let remainder = height % workers;

    Ok((0..workers)
        .map(|worker| {
            let start = worker * rows_per_worker;
            let mut end = start + rows_per_worker;
            if worker == workers - 1 {
                end += remainder;
            }
            start..end
        })
        .collect())
}
