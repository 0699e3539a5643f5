use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ScopedJoinHandle};

use image::{ImageBuffer, Rgb};
use log::{debug, trace, warn};

use crate::error::SmoothError;
use crate::smoothing::config::SmoothConfig;
use crate::smoothing::partition::partition_rows;
use crate::smoothing::window_average::{window_average, ColorPixel};
use crate::Image;

const OUTPUT_CHANNELS: usize = 3;

type WorkerResult = Result<(), SmoothError>;

/// 行分割されたワーカースレッドでボックス平滑化を適用するトレイト
///
/// 画像の行を `thread_count` 個の連続した範囲に分割し、
/// 各ワーカーが自分の範囲の出力行だけを書き込みます。
/// 出力領域は互いに重ならないため、ロックは不要です。
pub trait Smooth {
    /// 平滑化処理の出力型
    type Output;

    /// 平滑化処理で発生する可能性のあるエラー型
    type Error;

    /// 設定に従ってボックス平滑化を適用する
    ///
    /// # 引数
    ///
    /// * `config` - ウィンドウサイズとスレッド数
    ///
    /// # 戻り値
    ///
    /// 平滑化されたRGB画像、またはエラー
    ///
    /// # エラー
    ///
    /// * 空の画像に対して処理を実行した場合
    /// * スレッド数が0、または画像の高さより大きい場合
    /// * ワーカースレッドの起動に失敗した、またはパニックした場合
    fn smooth(&self, config: &SmoothConfig) -> Result<Self::Output, Self::Error>;

    /// キャンセル可能なボックス平滑化を適用する
    ///
    /// 各ワーカーは行ごとに `cancel` を確認し、立っていれば処理を中断します。
    /// 中断された場合、途中まで書き込まれた画像は返されません。
    fn smooth_with_cancellation(
        &self,
        config: &SmoothConfig,
        cancel: &AtomicBool,
    ) -> Result<Self::Output, Self::Error>;

    /// ウィンドウサイズとスレッド数を直接指定して平滑化する
    fn smooth_window(
        &self,
        window_size: u32,
        thread_count: usize,
    ) -> Result<Self::Output, Self::Error> {
        self.smooth(&SmoothConfig::new(window_size, thread_count))
    }
}

impl<P: ColorPixel> Smooth for Image<P> {
    type Output = Image<Rgb<u8>>;
    type Error = SmoothError;

    fn smooth(&self, config: &SmoothConfig) -> Result<Self::Output, Self::Error> {
        smooth_parallel(self, config, None)
    }

    fn smooth_with_cancellation(
        &self,
        config: &SmoothConfig,
        cancel: &AtomicBool,
    ) -> Result<Self::Output, Self::Error> {
        smooth_parallel(self, config, Some(cancel))
    }
}

fn smooth_parallel<P: ColorPixel>(
    source: &Image<P>,
    config: &SmoothConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Image<Rgb<u8>>, SmoothError> {
    let (width, height) = source.dimensions();
    config.validate(width, height)?;

    let radius = config.radius();
    let ranges = partition_rows(height, config.thread_count())?;
    debug!(
        "Smoothing {}x{} image, radius {}, {} workers: {:?}",
        width,
        height,
        radius,
        ranges.len(),
        ranges
    );

    // 全ワーカーの起動前に出力バッファを確保する
    let mut output: Image<Rgb<u8>> = ImageBuffer::new(width, height);
    let row_len = width as usize * OUTPUT_CHANNELS;

    let work = |rows: Range<u32>, stripe: &mut [u8]| {
        smooth_stripe(source, rows, stripe, radius, cancel)
    };
    run_partitioned(&mut output, row_len, &ranges, &work).inspect_err(|err| {
        if *err == SmoothError::Cancelled {
            debug!("Smoothing cancelled, discarding partial output");
        }
    })?;

    Ok(output)
}

/// 1つのワーカーが担当する行範囲を平滑化する
///
/// `stripe` は `rows` に対応する出力行だけを含むスライス
fn smooth_stripe<P: ColorPixel>(
    source: &Image<P>,
    rows: Range<u32>,
    stripe: &mut [u8],
    radius: u32,
    cancel: Option<&AtomicBool>,
) -> WorkerResult {
    let row_len = source.width() as usize * OUTPUT_CHANNELS;

    for (y, row) in rows.zip(stripe.chunks_exact_mut(row_len)) {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(SmoothError::Cancelled);
        }
        for (x, pixel) in (0..).zip(row.chunks_exact_mut(OUTPUT_CHANNELS)) {
            let Rgb(rgb) = window_average(source, x, y, radius);
            pixel.copy_from_slice(&rgb);
        }
    }

    Ok(())
}

/// Runs `work` on one scoped thread per row range and joins them all.
///
/// `buffer` is split into disjoint stripes of `rows.len() * row_len` bytes,
/// one per range, so every worker has exclusive access to its own rows.
/// All spawned workers are joined before this returns, on success and on
/// failure alike. The first worker error in worker order is returned.
fn run_partitioned<F>(
    buffer: &mut [u8],
    row_len: usize,
    ranges: &[Range<u32>],
    work: &F,
) -> WorkerResult
where
    F: Fn(Range<u32>, &mut [u8]) -> WorkerResult + Sync,
{
    let stripes = split_into_stripes(buffer, row_len, ranges);

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(ranges.len());
        let mut spawn_error = None;

        for (worker, (rows, stripe)) in ranges.iter().cloned().zip(stripes).enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("smooth-worker-{worker}"))
                .spawn_scoped(scope, move || work(rows, stripe));

            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(err) => {
                    warn!("Failed to spawn worker {}: {}", worker, err);
                    spawn_error = Some(SmoothError::SpawnFailed {
                        worker,
                        reason: err.to_string(),
                    });
                    break;
                }
            }
        }

        let joined = join_workers(handles);
        spawn_error.map_or(joined, Err)
    })
}

fn split_into_stripes<'a>(
    buffer: &'a mut [u8],
    row_len: usize,
    ranges: &[Range<u32>],
) -> Vec<&'a mut [u8]> {
    let mut stripes = Vec::with_capacity(ranges.len());
    let mut remaining = buffer;

    for rows in ranges {
        let (stripe, rest) = std::mem::take(&mut remaining).split_at_mut(rows.len() * row_len);
        stripes.push(stripe);
        remaining = rest;
    }

    stripes
}

fn join_workers(handles: Vec<(usize, ScopedJoinHandle<'_, WorkerResult>)>) -> WorkerResult {
    let mut first_error = None;

    for (worker, handle) in handles {
        let result = handle.join().unwrap_or_else(|_| {
            warn!("Worker {} panicked", worker);
            Err(SmoothError::WorkerPanicked { worker })
        });

        match result {
            Ok(()) => trace!("Worker {} finished", worker),
            Err(err) => {
                trace!("Worker {} stopped: {}", worker, err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}
