//! Splits a pixel buffer into bands of whole rows and hands each band
//! to its own scoped thread.  Bands are disjoint slices of the output,
//! so the workers need no locking; whatever they read has to come from
//! somewhere immutable.

use crate::error::{FractalError, Result};

/// How many worker threads to use when the caller doesn't say.
pub fn default_threads() -> usize {
    num_cpus::get().max(1)
}

/// Run `work(first_row, band)` over every band of `buffer`, where a
/// row is `stride` bytes long.  Returns `Ok(false)` if any worker
/// reported that it stopped early.
pub(crate) fn for_each_band<F>(buffer: &mut [u8], stride: usize, threads: usize, work: F) -> Result<bool>
where
    F: Fn(usize, &mut [u8]) -> bool + Sync,
{
    let rows = buffer.len() / stride;
    let threads = threads.max(1).min(rows.max(1));
    if threads == 1 {
        return Ok(work(0, buffer));
    }

    let rows_per_band = (rows + threads - 1) / threads;
    crossbeam::scope(|spawner| {
        let work = &work;
        let handles: Vec<_> = buffer
            .chunks_mut(rows_per_band * stride)
            .enumerate()
            .map(|(i, band)| spawner.spawn(move |_| work(i * rows_per_band, band)))
            .collect();
        let mut complete = true;
        for handle in handles {
            match handle.join() {
                Ok(done) => complete &= done,
                Err(_) => return Err(FractalError::WorkerPanicked),
            }
        }
        Ok(complete)
    })
    .map_err(|_| FractalError::WorkerPanicked)?
}
