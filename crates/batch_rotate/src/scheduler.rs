// Static distribution of a file list over a fixed number of worker threads.
//
// Every worker gets one contiguous slice up front and works through it in
// order. Workers share nothing and are only joined at the end.

use std::io;
use std::ops::Range;
use std::thread;

use crate::codec;
use crate::config::BatchConfig;
use crate::pipeline;

/// Outcome of one worker's slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub range: Range<usize>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Outcome of a whole batch, one entry per worker in worker order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub workers: Vec<WorkerReport>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.workers.iter().map(|w| w.range.len()).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.workers.iter().map(|w| w.succeeded).sum()
    }

    pub fn failed(&self) -> usize {
        self.workers.iter().map(|w| w.failed).sum()
    }
}

/// Splits `0..len` into `workers` contiguous ranges.
///
/// Each range holds `len / workers` items, except the last one, which also
/// takes the remaining `len % workers`. With fewer items than workers all
/// ranges but the last are empty. `workers` is treated as at least 1.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let per_worker = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i == workers - 1 {
                len
            } else {
                (i + 1) * per_worker
            };
            start..end
        })
        .collect()
}

/// Runs `job` over every item, spreading the items over `workers` threads
/// with [`partition`].
///
/// `job` returns whether the item succeeded. Each thread handles its slice
/// sequentially, and this function returns only once every thread has
/// finished. A thread that panics is logged and its whole slice counted as
/// failed; the other threads are unaffected.
pub fn run_partitioned<T, F>(items: &[T], workers: usize, job: F) -> BatchReport
where
    T: Sync,
    F: Fn(&T) -> bool + Sync,
{
    let slices = partition(items.len(), workers);
    let job = &job;

    let run_slice = move |slice: &[T]| {
        let mut counts: (usize, usize) = (0, 0);
        for item in slice {
            if job(item) {
                counts.0 += 1;
            } else {
                counts.1 += 1;
            }
        }
        counts
    };

    let reports = thread::scope(|scope| {
        let handles: Vec<_> = slices
            .into_iter()
            .enumerate()
            .map(|(worker, range)| {
                let slice = &items[range.clone()];
                let handle = thread::Builder::new()
                    .name(format!("rotate-worker-{worker}"))
                    .spawn_scoped(scope, move || run_slice(slice));
                (worker, range, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(worker, range, handle)| {
                let (succeeded, failed) = match handle {
                    Ok(handle) => handle.join().unwrap_or_else(|_| {
                        log::error!("Worker {worker} panicked, items {range:?} not completed");
                        (0, range.len())
                    }),
                    Err(e) => {
                        log::warn!("Unable to spawn worker {worker} ({e}), running its slice inline");
                        run_slice(&items[range.clone()])
                    }
                };

                WorkerReport {
                    worker,
                    range,
                    succeeded,
                    failed,
                }
            })
            .collect()
    });

    BatchReport { workers: reports }
}

/// Rotates every matching image in the configured directory.
///
/// Fails only if the directory itself cannot be listed; failures of
/// individual files are logged and counted in the report.
pub fn run_batch(config: &BatchConfig) -> io::Result<BatchReport> {
    let image_paths = codec::list_images(&config.root, &config.extension)?;
    let workers = config.worker_count();

    log::info!(
        "Rotating {} images in {} by {} with {} workers",
        image_paths.len(),
        config.root.display(),
        config.rotation,
        workers
    );

    let rotation = config.rotation;
    let report = run_partitioned(&image_paths, workers, |path| {
        pipeline::process_logged(path, &rotation)
    });

    for worker in &report.workers {
        log::debug!(
            "Worker {} handled items {:?}: {} ok, {} failed",
            worker.worker,
            worker.range,
            worker.succeeded,
            worker.failed
        );
    }

    Ok(report)
}
