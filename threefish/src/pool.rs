use super::CipherError;

use log::trace;
use std::ops::Range;
use std::sync::mpsc::channel;
use workerpool::Pool;
use workerpool::thunk::{Thunk, ThunkWorker};

type JobResult = (usize, Result<Vec<u8>, CipherError>);

/// Splits `block_count` blocks into at most `n_workers` contiguous ranges.
pub fn split_blocks(block_count: usize, n_workers: usize) -> Vec<Range<usize>> {
    let n_chunks = n_workers.clamp(1, block_count.max(1));
    let chunk_len = block_count.div_ceil(n_chunks).max(1);

    (0..block_count)
        .step_by(chunk_len)
        .map(|start| start..(start + chunk_len).min(block_count))
        .collect()
}

/// Runs every job and returns their outputs in job order. A single job, or a
/// single worker, runs on the calling thread.
pub fn run_jobs<F>(n_workers: usize, jobs: Vec<F>) -> Result<Vec<Vec<u8>>, CipherError>
where
    F: FnOnce() -> Result<Vec<u8>, CipherError> + Send + 'static,
{
    if n_workers <= 1 || jobs.len() <= 1 {
        return jobs.into_iter().map(|job| job()).collect();
    }

    let n_jobs = jobs.len();
    trace!("dispatching {} jobs to {} workers", n_jobs, n_workers);

    let workers = Pool::<ThunkWorker<JobResult>>::new(n_workers);
    let (tx, rx) = channel();
    for (i, job) in jobs.into_iter().enumerate() {
        workers.execute_to(tx.clone(), Thunk::of(move || (i, job())));
    }
    drop(tx);

    let mut results: Vec<JobResult> = rx.iter().take(n_jobs).collect();
    if results.len() != n_jobs {
        return Err(CipherError::WorkerFailure);
    }

    results.sort_by_key(|(i, _)| *i);
    results.into_iter().map(|(_, result)| result).collect()
}


#[cfg(test)]
mod pool_test {
    use super::*;

    #[test]
    fn split_blocks_res() {
        assert_eq!(split_blocks(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
        assert_eq!(split_blocks(3, 8), vec![0..1, 1..2, 2..3]);
        assert_eq!(split_blocks(5, 1), vec![0..5]);
        assert!(split_blocks(0, 4).is_empty());
    }

    #[test]
    fn run_jobs_keeps_order() {
        let jobs: Vec<_> = (0..20u8)
            .map(|i| move || -> Result<Vec<u8>, CipherError> { Ok(vec![i; 3]) })
            .collect();

        let r = run_jobs(4, jobs).unwrap();

        assert_eq!(r.len(), 20);
        for (i, chunk) in r.iter().enumerate() {
            assert_eq!(chunk, &vec![i as u8; 3]);
        }
    }

    #[test]
    fn run_jobs_reports_errors() {
        let jobs: Vec<Box<dyn FnOnce() -> Result<Vec<u8>, CipherError> + Send>> = vec![
            Box::new(|| Ok(vec![1])),
            Box::new(|| Err(CipherError::InvalidPaddingSize)),
        ];

        let r = run_jobs(2, jobs);
        assert_eq!(r.unwrap_err(), CipherError::InvalidPaddingSize);
    }
}
