//! Static partitioning of the job list across workers.

/// Split `jobs` into at most `workers` contiguous chunks.
///
/// Chunk size is `ceil(jobs / workers)`; the final chunk takes whatever is
/// left and may be shorter. Empty chunks are not returned, so fewer jobs
/// than workers yields one single-job chunk per job.
pub fn partition<T>(jobs: &[T], workers: usize) -> Vec<&[T]> {
    if jobs.is_empty() {
        return Vec::new();
    }
    let workers = workers.max(1);
    let chunk_size = jobs.len().div_ceil(workers);
    jobs.chunks(chunk_size).collect()
}
