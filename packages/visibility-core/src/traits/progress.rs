//! Progress reporting for long-running stages.

/// Observer notified after each completed unit of work.
///
/// Purely a side channel for UI feedback; nothing in the pipeline reads it.
pub trait Progress: Send + Sync {
    fn advance(&self, completed: usize, total: usize);
}

impl<F> Progress for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn advance(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}
