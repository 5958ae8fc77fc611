use std::{num::NonZeroUsize, thread};

/// Input layers with fewer roots than this are reduced on the calling thread.
pub const MIN_PARALLELIZATION_SIZE: usize = 5000;

/// Tuning for layer reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HasherConfig {
    /// Smallest input layer, in roots, that is split across workers.
    pub min_parallelization_size: usize,
    /// Number of workers for the parallel path; `None` uses the available hardware parallelism.
    pub num_workers: Option<usize>,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self { min_parallelization_size: MIN_PARALLELIZATION_SIZE, num_workers: None }
    }
}

impl HasherConfig {
    /// A configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self { min_parallelization_size: usize::MAX, num_workers: Some(1) }
    }

    pub fn with_min_parallelization_size(mut self, size: usize) -> Self {
        self.min_parallelization_size = size;
        self
    }

    pub fn with_num_workers(mut self, workers: usize) -> Self {
        self.num_workers = Some(workers);
        self
    }

    /// Resolve the number of workers to use, always at least one.
    pub fn workers(&self) -> usize {
        self.num_workers
            .unwrap_or_else(|| thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1))
            .max(1)
    }
}
