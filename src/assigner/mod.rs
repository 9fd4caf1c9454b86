mod config;
mod error;
mod kernel;
mod result;

#[cfg(test)]
mod tests;

pub use config::{AssignerConfig, DEFAULT_CHUNK_SIZE};
pub use error::AssignError;
pub use result::{AssignmentResult, DistanceSummary};

use crate::geometry::PointSet;
use kernel::assign_chunk;
use rayon::prelude::*;
use tracing::debug;

/// Assigns every bundle point to its nearest centroid point.
///
/// The assigner holds only its chunking/parallelism knobs. `compute` is a pure
/// function of its two inputs and the result does not depend on the knobs.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroidAssigner {
    config: AssignerConfig,
}

impl NearestCentroidAssigner {
    /// Create an assigner with default chunk size and one worker per CPU
    pub fn new() -> Self {
        Self {
            config: AssignerConfig::default(),
        }
    }

    pub fn with_config(config: AssignerConfig) -> Self {
        Self {
            config: AssignerConfig {
                chunk_size: config.chunk_size.max(1),
                workers: config.workers,
            },
        }
    }

    /// Set the number of bundle points processed per chunk (clamped to 1)
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the worker count. 0 uses one worker per logical CPU, 1 stays on
    /// the calling thread.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn config(&self) -> &AssignerConfig {
        &self.config
    }

    /// Compute the 1-based nearest centroid label and distance of every
    /// bundle point.
    ///
    /// Entry `i` of the result corresponds to `bundle[i]`. Equidistant
    /// centroid points resolve to the smallest index. Peak scratch memory is
    /// `chunk_size * centroid.len()` distances per worker.
    pub fn compute(
        &self,
        bundle: &PointSet,
        centroid: &PointSet,
    ) -> Result<AssignmentResult, AssignError> {
        if bundle.is_empty() {
            return Err(AssignError::InvalidInput(
                "bundle point set is empty".to_string(),
            ));
        }
        if centroid.is_empty() {
            return Err(AssignError::InvalidInput(
                "centroid point set is empty".to_string(),
            ));
        }
        if centroid.len() > u32::MAX as usize {
            return Err(AssignError::InvalidInput(format!(
                "centroid has {} points, labels are limited to {}",
                centroid.len(),
                u32::MAX
            )));
        }

        let n = bundle.len();
        let m = centroid.len();
        let chunk_size = self.config.chunk_size.max(1);
        let scratch_len = chunk_size.min(n) * m;

        debug!(
            bundle_points = n,
            centroid_points = m,
            chunk_size,
            workers = self.config.workers,
            "assigning bundle points to nearest centroid point"
        );

        let mut labels = vec![0u32; n];
        let mut distances = vec![0.0f64; n];
        let reference = centroid.as_slice();

        if self.config.workers == 1 {
            let mut matrix = Vec::with_capacity(scratch_len);
            for ((chunk, chunk_labels), chunk_distances) in bundle
                .as_slice()
                .chunks(chunk_size)
                .zip(labels.chunks_mut(chunk_size))
                .zip(distances.chunks_mut(chunk_size))
            {
                assign_chunk(chunk, reference, &mut matrix, chunk_labels, chunk_distances);
            }
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()?;

            pool.install(|| {
                bundle
                    .as_slice()
                    .par_chunks(chunk_size)
                    .zip(labels.par_chunks_mut(chunk_size))
                    .zip(distances.par_chunks_mut(chunk_size))
                    .for_each_init(
                        || Vec::with_capacity(scratch_len),
                        |matrix, ((chunk, chunk_labels), chunk_distances)| {
                            assign_chunk(chunk, reference, matrix, chunk_labels, chunk_distances);
                        },
                    );
            });
        }

        Ok(AssignmentResult::new(labels, distances))
    }
}
