/// Bundle points handled per chunk when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Performance knobs for the assigner. Neither affects the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignerConfig {
    /// Bundle points per chunk; bounds scratch memory to `chunk_size * M`
    pub chunk_size: usize,
    /// Worker threads (0 = one per logical CPU, 1 = calling thread only)
    pub workers: usize,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: 0,
        }
    }
}
