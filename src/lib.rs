// Public API exports
pub mod assigner;
pub mod geometry;
pub mod npz;
pub mod paths;
pub mod pipeline;
pub mod streamlines;

// Re-export main types for convenience
pub use geometry::{Point3D, PointSet};

pub use assigner::{
    AssignError, AssignerConfig, AssignmentResult, DEFAULT_CHUNK_SIZE, DistanceSummary,
    NearestCentroidAssigner,
};

pub use streamlines::{
    LoadError, LoaderRegistry, StreamlineLoader, TckLoader, Tractogram, TrkLoader,
};

pub use npz::{NpyElement, NpzError, NpzWriter, encode_npy, npz_path};

pub use paths::{PathError, PathGuard};

pub use pipeline::{JobOutcome, LabelMapJob};
