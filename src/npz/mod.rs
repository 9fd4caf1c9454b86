//! Numpy `.npy` encoding and `.npz` containers.

mod error;
mod npy;
mod writer;

#[cfg(test)]
mod tests;

pub use error::NpzError;
pub use npy::{encode_npy, NpyElement, NPY_MAGIC};
pub use writer::{npz_path, NpzWriter};
