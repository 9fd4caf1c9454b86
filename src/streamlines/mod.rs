mod error;
mod registry;
mod tck;
mod tractogram;
mod trk;


pub use error::LoadError;
pub use registry::LoaderRegistry;
pub use tck::TckLoader;
pub use tractogram::Tractogram;
pub use trk::TrkLoader;

use std::fs::File;
use std::io;
use std::path::Path;

/// Reads a streamline file into a flat tractogram
pub trait StreamlineLoader: Send + Sync {
    /// Load every streamline of `path`, points in RAS+ millimeters
    fn load(&self, path: &Path) -> Result<Tractogram, LoadError>;
}

pub(crate) fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::io(path, e),
    })
}
