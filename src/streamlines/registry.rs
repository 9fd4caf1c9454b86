use super::{LoadError, StreamlineLoader, TckLoader, Tractogram, TrkLoader};
use std::collections::HashMap;
use std::path::Path;

/// Extension based dispatch table for streamline loaders
pub struct LoaderRegistry {
    /// Extension -> Loader mapping
    map: HashMap<String, Box<dyn StreamlineLoader>>,
}

impl LoaderRegistry {
    /// Create a registry knowing `tck` and `trk`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("tck", TckLoader);
        registry.register("trk", TrkLoader);
        registry
    }

    /// Create a registry with no loaders
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Register a loader for a file extension given without the dot
    pub fn register(&mut self, extension: impl Into<String>, loader: impl StreamlineLoader + 'static) {
        self.map
            .insert(extension.into().to_lowercase(), Box::new(loader));
    }

    /// Select the loader for `path` by its (case-insensitive) extension
    pub fn select(&self, path: &Path) -> Option<&dyn StreamlineLoader> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.map.get(&ext).map(|l| &**l)
    }

    pub fn load(&self, path: &Path) -> Result<Tractogram, LoadError> {
        self.select(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?
            .load(path)
    }

    pub fn loader_count(&self) -> usize {
        self.map.len()
    }

    pub fn registered_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.map.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
