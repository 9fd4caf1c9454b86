use super::PathError;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

pub struct PathGuard;

impl PathGuard {
    /// Check that every input exists and is a regular file
    pub fn assert_inputs_exist(inputs: &[&Path]) -> Result<(), PathError> {
        for input in inputs {
            if !input.exists() {
                return Err(PathError::MissingInput(input.display().to_string()));
            }
            if !input.is_file() {
                return Err(PathError::NotAFile(input.display().to_string()));
            }
        }
        Ok(())
    }

    /// Check that every output can be written:
    /// - Its parent directory exists
    /// - It is not a directory
    /// - It does not exist yet, unless `overwrite`
    /// - No two outputs are the same path
    pub fn assert_outputs_writable(outputs: &[&Path], overwrite: bool) -> Result<(), PathError> {
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for output in outputs {
            let shown = output.display().to_string();

            if !seen.insert(Self::normalize(output)) {
                return Err(PathError::DuplicateOutput(shown));
            }

            if output.is_dir() {
                return Err(PathError::OutputIsDirectory(shown));
            }
            if output.exists() && !overwrite {
                return Err(PathError::OutputExists(shown));
            }

            // A bare file name lives in the working directory
            let parent = output.parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                if !parent.is_dir() {
                    return Err(PathError::MissingParent(parent.display().to_string()));
                }
            }
        }
        Ok(())
    }

    /// Absolute form of `path` against the working directory with `.`
    /// components dropped and the parent directory resolved when it exists.
    pub(crate) fn normalize(path: &Path) -> PathBuf {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        let cleaned: PathBuf = absolute
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if let (Some(parent), Some(name)) = (cleaned.parent(), cleaned.file_name()) {
            if !parent.as_os_str().is_empty() {
                if let Ok(parent) = parent.canonicalize() {
                    return parent.join(name);
                }
            }
        }
        cleaned
    }
}
