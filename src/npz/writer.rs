use super::{encode_npy, NpyElement, NpzError};
use chrono::{Datelike, Timelike};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name given to the single array of the archive
const ARRAY_NAME: &str = "arr_0.npy";

/// The path actually written for `path`: `.npz` is appended when missing
pub fn npz_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some("npz") => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".npz");
            PathBuf::from(name)
        }
    }
}

/// Writes one array per `.npz` archive, deflate compressed
#[derive(Debug, Clone, Copy, Default)]
pub struct NpzWriter {
    overwrite: bool,
}

impl NpzWriter {
    pub fn new() -> Self {
        Self { overwrite: false }
    }

    /// Allow replacing existing archives
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Store `values` as `arr_0` in a compressed archive and return the path
    /// written.
    pub fn save_compressed<T: NpyElement>(
        &self,
        path: &Path,
        values: &[T],
    ) -> Result<PathBuf, NpzError> {
        let target = npz_path(path);
        let shown = target.display().to_string();

        if target.exists() && !self.overwrite {
            return Err(NpzError::AlreadyExists(shown));
        }

        let file = File::create(&target).map_err(|source| NpzError::Io {
            path: shown.clone(),
            source,
        })?;
        let mut zip = ZipWriter::new(file);

        let now = chrono::Local::now();
        let options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644)
            .large_file(true)
            .last_modified_time(
                zip::DateTime::from_date_and_time(
                    now.year() as u16,
                    now.month() as u8,
                    now.day() as u8,
                    now.hour() as u8,
                    now.minute() as u8,
                    now.second() as u8,
                )
                .unwrap_or_default(),
            );

        let zip_err = |source| NpzError::Zip {
            path: shown.clone(),
            source,
        };

        zip.start_file(ARRAY_NAME, options).map_err(zip_err)?;
        let payload = encode_npy(values);
        zip.write_all(&payload).map_err(|source| NpzError::Io {
            path: shown.clone(),
            source,
        })?;
        zip.finish().map_err(zip_err)?;

        debug!(path = %shown, elements = values.len(), descr = T::DESCR, "wrote npz");
        Ok(target)
    }
}
