use thiserror::Error;

#[derive(Error, Debug)]
pub enum NpzError {
    #[error("Output already exists: {0} (use overwrite to replace it)")]
    AlreadyExists(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build archive {path}: {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
}
