use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Input file does not exist: {0}")]
    MissingInput(String),

    #[error("Input is not a file: {0}")]
    NotAFile(String),

    #[error("Output already exists, use overwrite to replace it: {0}")]
    OutputExists(String),

    #[error("Output is a directory: {0}")]
    OutputIsDirectory(String),

    #[error("Output directory does not exist: {0}")]
    MissingParent(String),

    #[error("Same output given twice: {0}")]
    DuplicateOutput(String),
}
