use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resources exhausted: {0}")]
    ResourceExhausted(#[from] rayon::ThreadPoolBuildError),
}
