mod error;
mod guard;


pub use error::PathError;
pub use guard::PathGuard;
