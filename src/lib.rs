pub mod data;
pub mod error;
pub mod prep;
pub mod tracking;

pub use error::PrepError;
