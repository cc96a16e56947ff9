pub mod error;
pub mod logger;
pub mod oxo;

pub use error::OxoError;
