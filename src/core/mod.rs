//! Core error and result types

pub mod error;
pub mod types;

pub use error::Error;
pub use types::Result;
