pub mod dataset;
pub mod error;
pub mod history;
pub mod models;

pub use error::{DataError, Result};
