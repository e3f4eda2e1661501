mod config;
pub use config::Config;

pub mod engine;
pub use engine::Engine;

mod error;
pub use error::{Error, IntoError};

pub mod populate;
pub use populate::{DataLevelPopulate, Populate};

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses datalevel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
