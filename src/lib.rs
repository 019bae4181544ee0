pub use adaptor::{Adaptor, DEFAULT_ENDPOINT, DEFAULT_LIMIT};
pub use error::{Error, Result};

pub mod adaptor;
pub mod error;
pub mod models;
