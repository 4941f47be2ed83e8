use crate::error::Error;

pub mod save_post;

// Result for all endpoints that can fail
pub type Result<T> = core::result::Result<T, Error>;
