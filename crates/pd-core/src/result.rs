//! Result type alias

use crate::error::Error;

/// Standard Result type for PayDesk client operations
pub type ApiResult<T> = Result<T, Error>;
