//! Result type alias for composition operations

use crate::error::XatError;

/// Standard Result type for composition operations
pub type Result<T> = std::result::Result<T, XatError>;
