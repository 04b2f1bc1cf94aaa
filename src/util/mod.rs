//! Utility functions for common operations.
//!
//! - **URL validation**: request targets and article links
//! - **Text processing**: date reformatting, width-aware truncation and
//!   control-character stripping for terminal output

mod text;
mod url_validator;

pub use text::{format_date, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url, validate_url_for_open, UrlValidationError};
