pub mod constants;
pub mod page_helpers;
pub mod page_timeout;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{has_run_mode_marker, is_valid_url, origin_of, with_run_mode_marker};
