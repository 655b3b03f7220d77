//! Command handlers
//!
//! Each subcommand of the `video-search` binary maps to one handler here. The
//! headless handlers run the same controller operations as the terminal page and
//! report the resulting page state on stdout/stderr.

pub mod download;
pub mod search;

pub use download::run_download;
pub use search::run_search;
