//! CLI command handlers, one per file.

mod checksum;
mod get;
mod resolve;
mod save;

pub use checksum::run_checksum;
pub use get::run_get;
pub use resolve::run_resolve;
pub use save::run_save;
