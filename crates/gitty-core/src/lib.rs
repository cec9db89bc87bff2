pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod materialize;
pub mod repo_url;
pub mod source;
pub mod storage;
