mod config;
pub use self::config::{Config, DEFAULT_ENDPOINT_REGION, Host};

pub mod commands;

mod start;
pub use self::start::{DOWNLOAD_SESSION_KEY, Invocation, from_matches, get_config_path, run, start};
