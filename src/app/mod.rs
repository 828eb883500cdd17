pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::{AppConfig, PageStrategy};
