pub mod config;
pub mod init;

pub use config::AppConfig;
pub use init::{init, run};
