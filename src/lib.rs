pub mod config;
pub mod log;
pub mod manager;
pub mod store;
pub mod sweeper;
pub mod token;

pub use config::AccessConfig;
pub use manager::AccessManager;
pub use store::{ArtifactRecord, RegisterError, TokenStore};
pub use sweeper::Sweeper;
