pub mod config;
pub mod record;
pub mod types;

pub use config::KlbConfig;
pub use record::*;
pub use types::*;
