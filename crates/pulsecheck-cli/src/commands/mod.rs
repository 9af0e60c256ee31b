//! Command implementations.

pub mod analyze;
pub mod chunk;
pub mod config;
pub mod extract_json;

pub use self::analyze::execute_analyze;
pub use self::chunk::execute_chunk;
pub use self::config::execute_config;
pub use self::extract_json::execute_extract_json;
