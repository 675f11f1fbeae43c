pub mod credentials;
pub mod parser;
pub mod types;

pub use credentials::{resolve_api_key, resolve_credential};
pub use parser::parse_config;
pub use types::*;
