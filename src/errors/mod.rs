pub mod types;

pub use types::{ProviderError, SitescopeError};
