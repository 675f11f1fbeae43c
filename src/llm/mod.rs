pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod provider;
pub mod registry;
pub mod router;
pub mod types;

pub use provider::AiProvider;
pub use registry::ProviderRegistry;
pub use router::create_provider;
pub use types::ProviderResponse;
