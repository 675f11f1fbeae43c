use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Vendor responses are normalized to this shape before storage so display
/// code never depends on a provider's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub text: String,
    pub model: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

impl ProviderResponse {
    /// The `{text, model, usage?}` payload stored in the partial result set.
    pub fn into_payload(self) -> Value {
        let usage = match (self.input_tokens, self.output_tokens) {
            (None, None) => Value::Null,
            (input, output) => json!({
                "inputTokens": input,
                "outputTokens": output,
            }),
        };
        json!({
            "text": self.text,
            "model": self.model,
            "usage": usage,
        })
    }
}
