use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment. A
/// reference to an unset variable resolves to `None` so the owning provider
/// surfaces as not-configured instead of carrying a bogus literal key.
pub fn resolve_credential(value: &str) -> Option<String> {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) if !resolved.is_empty() => {
                debug!(var = %var_name, "Resolved credential from environment");
                Some(resolved)
            }
            _ => {
                debug!(var = %var_name, "Environment variable not set");
                None
            }
        }
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolve an optional configured credential, falling back to a default
/// environment variable for the provider when the config carries none.
pub fn resolve_api_key(configured: Option<&str>, default_env: &str) -> Option<String> {
    match configured {
        Some(value) => resolve_credential(value),
        None => std::env::var(default_env).ok().filter(|v| !v.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("my-api-key"), Some("my-api-key".to_string()));
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_SITESCOPE_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_SITESCOPE_CRED"), Some("secret123".to_string()));
        std::env::remove_var("TEST_SITESCOPE_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_SITESCOPE_VAR"), None);
    }

    #[test]
    fn test_resolve_credential_empty_literal() {
        assert_eq!(resolve_credential(""), None);
    }

    #[test]
    fn test_resolve_api_key_default_env_fallback() {
        std::env::set_var("TEST_SITESCOPE_FALLBACK", "from-env");
        assert_eq!(
            resolve_api_key(None, "TEST_SITESCOPE_FALLBACK"),
            Some("from-env".to_string())
        );
        std::env::remove_var("TEST_SITESCOPE_FALLBACK");
    }

    #[test]
    fn test_resolve_api_key_configured_wins() {
        assert_eq!(
            resolve_api_key(Some("literal-key"), "UNSET_SITESCOPE_VAR"),
            Some("literal-key".to_string())
        );
    }
}
