use std::path::Path;

use crate::errors::SitescopeError;

use super::types::SitescopeConfig;

pub async fn parse_config(path: &Path) -> Result<SitescopeConfig, SitescopeError> {
    if !path.exists() {
        return Err(SitescopeError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(SitescopeError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: SitescopeConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisKind;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
server:
  host: 0.0.0.0
  port: 9090
  db_path: ./data/reports.db
providers:
  gemini:
    api_key: "$GEMINI_API_KEY"
    model: gemini-2.5-flash
  claude:
    enabled: false
pagespeed:
  api_key: literal-key
"#;
        let config: SitescopeConfig = serde_yaml::from_str(yaml).unwrap();
        let server = config.server.unwrap();
        assert_eq!(server.port, Some(9090));

        let providers = config.providers.unwrap();
        let gemini = providers.get(AnalysisKind::Gemini).unwrap();
        assert!(gemini.enabled);
        assert_eq!(gemini.model.as_deref(), Some("gemini-2.5-flash"));
        assert!(!providers.get(AnalysisKind::Claude).unwrap().enabled);
        assert!(providers.get(AnalysisKind::Chatgpt).is_none());

        assert_eq!(config.pagespeed.unwrap().api_key.as_deref(), Some("literal-key"));
    }

    #[test]
    fn test_parse_empty_config_defaults() {
        let config: SitescopeConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.providers.is_none());
    }
}
