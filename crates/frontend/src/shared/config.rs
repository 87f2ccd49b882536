use contracts::domain::a005_sales_order::SessionIds;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Single endpoint every operation is sent to
    pub base_url: String,
}

/// Ids the server expects on master saves. There is no login yet.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub year_id: i64,
    pub login_id: i64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_toast_timeout_ms")]
    pub toast_timeout_ms: u32,
    /// Above this many distinct values a column filter becomes a text search
    #[serde(default = "default_autocomplete_limit")]
    pub autocomplete_limit: usize,
}

fn default_toast_timeout_ms() -> u32 {
    4000
}

fn default_autocomplete_limit() -> usize {
    100
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://122.179.135.100:8095/wsDataPool/WebAPI.aspx"

[session]
year_id = 1
login_id = 1

[ui]
toast_timeout_ms = 4000
autocomplete_limit = 100
"#;

/// Build-time override of `api.base_url`
const API_BASE_OVERRIDE: Option<&str> = option_env!("SALES_ORDER_API_BASE");

impl AppConfig {
    pub fn session_ids(&self) -> SessionIds {
        SessionIds {
            year_id: self.session.year_id,
            login_id: self.session.login_id,
        }
    }
}

/// Parses a configuration document and applies the build-time endpoint override
pub fn parse_config(contents: &str, base_override: Option<&str>) -> Result<AppConfig, toml::de::Error> {
    let mut config: AppConfig = toml::from_str(contents)?;
    if let Some(base) = base_override.map(str::trim).filter(|b| !b.is_empty()) {
        config.api.base_url = base.to_string();
    }
    Ok(config)
}

/// Load the embedded configuration
pub fn load_config() -> Result<AppConfig, toml::de::Error> {
    let config = parse_config(DEFAULT_CONFIG, API_BASE_OVERRIDE)?;
    log::info!("API endpoint: {}", config.api.base_url);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG, None).unwrap();
        assert!(config.api.base_url.ends_with("WebAPI.aspx"));
        assert_eq!(config.session_ids(), SessionIds { year_id: 1, login_id: 1 });
        assert_eq!(config.ui.autocomplete_limit, 100);
    }

    #[test]
    fn test_override_replaces_endpoint() {
        let config = parse_config(DEFAULT_CONFIG, Some(" http://localhost:8095/api ")).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8095/api");

        let config = parse_config(DEFAULT_CONFIG, Some("")).unwrap();
        assert!(config.api.base_url.starts_with("http://122."));
    }

    #[test]
    fn test_ui_section_defaults() {
        let config = parse_config(
            r#"
            [api]
            base_url = "http://x"
            [session]
            year_id = 3
            login_id = 7
            [ui]
            "#,
            None,
        )
        .unwrap();
        assert_eq!(config.ui.toast_timeout_ms, 4000);
        assert_eq!(config.session.login_id, 7);
    }
}
