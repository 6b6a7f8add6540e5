use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub fitbit: FitbitConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Fitbit OAuth2 application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FitbitConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for FitbitConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: "http://localhost:8000/fitbit/callback".to_string(),
            authorize_url: "https://www.fitbit.com/oauth2/authorize".to_string(),
            token_url: "https://api.fitbit.com/oauth2/token".to_string(),
            api_base_url: "https://api.fitbit.com/1/user/-".to_string(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the environment
    ///
    /// Sources, lowest precedence first: `config/default`, `config/local`,
    /// `APP__*` variables, then the `FITBIT_CLIENT_ID`, `FITBIT_CLIENT_SECRET`
    /// and `FITBIT_REDIRECT_URI` variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_env(std::env::vars().collect())
    }

    /// Load configuration reading variables from `env` instead of the process
    pub fn load_from_env(env: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let fitbit_override = |name: &str| env.get(name).cloned();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .set_override_option("fitbit.client_id", fitbit_override("FITBIT_CLIENT_ID"))?
            .set_override_option("fitbit.client_secret", fitbit_override("FITBIT_CLIENT_SECRET"))?
            .set_override_option("fitbit.redirect_uri", fitbit_override("FITBIT_REDIRECT_URI"))?
            .build()?;

        config.try_deserialize()
    }
}
