//! Fitbit OAuth2 client and data passthroughs

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDate;
use reqwest::{header, Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::FitbitConfig;
use crate::domain::DomainError;

const PROVIDER: &str = "fitbit";

/// Scopes requested during authorization
pub const FITBIT_SCOPES: &str = "activity heartrate sleep profile";

/// Token response from the Fitbit token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct FitbitToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Profile, activity, heart rate and sleep for one day
#[derive(Debug, Clone, Serialize)]
pub struct FitbitDashboard {
    pub profile: Value,
    pub activity: Value,
    pub heartrate: Value,
    pub sleep: Value,
}

/// Client for the Fitbit Web API
///
/// Holds a single process-wide access token obtained through the
/// authorization-code flow.
#[derive(Debug)]
pub struct FitbitClient {
    http: Client,
    config: FitbitConfig,
    token: RwLock<Option<FitbitToken>>,
}

impl FitbitClient {
    pub fn new(config: FitbitConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            token: RwLock::new(None),
        })
    }

    /// URL the user is redirected to in order to grant access
    pub fn authorization_url(&self) -> Result<String, DomainError> {
        self.require_client_credentials()?;

        let url = Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", FITBIT_SCOPES),
            ],
        )
        .map_err(|e| DomainError::configuration(format!("Invalid Fitbit authorize URL: {}", e)))?;

        Ok(url.to_string())
    }

    /// Exchange an authorization code for an access token and keep it
    pub async fn exchange_code(&self, code: &str) -> Result<(), DomainError> {
        self.require_client_credentials()?;

        let credentials = format!("{}:{}", self.config.client_id, self.config.client_secret);
        let authorization = format!("Basic {}", STANDARD.encode(credentials));

        let response = self
            .http
            .post(&self.config.token_url)
            .header(header::AUTHORIZATION, authorization)
            .form(&[
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code", code),
            ])
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Request failed: {}", e)))?;

        let token: FitbitToken = parse_response(response).await?;

        info!(user_id = ?token.user_id, "Fitbit authorization completed");
        *self.token.write().await = Some(token);

        Ok(())
    }

    /// Whether an access token is currently held
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn profile(&self) -> Result<Value, DomainError> {
        self.get("profile.json").await
    }

    pub async fn activity(&self, day: NaiveDate) -> Result<Value, DomainError> {
        self.get(&format!("activities/date/{}.json", day)).await
    }

    pub async fn heartrate(&self, day: NaiveDate) -> Result<Value, DomainError> {
        self.get(&format!("activities/heart/date/{}/1d.json", day))
            .await
    }

    pub async fn sleep(&self, day: NaiveDate) -> Result<Value, DomainError> {
        self.get(&format!("sleep/date/{}.json", day)).await
    }

    /// Fetch every data set for `day` concurrently
    pub async fn dashboard(&self, day: NaiveDate) -> Result<FitbitDashboard, DomainError> {
        let (profile, activity, heartrate, sleep) = futures::try_join!(
            self.profile(),
            self.activity(day),
            self.heartrate(day),
            self.sleep(day),
        )?;

        Ok(FitbitDashboard {
            profile,
            activity,
            heartrate,
            sleep,
        })
    }

    async fn get(&self, path: &str) -> Result<Value, DomainError> {
        let access_token = self
            .token
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or_else(|| DomainError::unauthorized("Not authenticated with Fitbit"))?;

        let url = format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Request failed: {}", e)))?;

        parse_response(response).await
    }

    /// Whether client ID and secret are both set
    pub fn is_configured(&self) -> bool {
        !self.config.client_id.is_empty() && !self.config.client_secret.is_empty()
    }

    fn require_client_credentials(&self) -> Result<(), DomainError> {
        if !self.is_configured() {
            return Err(DomainError::configuration(
                "Fitbit client ID and secret are not configured",
            ));
        }
        Ok(())
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DomainError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "Fitbit request failed");
        return Err(DomainError::provider(
            PROVIDER,
            format!("HTTP {}: {}", status, body),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| DomainError::provider(PROVIDER, format!("Failed to parse response: {}", e)))
}
