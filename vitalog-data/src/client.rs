use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::repository::StoreError;

/// Environment variable holding the record store endpoint URL
pub const ENV_STORE_URL: &str = "SUPABASE_URL";

/// Environment variable holding the record store access key
pub const ENV_STORE_KEY: &str = "SUPABASE_ANON_KEY";

/// Connection settings for the remote record store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Access key sent with every request
    pub api_key: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// Returns `None` when either variable is unset or blank; the caller is
    /// expected to run with a disabled store in that case rather than crash.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_STORE_URL).ok()?;
        let api_key = std::env::var(ENV_STORE_KEY).ok()?;

        if url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }

        Some(Self::new(url.trim(), api_key.trim()))
    }
}

/// Thin PostgREST client over the store's `/rest/v1` endpoint.
///
/// Every request carries the access key as both the `apikey` header and a
/// bearer token, matching the store's REST conventions.
pub struct RestClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RestClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::Config("access key contains invalid characters".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::Config("access key contains invalid characters".to_string()))?;

        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// Select rows from a table with PostgREST query parameters.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        debug!("Selecting from table {}", table);

        let response = self
            .http
            .get(self.table_url(table))
            .query(params)
            .send()
            .await?;

        Self::decode_rows(response).await
    }

    /// Insert rows into a table, returning the stored representations.
    pub async fn insert<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>, StoreError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!("Inserting {} row(s) into table {}", rows.len(), table);

        let response = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;

        Self::decode_rows(response).await
    }

    async fn decode_rows<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, StoreError> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}
