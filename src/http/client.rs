//! Low-level HTTP client — `MemepumpHttp`.
//!
//! One method per API endpoint. Every 2xx body arrives wrapped in a
//! `{"data": ...}` envelope, which is unwrapped here; conversion from wire
//! types to domain types happens at the sub-client boundary.

use crate::domain::chart::wire::ChartResponse;
use crate::domain::chart::PriceMode;
use crate::domain::history::wire::{HistoryQuery, TransactionResponse};
use crate::domain::master::wire::{ConnectRequest, MasterDetailResponse, MasterResponse};
use crate::domain::token::wire::TokenSummaryResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::{TokenAddress, Timeframe, WalletAddress};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// The `{"data": ...}` envelope every REST payload is wrapped in.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// List payloads nest one level deeper: `{"data": {"items": [...]}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Items<T> {
    pub items: Vec<T>,
}

/// Low-level HTTP client for the MemePump REST API.
pub struct MemepumpHttp {
    base_url: String,
    client: Client,
    /// Bearer token attached to requests when present. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl MemepumpHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Construct with a bearer token already set (builder path).
    pub(crate) fn new_with_token(base_url: &str, token: Option<String>) -> Self {
        Self {
            auth_token: Arc::new(RwLock::new(token)),
            ..Self::new(base_url)
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token attached to subsequent requests.
    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    /// Clear the bearer token.
    pub(crate) async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    // ── Chart ────────────────────────────────────────────────────────────

    pub async fn get_chart(
        &self,
        address: &TokenAddress,
        timeframe: Timeframe,
        time_from: u64,
        time_to: u64,
        mode: PriceMode,
    ) -> Result<ChartResponse, HttpError> {
        let url = format!(
            "{}/api/v1/on-chain/chart/{}?market_cap={}&type={}&time_from={}&time_to={}",
            self.base_url,
            urlencoding::encode(address.as_str()),
            mode.as_param(),
            timeframe.api_type(),
            time_from,
            time_to,
        );
        self.get_data(&url, RetryPolicy::Idempotent).await
    }

    // ── Tokens ───────────────────────────────────────────────────────────

    pub async fn get_top_coins(&self) -> Result<Vec<TokenSummaryResponse>, HttpError> {
        let url = format!("{}/api/v1/on-chain/top-coins", self.base_url);
        let items: Items<TokenSummaryResponse> =
            self.get_data(&url, RetryPolicy::Idempotent).await?;
        Ok(items.items)
    }

    // ── Order histories ──────────────────────────────────────────────────

    pub async fn get_histories(
        &self,
        query: &HistoryQuery,
    ) -> Result<Vec<TransactionResponse>, HttpError> {
        let mut url = format!(
            "{}/api/v1/on-chain/histories?address={}&offset={}&limit={}",
            self.base_url,
            urlencoding::encode(query.address.as_str()),
            query.offset,
            query.limit,
        );
        if let Some(sort_by) = &query.sort_by {
            url = format!("{}&sort_by={}", url, sort_by);
        }
        if let Some(sort_type) = &query.sort_type {
            url = format!("{}&sort_type={}", url, sort_type.as_str());
        }
        if let Some(tx_type) = &query.tx_type {
            url = format!("{}&tx_type={}", url, tx_type);
        }
        if let Some(owner) = &query.owner {
            url = format!("{}&owner={}", url, urlencoding::encode(owner.as_str()));
        }

        let items: Items<TransactionResponse> =
            self.get_data(&url, RetryPolicy::Idempotent).await?;
        Ok(items.items)
    }

    pub async fn get_my_histories(
        &self,
        address: &TokenAddress,
        wallet: &WalletAddress,
    ) -> Result<Vec<TransactionResponse>, HttpError> {
        let url = format!(
            "{}/api/v1/on-chain/my-histories/{}?walletAddress={}",
            self.base_url,
            urlencoding::encode(address.as_str()),
            urlencoding::encode(wallet.as_str()),
        );
        let items: Items<TransactionResponse> =
            self.get_data(&url, RetryPolicy::Idempotent).await?;
        Ok(items.items)
    }

    // ── Master trading ───────────────────────────────────────────────────

    pub async fn get_masters(&self) -> Result<Vec<MasterResponse>, HttpError> {
        let url = format!("{}/api/v1/master-trading/masters", self.base_url);
        let items: Items<MasterResponse> = self.get_data(&url, RetryPolicy::Idempotent).await?;
        Ok(items.items)
    }

    pub async fn get_master_detail(
        &self,
        address: &WalletAddress,
    ) -> Result<MasterDetailResponse, HttpError> {
        let url = format!(
            "{}/api/v1/master-trading/masters/{}",
            self.base_url,
            urlencoding::encode(address.as_str()),
        );
        self.get_data(&url, RetryPolicy::Idempotent).await
    }

    pub async fn post_member_connect(
        &self,
        request: &ConnectRequest,
    ) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}/api/v1/master-trading/member-connect", self.base_url);
        self.post(&url, request, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// GET and unwrap the `{"data": ...}` envelope.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let envelope: Envelope<T> = self.get(url, retry).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => config.retries_status(*status),
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                tokio::time::sleep(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        tokio::time::sleep(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for MemepumpHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwrap() {
        let body = r#"{"data": {"items": [1, 2, 3]}}"#;
        let envelope: Envelope<Items<u32>> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.items, vec![1, 2, 3]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = MemepumpHttp::new("https://api.example.com/");
        assert_eq!(http.base_url(), "https://api.example.com");
    }
}
