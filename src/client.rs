//! HTTP client shared by all providers.
//!
//! Sends authenticated GETs, throttled by a client-side rate limiter, and
//! optionally caches the decoded JSON on disk.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::{AppConfig, RateLimitConfig};
use crate::credentials::Credentials;
use crate::endpoint::{Endpoint, Provider};
use crate::error::{Error, Result};

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

pub struct ApiClient {
    http: reqwest::Client,
    credentials: Credentials,
    limiter: Arc<Limiter>,
    /// Replaces every provider's `https://{host}` root when set.
    base_url: Option<String>,
    data_dir: PathBuf,
}

impl ApiClient {
    pub fn new(config: &AppConfig, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            credentials,
            limiter: create_rate_limiter(&config.rate_limit),
            base_url: None,
            data_dir: config.storage.data_dir.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn base_for(&self, provider: &Provider) -> String {
        self.base_url.clone().unwrap_or_else(|| provider.base_url())
    }

    /// `x-rapidapi-host` plus the provider's credential headers.
    pub fn headers_for(&self, provider: &Provider) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            RAPIDAPI_HOST_HEADER,
            HeaderValue::from_static(provider.host()),
        );

        for (name, value) in self.credentials.exposed_headers(provider.api_provider())? {
            let invalid = || Error::InvalidHeader {
                provider: provider.api_provider().to_string(),
                name: name.to_string(),
            };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let mut header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            header_value.set_sensitive(true);
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// GET `url` and decode the JSON body, dumping it to `dumpdest` if given.
    #[instrument(skip(self, headers, query, dumpdest))]
    pub async fn get_json(
        &self,
        url: &str,
        headers: HeaderMap,
        query: &[(String, String)],
        dumpdest: Option<&Path>,
    ) -> Result<Value> {
        self.limiter.until_ready().await;

        info!(?query, "Retrieving data");
        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            status = %response.status(),
            "Request completed"
        );

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status,
                url: url.to_string(),
                body,
            });
        }

        let data: Value = response.json().await?;

        if let Some(dest) = dumpdest {
            write_json(dest, &data)?;
        }

        Ok(data)
    }

    /// Retrieve data from `endpoint`.
    pub async fn retrieve(
        &self,
        endpoint: &Endpoint,
        values: &[&str],
        opts: &[(&str, &str)],
        dumpdest: Option<&Path>,
    ) -> Result<Value> {
        let request = endpoint.request(&self.base_for(endpoint.provider()), values, opts)?;
        let headers = self.headers_for(endpoint.provider())?;
        self.get_json(&request.url, headers, &request.query, dumpdest)
            .await
    }

    /// Retrieve data from `endpoint` and cache it at its sample location.
    pub async fn dump_sample(
        &self,
        endpoint: &Endpoint,
        values: &[&str],
        opts: &[(&str, &str)],
    ) -> Result<Value> {
        let dest = endpoint.sample_path(&self.data_dir, values, opts)?;
        let data = self.retrieve(endpoint, values, opts, Some(&dest)).await?;
        info!(path = %dest.display(), "Sample dumped");
        Ok(data)
    }

    /// Read a sample previously cached by [`ApiClient::dump_sample`].
    pub fn read_sample(&self, endpoint: &Endpoint, values: &[&str], opts: &[(&str, &str)]) -> Result<Value> {
        let dest = endpoint.sample_path(&self.data_dir, values, opts)?;
        read_json(&dest)
    }
}

/// Write `data` as 4-space indented JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;

    std::fs::write(path, buf).map_err(|e| Error::io(path, e))
}

pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

fn create_rate_limiter(config: &RateLimitConfig) -> Arc<Limiter> {
    let rps = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(config.burst_size).unwrap_or(rps);

    let quota = Quota::per_second(rps).allow_burst(burst);
    Arc::new(RateLimiter::direct(quota))
}
