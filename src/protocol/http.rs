// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for AV receivers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::{Client, Response};

use crate::error::{Error, ParseError, ProtocolError};
use crate::protocol::{Protocol, ResponseCache};
use crate::response::{AppCommandResponse, StatusXml, appcommand_request};
use crate::types::{AppCommand, CacheId};

/// Path of the aggregated status API.
const APPCOMMAND_PATH: &str = "/goform/AppCommand.xml";

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Connection settings of a receiver web interface.
///
/// Receivers serve plain HTTP only. The port is left out of the base URL
/// when it is 80.
///
/// # Examples
///
/// ```
/// use avr_soundmode::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.120");
/// assert_eq!(config.base_url(), "http://192.168.1.120");
///
/// // AVR-X 2016 models also serve the AppCommand API on port 8080
/// let config = HttpConfig::new("192.168.1.120")
///     .with_port(8080)
///     .with_timeout(Duration::from_millis(500));
/// assert_eq!(config.base_url(), "http://192.168.1.120:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Port of the receiver web interface.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// Creates a configuration for `host` with the default port and timeout.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` for an empty host, or an HTTP
    /// error if the client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        HttpClient::with_base_url(self.base_url(), self.timeout)
    }
}


// ============================================================================
// HttpClient - Receiver HTTP client
// ============================================================================

/// HTTP client for communicating with AV receivers.
///
/// Clones share the registered `AppCommand` tags and the response cache.
///
/// # Examples
///
/// ```no_run
/// use avr_soundmode::protocol::{HttpClient, Protocol};
///
/// # async fn example() -> avr_soundmode::Result<()> {
/// let client = HttpClient::new("192.168.1.120")?;
/// client.send_command("/goform/formiPhoneAppDirect.xml?MSSTEREO").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
    update_tags: Arc<Mutex<Vec<AppCommand>>>,
    cache: Arc<Mutex<ResponseCache>>,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the receiver, optionally
    ///   prefixed with `http://` or `https://`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        let host = host.into();
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("http://{host}")
        };

        Self::with_base_url(base_url, HttpConfig::DEFAULT_TIMEOUT)
    }

    fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ProtocolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self {
            base_url,
            client,
            timeout,
            update_tags: Arc::new(Mutex::new(Vec::new())),
            cache: Arc::new(Mutex::new(ResponseCache::new())),
        })
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the tags registered for aggregated `AppCommand` updates.
    #[must_use]
    pub fn appcommand_update_tags(&self) -> Vec<AppCommand> {
        self.update_tags.lock().clone()
    }

    /// Builds the URL for a command path.
    ///
    /// The part after `?` is the receiver command itself and is
    /// percent-encoded, so `?MSDOLBY D +NEO:X M` keeps its `+` and spaces.
    fn build_command_url(&self, command: &str) -> String {
        match command.split_once('?') {
            Some((path, payload)) => {
                format!("{}{path}?{}", self.base_url, urlencoding::encode(payload))
            }
            None => format!("{}{command}", self.base_url),
        }
    }

    fn cached(&self, key: &str, cache_id: Option<&CacheId>) -> Option<String> {
        let cache_id = cache_id?;
        self.cache.lock().get(key, cache_id).map(str::to_owned)
    }

    fn store(&self, key: String, cache_id: Option<&CacheId>, body: &str) {
        if let Some(cache_id) = cache_id {
            self.cache.lock().insert(key, *cache_id, body.to_string());
        }
    }

    fn request_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(format!("{}: {err}", self.base_url))
        } else {
            ProtocolError::Http(err)
        }
    }

    async fn read_body(&self, response: Response) -> Result<String, ProtocolError> {
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::HttpStatus(response.status().as_u16()));
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(body)
    }

    async fn get_text(
        &self,
        path: &str,
        cache_id: Option<&CacheId>,
    ) -> Result<String, ProtocolError> {
        let url = format!("{}{path}", self.base_url);
        let key = format!("GET {url}");
        if let Some(body) = self.cached(&key, cache_id) {
            tracing::debug!(url = %url, "Using cached HTTP response");
            return Ok(body);
        }

        tracing::debug!(url = %url, "Sending HTTP GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let body = self.read_body(response).await?;

        self.store(key, cache_id, &body);
        Ok(body)
    }

    async fn post_xml(
        &self,
        path: &str,
        body: String,
        cache_id: Option<&CacheId>,
    ) -> Result<String, ProtocolError> {
        let url = format!("{}{path}", self.base_url);
        let key = format!("POST {url} {body}");
        if let Some(body) = self.cached(&key, cache_id) {
            tracing::debug!(url = %url, "Using cached HTTP response");
            return Ok(body);
        }

        tracing::debug!(url = %url, body = %body, "Sending HTTP POST");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let text = self.read_body(response).await?;

        self.store(key, cache_id, &text);
        Ok(text)
    }
}

/// Status pages a receiver model does not serve. Any other error status
/// means the receiver failed to answer.
fn is_missing_page(status: u16) -> bool {
    matches!(status, 403 | 404)
}

impl Protocol for HttpClient {
    fn add_appcommand_update_tag(&self, tag: AppCommand) {
        let mut tags = self.update_tags.lock();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    async fn query_appcommand(
        &self,
        tags: &[AppCommand],
        global_update: bool,
        cache_id: Option<&CacheId>,
    ) -> Result<HashMap<AppCommand, String>, Error> {
        let mut commands = if global_update {
            self.appcommand_update_tags()
        } else {
            Vec::new()
        };
        for tag in tags {
            if !commands.contains(tag) {
                commands.push(*tag);
            }
        }

        let body = self
            .post_xml(APPCOMMAND_PATH, appcommand_request(&commands), cache_id)
            .await?;
        let values = AppCommandResponse::parse(&body, &commands)?.into_values();

        if let Some(missing) = tags.iter().find(|tag| !values.contains_key(*tag)) {
            return Err(ParseError::MissingField(missing.response_tag().to_string()).into());
        }

        Ok(values)
    }

    async fn query_status_xml(
        &self,
        attrs: &[(&str, &str)],
        urls: &[&str],
        cache_id: Option<&CacheId>,
    ) -> Result<HashMap<String, String>, Error> {
        let mut pending = attrs.to_vec();
        let mut values = HashMap::new();
        if pending.is_empty() {
            return Ok(values);
        }

        for url in urls {
            let body = match self.get_text(url, cache_id).await {
                Ok(body) => body,
                Err(ProtocolError::HttpStatus(status)) if is_missing_page(status) => {
                    tracing::debug!(url = %url, status, "Status page not available");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let page = StatusXml::parse(&body)?;
            pending.retain(|(name, path)| match page.find(path) {
                Some(value) => {
                    values.insert((*name).to_string(), value.to_string());
                    false
                }
                None => true,
            });

            if pending.is_empty() {
                return Ok(values);
            }
        }

        let missing: Vec<&str> = pending.iter().map(|(_, path)| *path).collect();
        Err(ParseError::MissingField(missing.join(", ")).into())
    }

    async fn send_command(&self, command: &str) -> Result<(), Error> {
        let url = self.build_command_url(command);

        tracing::debug!(url = %url, "Sending HTTP command");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        self.read_body(response).await?;

        Ok(())
    }
}
