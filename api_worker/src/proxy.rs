//! Article proxy pipeline, independent of the Workers runtime

use proto::{cache_control, ArticleQuery, ErrorBody, CORS_HEADERS};
use worker::Url;

pub const DEFAULT_USERNAME: &str = "takoserver";
pub const DEFAULT_API_BASE: &str = "https://zenn.dev/api/articles";

/// Proxy settings, read from worker vars
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub username: String,
    pub api_base: Url,
}

impl ProxyConfig {
    /// Missing or blank values fall back to the defaults; so does an unparsable base
    pub fn new(username: Option<String>, api_base: Option<String>) -> Self {
        let username = username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let api_base = api_base
            .and_then(|base| Url::parse(base.trim()).ok())
            .unwrap_or_else(default_api_base);
        Self { username, api_base }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}

/// Abstract upstream fetch for testing
#[allow(async_fn_in_trait)]
pub trait Upstream {
    /// Returns (status, body), or a description of the network failure
    async fn get(&self, url: &Url) -> Result<(u16, String), String>;
}

/// Response the worker should send back
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ProxyReply {
    fn json(status: u16, body: String) -> Self {
        let mut headers: Vec<(String, String)> = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(status, ErrorBody::new(message).to_json())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Validate the client query and build the upstream URL
pub fn plan_request<I, K, V>(pairs: I, config: &ProxyConfig) -> Result<Url, ProxyReply>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = ArticleQuery::from_pairs(pairs).map_err(|e| ProxyReply::error(400, e.to_string()))?;
    Ok(query.upstream_url(&config.api_base, &config.username))
}

/// Map an upstream answer to the proxy reply; bodies on success pass through untouched
pub fn upstream_reply(status: u16, body: String) -> ProxyReply {
    if (200..300).contains(&status) {
        let mut reply = ProxyReply::json(status, body);
        reply
            .headers
            .push(("Cache-Control".to_string(), cache_control()));
        reply
    } else {
        ProxyReply::error(status, format!("Upstream returned {}", status))
    }
}

pub fn network_failure(detail: &str) -> ProxyReply {
    ProxyReply::error(500, format!("Failed to fetch articles: {}", detail))
}

/// CORS preflight answer
pub fn preflight() -> ProxyReply {
    ProxyReply {
        status: 204,
        headers: CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: String::new(),
    }
}

/// Full proxy pass: validate, fetch once, map. Never retries.
pub async fn forward<I, K, V, U>(pairs: I, config: &ProxyConfig, upstream: &U) -> ProxyReply
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
    U: Upstream,
{
    let url = match plan_request(pairs, config) {
        Ok(url) => url,
        Err(reply) => return reply,
    };
    match upstream.get(&url).await {
        Ok((status, body)) => upstream_reply(status, body),
        Err(detail) => network_failure(&detail),
    }
}
