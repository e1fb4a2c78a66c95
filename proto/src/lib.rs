//! HTTP contract for the article proxy
//!
//! Shared by the worker (which forwards requests upstream) and the browser
//! client (which calls the worker). Upstream payloads are passed through as
//! raw JSON; the typed `ArticleList` is only used by the client to render.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use url::Url;

/// Path the worker serves the proxy on
pub const PROXY_PATH: &str = "/api/zenn";

/// Seconds a successful upstream response may be cached
pub const CACHE_MAX_AGE: u32 = 300;

/// Site that article paths are relative to
pub const ZENN_ORIGIN: &str = "https://zenn.dev";

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Latest,
    Liked,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Latest => "latest",
            Order::Liked => "liked",
        }
    }
}

impl std::str::FromStr for Order {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Order::Latest),
            "liked" => Ok(Order::Liked),
            other => Err(QueryError::InvalidOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid order '{0}', expected 'latest' or 'liked'")]
    InvalidOrder(String),
    #[error("invalid page '{0}', expected a positive integer")]
    InvalidPage(String),
}

/// Client-supplied listing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArticleQuery {
    pub order: Option<Order>,
    pub page: Option<u32>,
}

impl ArticleQuery {
    /// Parse `order` and `page` out of query pairs; other keys are ignored
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "order" => query.order = Some(value.parse()?),
                "page" => {
                    let page = value
                        .parse::<u32>()
                        .ok()
                        .filter(|p| *p >= 1)
                        .ok_or_else(|| QueryError::InvalidPage(value.to_string()))?;
                    query.page = Some(page);
                }
                _ => {}
            }
        }
        Ok(query)
    }

    /// Upstream listing URL for `username`, forwarding only what was given
    pub fn upstream_url(&self, base: &Url, username: &str) -> Url {
        let mut url = base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.append_pair("username", username);
            self.append_to(&mut pairs);
        }
        url
    }

    /// Proxy path the browser requests, e.g. `/api/zenn?order=liked&page=2`
    pub fn proxy_path(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        self.append_to(&mut serializer);
        let query = serializer.finish();
        if query.is_empty() {
            PROXY_PATH.to_string()
        } else {
            format!("{}?{}", PROXY_PATH, query)
        }
    }

    fn append_to<T: form_urlencoded::Target>(&self, pairs: &mut form_urlencoded::Serializer<'_, T>) {
        if let Some(order) = self.order {
            pairs.append_pair("order", order.as_str());
        }
        if let Some(page) = self.page {
            pairs.append_pair("page", &page.to_string());
        }
    }
}

// ============================================================================
// Bodies
// ============================================================================

/// Error payload returned by the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"unknown"}"#.to_string())
    }
}

/// Subset of the upstream article listing the page renders
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleList {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub liked_count: u32,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub path: String,
}

impl Article {
    /// Absolute link to the article, if the listing carried its path
    pub fn url(&self) -> Option<String> {
        self.path
            .starts_with('/')
            .then(|| format!("{}{}", ZENN_ORIGIN, self.path))
    }
}

/// Either an article listing or the proxy's error payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProxyResponse {
    Error(ErrorBody),
    Articles(ArticleList),
}

impl ProxyResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

// ============================================================================
// Headers
// ============================================================================

/// Permissive CORS headers sent on every proxy response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

pub fn cache_control() -> String {
    format!("public, max-age={}", CACHE_MAX_AGE)
}
