use std::time::Duration;

use anyhow::Context as _;
use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub redirect_limit: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            redirect_limit: 10,
            user_agent: concat!("puzzlebook/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("GET {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url}: {status}")]
    Status { url: String, status: StatusCode },
}

/// Follows redirects for a link and reports where it ends up.
pub trait RedirectResolver {
    fn resolve(&self, url: &str) -> Result<String, FetchError>;
}

/// Downloads image bytes.
pub trait ImageSource {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP client shared by link resolution and image downloads.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;
        self.client
            .get(parsed)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_owned(),
                source,
            })
    }
}

impl RedirectResolver for HttpClient {
    fn resolve(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url)?;
        let destination = response.url().to_string();
        tracing::debug!(%url, %destination, status = %response.status(), "resolved link");
        Ok(destination)
    }
}

impl ImageSource for HttpClient {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status,
            });
        }
        let bytes = response.bytes().map_err(|source| FetchError::Request {
            url: url.to_owned(),
            source,
        })?;
        Ok(bytes.to_vec())
    }
}
