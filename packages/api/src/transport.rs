//! # Transports
//!
//! A [`Transport`] performs one GET against a fully built URL and returns the
//! response body. It knows nothing about the API's payloads; correlation,
//! deadlines and decoding happen in [`crate::MissionsClient`].
//!
//! | Transport | Use |
//! |-----------|-----|
//! | [`HttpTransport`] | The remote API over `reqwest` (fetch API in the browser). |
//! | [`DemoBackend`] | In-process simulated API with a fixed delay. |
//! | [`Backend`] | Either of the above, picked from [`store::config::ApiConfig`]. |

use std::future::Future;

use reqwest::Url;
use store::config::ApiConfig;

use crate::demo::DemoBackend;
use crate::error::ApiError;

/// Async GET returning the raw response body.
pub trait Transport {
    fn fetch(&self, url: Url) -> impl Future<Output = Result<String, ApiError>>;
}

/// `reqwest`-backed transport for the remote API.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: Url) -> Result<String, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Transport chosen at startup.
#[derive(Clone, Debug)]
pub enum Backend {
    Http(HttpTransport),
    Demo(DemoBackend),
}

impl Backend {
    pub fn from_config(config: &ApiConfig) -> Self {
        if config.demo {
            Self::Demo(DemoBackend::new().with_delay(config.demo_delay()))
        } else {
            Self::Http(HttpTransport::new())
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo(_))
    }
}

impl Transport for Backend {
    async fn fetch(&self, url: Url) -> Result<String, ApiError> {
        match self {
            Self::Http(http) => http.fetch(url).await,
            Self::Demo(demo) => demo.fetch(url).await,
        }
    }
}
