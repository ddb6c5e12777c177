use crate::error::*;
use async_trait::async_trait;
use base64::Engine;
use http::header::{self, HeaderValue};
use reqwest::Request;
use tracing::*;

/// password half of the basic credential when authenticating with an api token
pub const API_TOKEN_PASSWORD: &str = "api_token";

#[async_trait]
pub trait AuthenticatorTrait: Send + Sync {
    async fn authorize(&self, req: &mut Request) -> Result<()>;
}

/// `Authorization: Basic base64(username:password)`
#[derive(Clone)]
pub struct Basic {
    header: String,
}

impl Basic {
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credential = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credential);
        Self {
            header: format!("Basic {}", encoded),
        }
    }

    pub fn header_value(&self) -> &str {
        &self.header
    }
}

impl std::fmt::Debug for Basic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Basic").field("header", &"<redacted>").finish()
    }
}

#[async_trait]
impl AuthenticatorTrait for Basic {
    async fn authorize(&self, req: &mut Request) -> Result<()> {
        let k = header::AUTHORIZATION;
        let mut v = HeaderValue::from_str(&self.header)?;
        v.set_sensitive(true);
        if let Some(k) = req.headers_mut().insert(k, v) {
            warn!("auth header {:?} exists and overwroted", k);
        }
        Ok(())
    }
}

/// toggl api token, sent as basic auth with `api_token` as password
#[derive(Debug, Clone)]
pub struct ApiToken {
    inner: Basic,
}

impl ApiToken {
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let token = token.as_ref();
        if token.is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(Self {
            inner: Basic::new(token, API_TOKEN_PASSWORD),
        })
    }

    pub fn header_value(&self) -> &str {
        self.inner.header_value()
    }
}

#[async_trait]
impl AuthenticatorTrait for ApiToken {
    async fn authorize(&self, req: &mut Request) -> Result<()> {
        self.inner.authorize(req).await
    }
}
