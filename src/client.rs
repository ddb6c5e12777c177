use crate::auth::*;
use crate::config::*;
use crate::error::*;
use crate::proto::*;
use http::header;
use http::Method;
use serde_json::Value;
use smart_default::SmartDefault;
use std::time::Duration;
use tracing::*;
use url::Url;

#[derive(SmartDefault)]
pub struct ClientBuilder {
    pub options: Options,
    pub authenticator: Option<Box<dyn AuthenticatorTrait>>,
}

impl ClientBuilder {
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        self.options.base_url = Some(base_url.to_string());
        Ok(self)
    }

    pub fn with_version(mut self, version: impl AsRef<str>) -> Result<Self> {
        self.options.api_version = Some(version.as_ref().to_string());
        Ok(self)
    }

    pub fn with_authenticator(
        mut self,
        authenticator: impl AuthenticatorTrait + 'static,
    ) -> Result<Self> {
        self.authenticator = Some(Box::new(authenticator));
        Ok(self)
    }

    pub fn with_token(self, token: impl AsRef<str>) -> Result<Self> {
        self.with_authenticator(ApiToken::new(token)?)
    }

    pub fn with_default_workspace(mut self, wid: u64) -> Self {
        self.options.default_workspace = Some(wid);
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.options.client_name = Some(name.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Client> {
        let Self {
            options,
            authenticator,
        } = self;

        let authenticator = authenticator.ok_or(Error::ClientBuilderMissAuthenticator)?;

        let config = Config::new(options)?;

        Ok(Client {
            config,
            authenticator,
            client: reqwest::Client::new(),
        })
    }
}

pub struct Client {
    config: Config,
    authenticator: Box<dyn AuthenticatorTrait>,
    client: reqwest::Client,
}

impl Client {
    /// Client authenticated with a toggl api token.
    ///
    /// Fails with [`Error::MissingToken`] when `token` is empty, whatever the options.
    pub fn new(token: impl AsRef<str>, options: Option<Options>) -> Result<Self> {
        Self::builder()
            .with_token(token)?
            .with_options(options.unwrap_or_default())
            .build()
    }

    pub fn from_env_file(env: impl AsRef<str>) -> Result<Self> {
        let _ = dotenv::from_filename(env.as_ref());
        Self::from_env()
    }

    pub fn from_default_env() -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Reads `TOGGL_API_TOKEN` plus the optional `TOGGL_DEFAULT_WORKSPACE`,
    /// `TOGGL_CLIENT_NAME`, `TOGGL_API_BASE_URL` and `TOGGL_API_VERSION`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("TOGGL_API_TOKEN").unwrap_or_default();

        let default_workspace = match env_var("TOGGL_DEFAULT_WORKSPACE") {
            Some(wid) => Some(
                wid.parse::<u64>()
                    .map_err(|_| Error::InvalidWorkspace(wid.clone()))?,
            ),
            None => None,
        };

        let options = Options {
            default_workspace,
            client_name: env_var("TOGGL_CLIENT_NAME"),
            base_url: env_var("TOGGL_API_BASE_URL"),
            api_version: env_var("TOGGL_API_VERSION"),
            timeout: None,
        };

        Self::new(token, Some(options))
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_url(
        &self,
        collection: &str,
        id: Option<&str>,
        action: Option<&str>,
    ) -> Result<Url> {
        self.config.build_url(collection, id, action)
    }

    pub fn clients(&self) -> Clients<'_> {
        Clients::new(self)
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    pub fn timers(&self) -> Timers<'_> {
        Timers::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn workspaces(&self) -> Workspaces<'_> {
        Workspaces::new(self)
    }

    /// Sends one request and returns the decoded json answer.
    ///
    /// Without an explicit `method` the verb is GET, or POST when a body is given.
    /// A successful response with an empty body yields `Value::Null`. Any other
    /// status is returned as [`Error::ApiError`] with the raw body.
    pub async fn call_impl(
        &self,
        method: Option<Method>,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value> {
        let method = resolve_method(method, body.is_some());

        debug!(%method, %url, "REQ");

        let mut builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = body {
            for l in serde_json::to_string_pretty(&body)?.lines() {
                trace!(%l, "REQ");
            }
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        let mut req = builder.build()?;

        self.authenticator.authorize(&mut req).await?;

        let rep = self.client.execute(req).await?;

        let status = rep.status();

        let bytes = rep.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            for l in body.lines() {
                error!(%l, "REP");
            }
            return Err(Error::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            trace!(%status, "REP empty body");
            return Ok(Value::Null);
        }

        let rep: Value = serde_json::from_slice(bytes.as_ref())?;

        for l in serde_json::to_string_pretty(&rep)?.lines() {
            trace!(%l, "REP");
        }

        Ok(rep)
    }
}

/// blank variables count as unset, as `KEY=` lines in `.env` files are common
fn env_var(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

pub(crate) fn resolve_method(method: Option<Method>, has_body: bool) -> Method {
    match (method, has_body) {
        (Some(method), _) => method,
        (None, false) => Method::GET,
        (None, true) => Method::POST,
    }
}
