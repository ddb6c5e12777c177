#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("You must provide your API token to use the Toggl API")]
    MissingToken,
    #[error("invalid default workspace id: {0}")]
    InvalidWorkspace(String),
    #[error("no default workspace configured")]
    MissingDefaultWorkspace,
    #[error("json encode/decode fail: {0}")]
    JsonDecode(#[from] serde_json::Error),
    #[error("build header value error: {0}")]
    HeaderValue(#[from] http::header::InvalidHeaderValue),
    #[error("parse url string: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("client builder without authenticator")]
    ClientBuilderMissAuthenticator,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("api server error code={status}")]
    ApiError { status: u16, body: String },
    #[error("{0} not yet implemented")]
    NotImplemented(&'static str),
}

impl Error {
    /// http status of a rejected response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiError { status, .. } => Some(*status),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
