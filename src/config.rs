use crate::error::*;
use smart_default::SmartDefault;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.toggl.com/api/";
pub const DEFAULT_API_VERSION: &str = "v8";
pub const DEFAULT_CLIENT_NAME: &str = "toggl-ng";

/// optional settings given next to the api token
#[derive(Debug, Clone, SmartDefault)]
pub struct Options {
    /// workspace id stamped as `wid` into create and update payloads
    pub default_workspace: Option<u64>,
    /// `created_with` tag of time entries
    pub client_name: Option<String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub timeout: Option<Duration>,
}

impl Options {
    pub fn with_default_workspace(mut self, wid: u64) -> Self {
        self.default_workspace = Some(wid);
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Settled, immutable view of [`Options`] held by a client.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: Url,
    api_version: String,
    default_workspace: Option<u64>,
    client_name: String,
    timeout: Option<Duration>,
}

impl Config {
    pub fn new(options: Options) -> Result<Self> {
        let Options {
            default_workspace,
            client_name,
            base_url,
            api_version,
            timeout,
        } = options;

        let base_url = non_blank(base_url);
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let api_version = non_blank(api_version)
            .as_deref()
            .unwrap_or(DEFAULT_API_VERSION)
            .trim_matches('/')
            .to_string();

        Ok(Self {
            base_url,
            api_version,
            // workspace ids start at 1, 0 stands for "none"
            default_workspace: default_workspace.filter(|wid| *wid != 0),
            client_name: non_blank(client_name)
                .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn default_workspace(&self) -> Option<u64> {
        self.default_workspace
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `base/version/collection[/id][/action]`, skipping absent or empty segments
    pub fn build_url(
        &self,
        collection: &str,
        id: Option<&str>,
        action: Option<&str>,
    ) -> Result<Url> {
        let mut path = format!("./{}", self.api_version);

        for segment in [Some(collection), id, action].into_iter().flatten() {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            if !path.ends_with('/') {
                path.push('/');
            }
            path.push_str(segment);
        }

        Ok(self.base_url.join(&path)?)
    }
}

/// `None` for absent, empty or whitespace-only values
pub(crate) fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_base_url(s: &str) -> Result<Url> {
    let mut url = Url::parse(s)?;
    // join() drops the last path segment unless the base ends with a slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(Options::default().with_default_workspace(777)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::new(Options::default()).unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.api_version(), "v8");
        assert_eq!(config.client_name(), DEFAULT_CLIENT_NAME);
        assert_eq!(config.default_workspace(), None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_build_url_shapes() -> anyhow::Result<()> {
        let config = config();
        assert_eq!(
            config.build_url("clients", None, None)?.as_str(),
            "https://www.toggl.com/api/v8/clients"
        );
        assert_eq!(
            config.build_url("clients", Some("42"), None)?.as_str(),
            "https://www.toggl.com/api/v8/clients/42"
        );
        assert_eq!(
            config.build_url("clients", None, Some("projects"))?.as_str(),
            "https://www.toggl.com/api/v8/clients/projects"
        );
        assert_eq!(
            config.build_url("clients", Some("42"), Some("projects"))?.as_str(),
            "https://www.toggl.com/api/v8/clients/42/projects"
        );
        Ok(())
    }

    #[test]
    fn test_build_url_single_slashes() -> anyhow::Result<()> {
        let config = config();
        assert_eq!(
            config
                .build_url("projects", Some("7"), Some("/project_users"))?
                .as_str(),
            "https://www.toggl.com/api/v8/projects/7/project_users"
        );
        assert_eq!(
            config.build_url("time_entries/current", Some(""), None)?.as_str(),
            "https://www.toggl.com/api/v8/time_entries/current"
        );
        Ok(())
    }

    #[test]
    fn test_base_url_without_trailing_slash() -> anyhow::Result<()> {
        let config = Config::new(
            Options::default()
                .with_base_url("http://127.0.0.1:8080/api")
                .with_api_version("/v9/"),
        )?;
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:8080/api/");
        assert_eq!(
            config.build_url("me", None, None)?.as_str(),
            "http://127.0.0.1:8080/api/v9/me"
        );
        Ok(())
    }

    #[test]
    fn test_zero_workspace_is_none() -> anyhow::Result<()> {
        let config = Config::new(Options::default().with_default_workspace(0))?;
        assert_eq!(config.default_workspace(), None);
        Ok(())
    }

    #[test]
    fn test_blank_options_fall_back_to_defaults() -> anyhow::Result<()> {
        let config = Config::new(
            Options::default()
                .with_base_url("")
                .with_api_version("  ")
                .with_client_name(""),
        )?;
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.client_name(), DEFAULT_CLIENT_NAME);
        Ok(())
    }

    #[test]
    fn test_invalid_base_url() {
        let r = Config::new(Options::default().with_base_url("not a url"));
        assert!(matches!(r, Err(Error::UrlParse(_))));
    }
}
