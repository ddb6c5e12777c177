use super::{envelope, NamedResource};
use crate::{client::Client, error::*};
use http::Method;
use serde_json::Value;
use std::fmt::Display;
use url::Url;

const COLLECTION: &str = "projects";

pub struct Projects<'a> {
    client: &'a Client,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn url(&self) -> Result<Url> {
        self.client.build_url(COLLECTION, None, None)
    }

    pub fn payload(&self, name: impl Into<String>) -> Result<Value> {
        envelope(
            "project",
            NamedResource {
                name: name.into(),
                wid: self.client.config().default_workspace(),
            },
        )
    }

    pub async fn create(&self, name: impl Into<String>) -> Result<Value> {
        let body = self.payload(name)?;
        self.client
            .call_impl(Some(Method::POST), self.url()?, Some(body))
            .await
    }

    pub async fn get(&self, id: impl Display) -> Result<Value> {
        let url = self.item_url(id, None)?;
        self.client.call_impl(None, url, None).await
    }

    pub async fn update(&self, id: impl Display, name: impl Into<String>) -> Result<Value> {
        let body = self.payload(name)?;
        let url = self.item_url(id, None)?;
        self.client
            .call_impl(Some(Method::PUT), url, Some(body))
            .await
    }

    pub async fn del(&self, id: impl Display) -> Result<Value> {
        let url = self.item_url(id, None)?;
        self.client.call_impl(Some(Method::DELETE), url, None).await
    }

    pub async fn get_users(&self, id: impl Display) -> Result<Value> {
        let url = self.item_url(id, Some("project_users"))?;
        self.client.call_impl(None, url, None).await
    }

    pub async fn get_tasks(&self, id: impl Display) -> Result<Value> {
        let url = self.item_url(id, Some("tasks"))?;
        self.client.call_impl(None, url, None).await
    }

    /// Projects of the default workspace, listed through
    /// `/workspaces/{wid}/projects` rather than `/projects`.
    pub async fn get_all(&self) -> Result<Value> {
        let url = self.all_url()?;
        self.client.call_impl(None, url, None).await
    }

    pub fn all_url(&self) -> Result<Url> {
        let wid = self
            .client
            .config()
            .default_workspace()
            .ok_or(Error::MissingDefaultWorkspace)?;
        self.client
            .build_url("workspaces", Some(&wid.to_string()), Some(COLLECTION))
    }

    fn item_url(&self, id: impl Display, action: Option<&str>) -> Result<Url> {
        self.client
            .build_url(COLLECTION, Some(&id.to_string()), action)
    }
}
