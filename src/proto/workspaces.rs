use crate::{client::Client, error::*};
use serde_json::Value;
use std::fmt::Display;
use url::Url;

const COLLECTION: &str = "workspaces";

pub struct Workspaces<'a> {
    client: &'a Client,
}

impl<'a> Workspaces<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn url(&self) -> Result<Url> {
        self.client.build_url(COLLECTION, None, None)
    }

    pub async fn get(&self, id: impl Display) -> Result<Value> {
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), None)?;
        self.client.call_impl(None, url, None).await
    }

    pub async fn all(&self) -> Result<Value> {
        self.client.call_impl(None, self.url()?, None).await
    }

    pub async fn tags(&self, id: impl Display) -> Result<Value> {
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), Some("tags"))?;
        self.client.call_impl(None, url, None).await
    }
}
