use super::{envelope, NamedResource};
use crate::{client::Client, error::*};
use http::Method;
use serde_json::Value;
use std::fmt::Display;
use url::Url;

const COLLECTION: &str = "tags";

pub struct Tags<'a> {
    client: &'a Client,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn url(&self) -> Result<Url> {
        self.client.build_url(COLLECTION, None, None)
    }

    pub fn payload(&self, name: impl Into<String>) -> Result<Value> {
        envelope(
            "tag",
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

    pub async fn update(&self, id: impl Display, name: impl Into<String>) -> Result<Value> {
        let body = self.payload(name)?;
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), None)?;
        self.client
            .call_impl(Some(Method::PUT), url, Some(body))
            .await
    }

    pub async fn del(&self, id: impl Display) -> Result<Value> {
        let url = self
            .client
            .build_url(COLLECTION, Some(&id.to_string()), None)?;
        self.client.call_impl(Some(Method::DELETE), url, None).await
    }
}
