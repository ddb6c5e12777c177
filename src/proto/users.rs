use crate::{client::Client, error::*};
use serde_json::Value;
use url::Url;

pub struct Users<'a> {
    client: &'a Client,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn url(&self) -> Result<Url> {
        self.client.build_url("me", None, None)
    }

    /// the user owning the api token
    pub async fn current(&self) -> Result<Value> {
        self.client.call_impl(None, self.url()?, None).await
    }
}
