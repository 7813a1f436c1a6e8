//! Read-only access to the service catalog

use reqwest::Client;
use serde_json::Value;

use crate::booking::{normalize_service, Service};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

/// Client for the service catalog
pub struct ServicesClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl ServicesClient {
    pub(crate) fn new(base_url: &str, api_token: Option<&str>, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.map(str::to_string),
            client,
        }
    }

    fn authorize<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        match &self.api_token {
            Some(token) => fetch.bearer_auth(token),
            None => fetch,
        }
    }

    /// List every bookable service, images populated and normalized.
    pub async fn list(&self) -> Result<Vec<Service>, Error> {
        let url = format!("{}/api/services?populate=*", self.base_url);

        let value = self
            .authorize(Fetch::get(&self.client, &url))
            .execute_value()
            .await?;

        let services = value
            .get("data")
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .map(|record| normalize_service(record, &self.base_url))
                    .collect()
            })
            .unwrap_or_default();

        Ok(services)
    }
}
