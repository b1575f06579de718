//! HTTP client for the invoice-data provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use super::provider::InvoiceProvider;
use crate::{account::UtilityAccount, prelude::*, raw::RawInvoiceRecord};

pub struct Api {
    client: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Deserialize)]
struct InvoiceResponse {
    record: serde_json::Value,
}

impl Api {
    pub fn try_new(base_url: Url, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, base_url, api_key })
    }
}

#[async_trait]
impl InvoiceProvider for Api {
    #[instrument(skip_all, fields(account = %account))]
    async fn fetch(&self, account: &UtilityAccount) -> Result<Option<RawInvoiceRecord>> {
        let url = self
            .base_url
            .join(&format!("invoices/{}/{}", account.category, account.identifier))
            .context("failed to build the invoice URL")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("failed to call the provider for {account}"))?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no invoice data for the account");
            return Ok(None);
        }
        let envelope: InvoiceResponse = response
            .error_for_status()
            .with_context(|| format!("provider request failed for {account}"))?
            .json()
            .await
            .context("failed to deserialize the provider response")?;
        Ok(Some(RawInvoiceRecord::from(envelope.record)))
    }
}
