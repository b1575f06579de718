use async_trait::async_trait;

use crate::{account::UtilityAccount, prelude::*, raw::RawInvoiceRecord};

/// The invoice-data provider: one fetch per `(category, identifier)`.
///
/// `Ok(None)` is the valid "no invoice data for this account" outcome and is
/// distinct from an error.
#[async_trait]
pub trait InvoiceProvider: Send + Sync {
    async fn fetch(&self, account: &UtilityAccount) -> Result<Option<RawInvoiceRecord>>;
}
