//! Fan-out/fan-in comparison batches.
//!
//! One fetch task per account, a join barrier, and a single batched result:
//! callers never observe a mix of `Ready` and `Loading` records once a run
//! resolves. A generation counter protects against a superseded run leaking
//! its results into a newer one.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use futures_util::future::join_all;
use tokio::time::timeout;

use crate::{
    account::UtilityAccount,
    api::InvoiceProvider,
    catalog::Catalog,
    extract::Extractors,
    prelude::*,
    raw::RawInvoiceRecord,
    record::ComparisonRecord,
};

#[derive(bon::Builder)]
pub struct Orchestrator<P> {
    provider: P,

    #[builder(default)]
    extractors: Extractors,

    #[builder(default)]
    catalog: Catalog,

    /// Defensive bound on a single fetch: an unbounded one would stall the
    /// whole batch join.
    #[builder(default = Duration::from_secs(30))]
    fetch_timeout: Duration,

    #[builder(skip)]
    generation: AtomicU64,
}

impl<P: InvoiceProvider> Orchestrator<P> {
    /// The full account set in `Loading` state, for immediate rendering of
    /// placeholders while [`Self::run`] is in flight.
    #[must_use]
    pub fn placeholders(accounts: &[UtilityAccount]) -> Vec<ComparisonRecord> {
        accounts.iter().cloned().map(ComparisonRecord::loading).collect()
    }

    /// Fetches, extracts, and computes savings for every account, returning
    /// one finished record per account in input order.
    ///
    /// Per-account failures are isolated into `Error` records and never
    /// abort the batch. Returns `None` when a newer invocation superseded
    /// this one while it was in flight; stale results must be discarded, not
    /// merged.
    #[instrument(skip_all, fields(n_accounts = accounts.len()))]
    pub async fn run(&self, accounts: &[UtilityAccount]) -> Option<Vec<ComparisonRecord>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Each task owns exactly one account's slot of the output.
        let mut batch: Vec<Option<ComparisonRecord>> = accounts.iter().map(|_| None).collect();
        let outcomes = join_all(
            accounts
                .iter()
                .enumerate()
                .map(|(index, account)| async move { (index, self.process(account).await) }),
        )
        .await;
        for (index, record) in outcomes {
            batch[index] = Some(record);
        }

        if self.generation.load(Ordering::SeqCst) != generation {
            info!(generation, "discarding a stale run");
            return None;
        }
        Some(batch.into_iter().flatten().collect())
    }

    async fn process(&self, account: &UtilityAccount) -> ComparisonRecord {
        let Some(extractor) = self.extractors.get(account.category) else {
            return ComparisonRecord::error(
                account.clone(),
                format!("no rate extractor for the {} category", account.category),
            );
        };
        let raw = match timeout(self.fetch_timeout, self.provider.fetch(account)).await {
            Err(_elapsed) => {
                return ComparisonRecord::error(
                    account.clone(),
                    format!("fetch timed out after {:?}", self.fetch_timeout),
                );
            }
            Ok(Err(error)) => {
                warn!(account = %account, "fetch failed");
                return ComparisonRecord::error(account.clone(), format!("{error:#}"));
            }
            Ok(Ok(raw)) => raw,
        };
        // "Not found" is not an error: extraction over an empty record
        // leaves every current field absent and seeds the catalog defaults.
        let source = raw
            .clone()
            .unwrap_or_else(|| RawInvoiceRecord::from(serde_json::Value::Null));
        let extraction = extractor.extract(&source, &self.catalog);
        ComparisonRecord::ready(account.clone(), raw, extraction)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering as AtomicOrdering},
        },
    };

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::{account::UtilityCategory, record::RecordStatus};

    /// In-memory provider: a record per identifier, an error for identifiers
    /// starting with `fail`, and an optional artificial delay.
    struct FakeProvider {
        records: HashMap<String, Value>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(records: HashMap<String, Value>) -> Self {
            Self { records, delay: Duration::ZERO, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl InvoiceProvider for FakeProvider {
        async fn fetch(&self, account: &UtilityAccount) -> Result<Option<RawInvoiceRecord>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if account.identifier.starts_with("fail") {
                bail!("provider exploded for {account}");
            }
            Ok(self.records.get(&account.identifier).cloned().map(RawInvoiceRecord::from))
        }
    }

    fn accounts() -> Vec<UtilityAccount> {
        vec![
            UtilityAccount::new(UtilityCategory::GasCi, "good-1"),
            UtilityAccount::new(UtilityCategory::GasCi, "fail-2"),
            UtilityAccount::new(UtilityCategory::Waste, "good-3"),
        ]
    }

    fn records() -> HashMap<String, Value> {
        HashMap::from([
            ("good-1".to_string(), json!({"gas_rate": 25.0, "gas_usage": 100.0})),
            ("good-3".to_string(), json!({"waste_rate": 85.0, "waste_frequency": 4})),
        ])
    }

    #[tokio::test]
    async fn test_failing_sibling_is_isolated() {
        let orchestrator =
            Orchestrator::builder().provider(FakeProvider::new(records())).build();
        let batch = orchestrator.run(&accounts()).await.expect("not superseded");
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].status, RecordStatus::Ready);
        assert!(matches!(batch[1].status, RecordStatus::Error(_)));
        assert_eq!(batch[2].status, RecordStatus::Ready);
        // The siblings' extracted fields are unaffected by the failure.
        assert_eq!(batch[0].extracted.unit_rate, Some(25.0));
        assert_eq!(batch[2].extracted.unit_rate, Some(85.0));
    }

    #[tokio::test]
    async fn test_not_found_is_ready_with_empty_extraction() {
        let orchestrator =
            Orchestrator::builder().provider(FakeProvider::new(HashMap::new())).build();
        let account = UtilityAccount::new(UtilityCategory::GasSme, "unknown");
        let batch = orchestrator.run(std::slice::from_ref(&account)).await.unwrap();
        assert_eq!(batch[0].status, RecordStatus::Ready);
        assert!(batch[0].raw.is_none());
        assert_eq!(batch[0].extracted.unit_rate, None);
        // Catalog placeholders still seed the proposal.
        assert_eq!(batch[0].comparison.unit_rate, Some(17.8));
    }

    #[tokio::test]
    async fn test_unsupported_category_errors_without_fetch() {
        let provider = FakeProvider::new(records());
        let orchestrator = Orchestrator::builder()
            .provider(provider)
            .extractors(Extractors::empty())
            .build();
        let batch =
            orchestrator.run(&[UtilityAccount::new(UtilityCategory::Oil, "site-1")]).await.unwrap();
        assert!(matches!(&batch[0].status, RecordStatus::Error(message) if message.contains("oil")));
        assert_eq!(orchestrator.provider.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_an_error() {
        let provider = FakeProvider {
            records: HashMap::new(),
            delay: Duration::from_secs(10),
            calls: AtomicUsize::new(0),
        };
        let orchestrator = Orchestrator::builder()
            .provider(provider)
            .fetch_timeout(Duration::from_millis(50))
            .build();
        let batch =
            orchestrator.run(&[UtilityAccount::new(UtilityCategory::GasCi, "slow")]).await.unwrap();
        assert!(
            matches!(&batch[0].status, RecordStatus::Error(message) if message.contains("timed out"))
        );
    }

    #[tokio::test]
    async fn test_stale_run_is_discarded() {
        let provider = FakeProvider {
            records: records(),
            delay: Duration::from_millis(200),
            calls: AtomicUsize::new(0),
        };
        let orchestrator = Arc::new(Orchestrator::builder().provider(provider).build());

        let stale = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.run(&accounts()).await })
        };
        // Let the first run reach its fetches, then supersede it.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let fresh = orchestrator
            .run(&[UtilityAccount::new(UtilityCategory::Waste, "good-3")])
            .await;

        assert!(stale.await.unwrap().is_none(), "stale results must be discarded");
        let fresh = fresh.expect("the newest run wins");
        assert_eq!(fresh.len(), 1);
    }

    #[tokio::test]
    async fn test_placeholders_are_loading() {
        let placeholders = Orchestrator::<FakeProvider>::placeholders(&accounts());
        assert_eq!(placeholders.len(), 3);
        assert!(placeholders.iter().all(|record| record.status == RecordStatus::Loading));
    }
}
