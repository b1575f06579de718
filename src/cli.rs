use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use enumset::EnumSet;
use reqwest::Url;

use crate::account::UtilityCategory;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch every linked account's invoice data and render the savings
    /// comparison in one batch.
    #[clap(name = "compare")]
    Compare(CompareArgs),

    /// Fetch one account's raw record and print the resolved canonical
    /// fields (debugging aid).
    #[clap(name = "inspect")]
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ProviderArgs {
    /// Invoice-data provider base URL.
    #[clap(long = "provider-base-url", env = "PROVIDER_BASE_URL")]
    pub base_url: Url,

    #[clap(long = "provider-api-key", env = "PROVIDER_API_KEY")]
    pub api_key: String,

    /// Bound on a single account's fetch, in seconds.
    #[clap(long = "fetch-timeout-secs", default_value = "30", env = "FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: u64,
}

impl ProviderArgs {
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub provider: ProviderArgs,

    /// TOML file listing the client's linked utilities.
    #[clap(long = "accounts-file", env = "ACCOUNTS_PATH", default_value = "accounts.toml")]
    pub accounts_file: PathBuf,

    /// Optional catalog-defaults override file.
    #[clap(long = "catalog-file", env = "CATALOG_PATH")]
    pub catalog_file: Option<PathBuf>,

    /// Restrict the comparison to these categories.
    #[clap(long = "categories", value_delimiter = ',', num_args = 1..)]
    pub categories: Vec<UtilityCategory>,

    /// Also render the per-account component tables.
    #[clap(long)]
    pub detailed: bool,
}

impl CompareArgs {
    /// The category filter; an empty flag means "all".
    #[must_use]
    pub fn categories(&self) -> EnumSet<UtilityCategory> {
        if self.categories.is_empty() {
            EnumSet::all()
        } else {
            self.categories.iter().copied().collect()
        }
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub provider: ProviderArgs,

    #[clap(long, value_enum)]
    pub category: UtilityCategory,

    /// Delivery-point identifier (NMI, MRIN, or site code).
    #[clap(long)]
    pub identifier: String,
}
