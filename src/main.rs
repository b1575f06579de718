mod account;
mod api;
mod catalog;
mod cli;
mod convert;
mod extract;
mod orchestrator;
mod prelude;
mod rates;
mod raw;
mod record;
mod report;
mod resolve;
mod savings;
mod tables;
mod weighted;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    account::{AccountsFile, UtilityAccount, expand_accounts},
    api::HttpProvider,
    catalog::Catalog,
    cli::{Args, Command},
    orchestrator::Orchestrator,
    prelude::*,
    record::RecordStatus,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Args::parse().command {
        Command::Compare(args) => {
            let accounts_file = AccountsFile::read_from(&args.accounts_file)?;
            let categories = args.categories();
            let accounts: Vec<UtilityAccount> = expand_accounts(&accounts_file.utilities)
                .into_iter()
                .filter(|account| categories.contains(account.category))
                .collect();
            ensure!(!accounts.is_empty(), "no accounts to compare");
            info!(n_accounts = accounts.len(), "expanded the linked utilities");

            let catalog = match &args.catalog_file {
                Some(path) => Catalog::read_from(path)?,
                None => Catalog::default(),
            };
            let provider = HttpProvider::try_new(
                args.provider.base_url.clone(),
                args.provider.api_key.clone(),
            )?;
            let orchestrator = Orchestrator::builder()
                .provider(provider)
                .catalog(catalog)
                .fetch_timeout(args.provider.fetch_timeout())
                .build();

            let batch =
                orchestrator.run(&accounts).await.context("the comparison run was superseded")?;
            println!("{}", tables::build_batch_table(&batch));
            if args.detailed {
                for record in &batch {
                    if record.status == RecordStatus::Ready {
                        println!("\n{}", record.account);
                        println!("{}", tables::build_record_table(record));
                    }
                }
            }
            Ok(())
        }

        Command::Inspect(args) => {
            let provider = HttpProvider::try_new(
                args.provider.base_url.clone(),
                args.provider.api_key.clone(),
            )?;
            let account = UtilityAccount::new(args.category, args.identifier.clone());
            let orchestrator = Orchestrator::builder()
                .provider(provider)
                .fetch_timeout(args.provider.fetch_timeout())
                .build();
            let batch = orchestrator
                .run(std::slice::from_ref(&account))
                .await
                .context("the inspection run was superseded")?;
            let record = batch.first().context("the batch is empty")?;
            match &record.status {
                RecordStatus::Error(message) => bail!("inspection failed: {message}"),
                _ => {
                    println!("{}", tables::describe_extracted(record));
                    Ok(())
                }
            }
        }
    }
}
