extern crate owner_report;

use anyhow::Result;
use clap::Parser;
use nft_retriever::alchemy::AlchemyApi;
use owner_report::{cli::Args, config::Config, processor::ReportProcessor};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse_from(std::env::args());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(args.log.as_str())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let Config { alchemy, report } = Config::try_from(args)?;
    tracing::info!(
        "querying {} with concurrency {}",
        alchemy.network,
        report.concurrency
    );
    let fetcher = AlchemyApi::new(alchemy.api_key, alchemy.network)?;
    let summary = ReportProcessor::new(Arc::new(fetcher), report)
        .run(std::io::stdout().lock())
        .await?;
    tracing::debug!(
        "csv written: {}, failed lookups: {}",
        summary.csv_written,
        summary.failures.len()
    );
    Ok(())
}
