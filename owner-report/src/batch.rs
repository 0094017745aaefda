use anyhow::Result;
use eth::types::Address;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use nft_retriever::{OwnedNft, OwnedNfts};
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub address: Address,
    pub total_count: u64,
    pub nfts: Vec<OwnedNft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedLookup {
    pub address: Address,
    pub error: String,
}

/// Settled lookups of one batch. Neither list follows input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<LookupResult>,
    pub failures: Vec<FailedLookup>,
}

pub async fn run_batch<F, Fut>(
    addresses: Vec<Address>,
    concurrency: usize,
    fetch: F,
) -> BatchOutcome
where
    F: Fn(Address) -> Fut,
    Fut: Future<Output = Result<OwnedNfts>>,
{
    run_batch_with_progress(addresses, concurrency, fetch, &ProgressBar::hidden()).await
}

/// Calls `fetch` once per address with at most `concurrency` calls in flight
/// and resolves once every call has settled. A failed call is logged and
/// recorded but never stops the batch. `progress` advances once per settled call.
pub async fn run_batch_with_progress<F, Fut>(
    addresses: Vec<Address>,
    concurrency: usize,
    fetch: F,
    progress: &ProgressBar,
) -> BatchOutcome
where
    F: Fn(Address) -> Fut,
    Fut: Future<Output = Result<OwnedNfts>>,
{
    let fetch = &fetch;
    let settled: Vec<Result<LookupResult, FailedLookup>> = stream::iter(addresses)
        .map(|address| async move {
            match fetch(address).await {
                Ok(OwnedNfts {
                    total_count,
                    owned_nfts,
                }) => {
                    tracing::debug!("{address} has {total_count} NFTs");
                    Ok(LookupResult {
                        address,
                        total_count,
                        nfts: owned_nfts,
                    })
                }
                Err(err) => {
                    progress.suspend(|| {
                        tracing::warn!("lookup for {address} failed ({err:?}). Skipping")
                    });
                    Err(FailedLookup {
                        address,
                        error: format!("{err:#}"),
                    })
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .inspect(|_| progress.inc(1))
        .collect()
        .await;

    settled
        .into_iter()
        .fold(BatchOutcome::default(), |mut outcome, lookup| {
            match lookup {
                Ok(result) => outcome.results.push(result),
                Err(failure) => outcome.failures.push(failure),
            }
            outcome
        })
}
