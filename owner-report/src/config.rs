use anyhow::{anyhow, Context, Result};
use nft_retriever::Network;
use std::path::PathBuf;

use crate::cli::Args;

pub struct AlchemyConfig {
    pub api_key: String,
    pub network: Network,
}

pub struct ReportConfig {
    /// File holding one candidate address per line.
    pub input: PathBuf,
    /// Where the CSV report is written.
    pub output: PathBuf,
    /// Upper bound on lookups in flight.
    pub concurrency: usize,
    pub show_progress: bool,
}

pub struct Config {
    pub alchemy: AlchemyConfig,
    pub report: ReportConfig,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        let (api_key, network) = match (present(args.alchemy_api_key), present(args.network)) {
            (Some(api_key), Some(network)) => (api_key, network),
            (api_key, network) => {
                let missing: Vec<_> = [
                    api_key.is_none().then_some("ALCHEMY_API_KEY"),
                    network.is_none().then_some("NETWORK"),
                ]
                .into_iter()
                .flatten()
                .collect();
                return Err(anyhow!(
                    "Please add ALCHEMY_API_KEY and NETWORK to .env (missing {})",
                    missing.join(", ")
                ));
            }
        };
        if args.concurrency == 0 {
            return Err(anyhow!("concurrency must be at least 1"));
        }
        Ok(Self {
            alchemy: AlchemyConfig {
                api_key,
                network: network.parse().context("NETWORK")?,
            },
            report: ReportConfig {
                input: args.input,
                output: args.output,
                concurrency: args.concurrency,
                show_progress: !args.no_progress,
            },
        })
    }
}
