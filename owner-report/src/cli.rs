use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Alchemy API key.
    #[clap(long, env = "ALCHEMY_API_KEY", hide_env_values = true)]
    pub alchemy_api_key: Option<String>,

    /// Network to query (ETH_MAINNET, MATIC_MAINNET, ... or eth-mainnet, polygon-mainnet, ...).
    #[clap(long, env = "NETWORK")]
    pub network: Option<String>,

    /// Newline separated list of owner addresses.
    #[clap(long, env, default_value = "addresses.txt")]
    pub input: PathBuf,

    /// CSV report destination (overwritten).
    #[clap(long, env, default_value = "output.csv")]
    pub output: PathBuf,

    /// Maximum number of lookups in flight.
    #[clap(long, env, default_value = "2")]
    pub concurrency: usize,

    /// The log filter.
    #[clap(long, env, default_value = "info")]
    pub log: String,

    /// Include to hide the progress bar.
    #[clap(long, env)]
    pub no_progress: bool,
}
