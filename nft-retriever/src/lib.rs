use anyhow::Result;
use eth::types::Address;

pub mod alchemy;
pub mod models;
mod network;

pub use models::{OwnedNft, OwnedNfts};
pub use network::{Network, UnknownNetwork};

/// Resolves an owner address to the NFTs it holds.
#[async_trait::async_trait]
pub trait OwnedNftFetching: Send + Sync {
    async fn get_nfts_for_owner(&self, owner: Address) -> Result<OwnedNfts>;
}
