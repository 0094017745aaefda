use eth::types::Address;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NftContractRef {
    /// The address of the contract.
    pub address: Address,
    /// The name of the contract.
    #[serde(default)]
    pub name: Option<String>,
}

/// A single NFT held by an owner, reduced to what reporting needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnedNft {
    /// The NFT's underlying contract.
    pub contract: NftContractRef,
    /// Token id as a decimal string.
    pub token_id: String,
    /// ERC721, ERC1155, ...
    #[serde(default)]
    pub token_type: Option<String>,
    /// The NFT title. Older API versions call this `title`.
    #[serde(default, rename = "name", alias = "title")]
    pub title: Option<String>,
}

/// One page of a `getNFTsForOwner` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnedNftsPage {
    pub owned_nfts: Vec<OwnedNft>,
    /// Number of NFTs owned across all pages.
    pub total_count: u64,
    /// Present when more pages remain.
    #[serde(default)]
    pub page_key: Option<String>,
}

/// Everything owned by one address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedNfts {
    pub total_count: u64,
    pub owned_nfts: Vec<OwnedNft>,
}

impl OwnedNfts {
    pub fn extend_page(&mut self, page: OwnedNftsPage) {
        self.total_count = page.total_count;
        self.owned_nfts.extend(page.owned_nfts);
    }
}
