// Based off the alchemy NFT docs: https://docs.alchemy.com/reference/getnftsforowner-v3
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use eth::types::Address;
use reqwest::Client;
use url::Url;

use crate::{
    models::{OwnedNfts, OwnedNftsPage},
    Network, OwnedNftFetching,
};

/// Largest page the API hands out.
const PAGE_SIZE: u32 = 100;

pub struct AlchemyApi {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl AlchemyApi {
    pub fn new(api_key: String, network: Network) -> Result<Self> {
        let base_url = Url::parse(&format!(
            "https://{}.g.alchemy.com/nft/v3/",
            network.subdomain()
        ))
        .context("alchemy base url")?;
        Ok(Self::with_base_url(api_key, base_url))
    }

    /// `base_url` must end with a `/`; the API key is appended as the next path segment.
    pub fn with_base_url(api_key: String, base_url: Url) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    fn owner_url(&self, owner: Address, page_key: Option<&str>) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("{}/getNFTsForOwner", self.api_key))
            .context("join getNFTsForOwner route")?;
        url.query_pairs_mut()
            .append_pair("owner", &owner.to_string())
            .append_pair("withMetadata", "true")
            .append_pair("pageSize", &PAGE_SIZE.to_string());
        if let Some(key) = page_key {
            url.query_pairs_mut().append_pair("pageKey", key);
        }
        Ok(url)
    }

    async fn get_page(&self, owner: Address, page_key: Option<&str>) -> Result<OwnedNftsPage> {
        let url = self.owner_url(owner, page_key)?;
        tracing::debug!("alchemy getNFTsForOwner owner={owner} pageKey={page_key:?}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("getNFTsForOwner reqwest")?;

        if response.status().is_success() {
            let page = response
                .json::<OwnedNftsPage>()
                .await
                .context("getNFTsForOwner response body")?;
            tracing::debug!(
                "alchemy page for {owner}: {} of {} nfts",
                page.owned_nfts.len(),
                page.total_count
            );
            Ok(page)
        } else {
            Err(anyhow!(
                "Error: HTTP request failed with status code {}",
                response.status()
            ))
        }
    }
}

#[async_trait]
impl OwnedNftFetching for AlchemyApi {
    async fn get_nfts_for_owner(&self, owner: Address) -> Result<OwnedNfts> {
        let mut owned = OwnedNfts::default();
        let mut page_key: Option<String> = None;
        loop {
            let mut page = self.get_page(owner, page_key.as_deref()).await?;
            let next_key = page.page_key.take();
            owned.extend_page(page);
            match next_key {
                Some(key) if page_key.as_ref() == Some(&key) => {
                    return Err(anyhow!("pagination for {owner} repeated pageKey {key}"));
                }
                Some(key) => page_key = Some(key),
                None => return Ok(owned),
            }
        }
    }
}
