use std::{fmt::Display, str::FromStr};

/// Networks served by the Alchemy NFT API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    EthMainnet,
    EthSepolia,
    EthHolesky,
    MaticMainnet,
    MaticAmoy,
    ArbMainnet,
    ArbSepolia,
    OptMainnet,
    OptSepolia,
    BaseMainnet,
    BaseSepolia,
}

impl Network {
    pub const ALL: [Network; 11] = [
        Network::EthMainnet,
        Network::EthSepolia,
        Network::EthHolesky,
        Network::MaticMainnet,
        Network::MaticAmoy,
        Network::ArbMainnet,
        Network::ArbSepolia,
        Network::OptMainnet,
        Network::OptSepolia,
        Network::BaseMainnet,
        Network::BaseSepolia,
    ];

    /// Host prefix in `https://{subdomain}.g.alchemy.com`.
    pub fn subdomain(&self) -> &'static str {
        match self {
            Network::EthMainnet => "eth-mainnet",
            Network::EthSepolia => "eth-sepolia",
            Network::EthHolesky => "eth-holesky",
            Network::MaticMainnet => "polygon-mainnet",
            Network::MaticAmoy => "polygon-amoy",
            Network::ArbMainnet => "arb-mainnet",
            Network::ArbSepolia => "arb-sepolia",
            Network::OptMainnet => "opt-mainnet",
            Network::OptSepolia => "opt-sepolia",
            Network::BaseMainnet => "base-mainnet",
            Network::BaseSepolia => "base-sepolia",
        }
    }

    /// Constant name as used in `.env` files (`ETH_MAINNET`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Network::EthMainnet => "ETH_MAINNET",
            Network::EthSepolia => "ETH_SEPOLIA",
            Network::EthHolesky => "ETH_HOLESKY",
            Network::MaticMainnet => "MATIC_MAINNET",
            Network::MaticAmoy => "MATIC_AMOY",
            Network::ArbMainnet => "ARB_MAINNET",
            Network::ArbSepolia => "ARB_SEPOLIA",
            Network::OptMainnet => "OPT_MAINNET",
            Network::OptSepolia => "OPT_SEPOLIA",
            Network::BaseMainnet => "BASE_MAINNET",
            Network::BaseSepolia => "BASE_SEPOLIA",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNetwork(pub String);

impl Display for UnknownNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let known: Vec<_> = Network::ALL.iter().map(Network::name).collect();
        write!(
            f,
            "unknown network {:?} (expected one of {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownNetwork {}

impl FromStr for Network {
    type Err = UnknownNetwork;

    /// Accepts either the constant name or the URL subdomain, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Network::ALL
            .into_iter()
            .find(|network| {
                network.name().eq_ignore_ascii_case(trimmed)
                    || network.subdomain().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}
