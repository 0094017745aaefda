use regex::Regex;
use rustc_hex::{FromHex, ToHex};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
    sync::LazyLock,
};

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address pattern"));

/// Returns true when `value` is `0x` followed by exactly 40 hex digits (any case).
pub fn is_valid_address(value: &str) -> bool {
    ADDRESS_PATTERN.is_match(value)
}

/// An address. Can be an EOA or a smart contract address.
///
/// The only way to build one from text is [`Address::from_str`], so holding an
/// `Address` means the input passed [`is_valid_address`].
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAddressError(pub String);

impl Display for ParseAddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid address {:?}", self.0)
    }
}

impl std::error::Error for ParseAddressError {}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.0.to_hex::<String>())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Address")
            .field(&format_args!("{}", self))
            .finish()
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_address(s) {
            return Err(ParseAddressError(s.to_string()));
        }
        let bytes: Vec<u8> = s[2..]
            .from_hex()
            .map_err(|_| ParseAddressError(s.to_string()))?;
        let mut inner = [0; 20];
        inner.copy_from_slice(&bytes);
        Ok(Self(inner))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Address::from_str(&value).map_err(de::Error::custom)
    }
}

/// This is a lazy constructor only for testing.
impl From<u64> for Address {
    fn from(value: u64) -> Self {
        let mut new_array: [u8; 20] = [0; 20];
        new_array[12..].copy_from_slice(&value.to_be_bytes());
        Self(new_array)
    }
}

impl From<[u8; 20]> for Address {
    fn from(value: [u8; 20]) -> Self {
        Self(value)
    }
}
