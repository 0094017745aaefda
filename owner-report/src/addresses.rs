use anyhow::{Context, Result};
use eth::types::Address;
use std::{path::Path, str::FromStr};

/// Input lines split into well-formed addresses and everything else.
#[derive(Debug, Default, PartialEq)]
pub struct Partition {
    pub valid: Vec<Address>,
    pub invalid: Vec<String>,
}

/// Reads one candidate address per line.
pub fn load_addresses(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading addresses from {}", path.display()))?;
    Ok(split_lines(&content))
}

/// Splits on `\n` only, so a trailing newline yields a final empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

pub fn partition(lines: Vec<String>) -> Partition {
    lines
        .into_iter()
        .fold(Partition::default(), |mut partition, line| {
            match Address::from_str(&line) {
                Ok(address) => partition.valid.push(address),
                Err(_) => partition.invalid.push(line),
            }
            partition
        })
}
