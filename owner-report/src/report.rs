use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use crate::{batch::LookupResult, export::to_csv};

pub const HEADER: [&str; 3] = ["Address", "Total", "NFTs"];

/// Joins the titles held in a single NFTs cell.
pub const TITLE_SEPARATOR: &str = "\n";

// Dingbats, private use, the 0x1F000-0x1F7FF pictograph planes,
// general punctuation through misc symbols, and supplemental symbols.
static PICTOGRAPHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{2700}-\x{27BF}\x{E000}-\x{F8FF}\x{1F000}-\x{1F7FF}\x{2011}-\x{26FF}\x{1F910}-\x{1F9FF}]",
    )
    .expect("valid pictograph pattern")
});

/// Strips emoji and pictograph characters from an NFT title.
pub fn sanitize_title(title: &str) -> String {
    PICTOGRAPHS.replace_all(title, "").into_owned()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub address: String,
    pub total_count: u64,
    /// Sanitized titles joined with [`TITLE_SEPARATOR`].
    pub titles: String,
}

impl From<&LookupResult> for ReportRow {
    fn from(result: &LookupResult) -> Self {
        let titles: Vec<String> = result
            .nfts
            .iter()
            .filter_map(|nft| nft.title.as_deref())
            .filter(|title| !title.is_empty())
            .map(sanitize_title)
            .filter(|title| !title.is_empty())
            .collect();
        Self {
            address: result.address.to_string(),
            total_count: result.total_count,
            titles: titles.join(TITLE_SEPARATOR),
        }
    }
}

impl ReportRow {
    pub fn cells(&self) -> [String; 3] {
        [
            self.address.clone(),
            self.total_count.to_string(),
            self.titles.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Header followed by one record per row.
    pub fn records(&self) -> Vec<[String; 3]> {
        std::iter::once(HEADER.map(String::from))
            .chain(self.rows.iter().map(ReportRow::cells))
            .collect()
    }

    pub fn to_csv(&self) -> Result<String> {
        to_csv(self.records())
    }
}

pub fn aggregate(results: &[LookupResult]) -> Report {
    Report {
        rows: results.iter().map(ReportRow::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eth::types::Address;
    use nft_retriever::{models::NftContractRef, OwnedNft};

    fn nft(title: Option<&str>) -> OwnedNft {
        OwnedNft {
            contract: NftContractRef {
                address: Address::from(99),
                name: None,
            },
            token_id: "1".into(),
            token_type: Some("ERC721".into()),
            title: title.map(String::from),
        }
    }

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_title("Cool Cat 😺 #12"), "Cool Cat  #12");
        assert_eq!(sanitize_title("✨Sparkle✨"), "Sparkle");
        assert_eq!(sanitize_title("🤖 bot"), " bot");
        assert_eq!(sanitize_title("★ star ☀"), " star ");
        assert_eq!(sanitize_title("\u{E001}private"), "private");
        assert_eq!(sanitize_title("Plain ASCII-1"), "Plain ASCII-1");
        assert_eq!(sanitize_title("Ñandú 日本"), "Ñandú 日本");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for title in ["Cool Cat 😺", "✨✨", "🂡 card 🟥", "plain", "", "a\u{2011}b"] {
            let once = sanitize_title(title);
            assert_eq!(sanitize_title(&once), once);
        }
    }

    #[test]
    fn row_from_result() {
        let result = LookupResult {
            address: Address::from(1),
            total_count: 5,
            nfts: vec![
                nft(Some("Cat")),
                nft(None),
                nft(Some("")),
                nft(Some("Dog 🐶")),
                nft(Some("🐶")),
            ],
        };
        assert_eq!(
            ReportRow::from(&result),
            ReportRow {
                address: "0x0000000000000000000000000000000000000001".into(),
                total_count: 5,
                titles: "Cat\nDog ".into(),
            }
        );
    }

    #[test]
    fn aggregate_keeps_one_row_per_result() {
        let results = vec![
            LookupResult {
                address: Address::from(1),
                total_count: 1,
                nfts: vec![nft(Some("Cat"))],
            },
            LookupResult {
                address: Address::from(2),
                total_count: 0,
                nfts: vec![],
            },
        ];
        let report = aggregate(&results);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].titles, "");

        let records = report.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], HEADER.map(String::from));
        assert_eq!(records[1][1], "1");
    }

    #[test]
    fn report_csv() {
        let report = aggregate(&[LookupResult {
            address: Address::from(1),
            total_count: 2,
            nfts: vec![nft(Some("Cat")), nft(Some("Dog"))],
        }]);
        assert_eq!(
            report.to_csv().unwrap(),
            "\"Address\",\"Total\",\"NFTs\"\n\
             \"0x0000000000000000000000000000000000000001\",\"2\",\"Cat, Dog\"\n"
        );
    }
}
