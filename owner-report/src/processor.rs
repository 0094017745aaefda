use crate::{
    addresses::{load_addresses, partition, Partition},
    batch::{run_batch_with_progress, FailedLookup},
    config::ReportConfig,
    report::{aggregate, Report},
    reporter::{progress_bar, write_csv, Reporter},
};
use anyhow::Result;
use nft_retriever::OwnedNftFetching;
use std::{io::Write, sync::Arc};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: Report,
    pub invalid: Vec<String>,
    pub failures: Vec<FailedLookup>,
    /// Whether the CSV file was written.
    pub csv_written: bool,
}

pub struct ReportProcessor {
    /// Lookup client for owned NFTs
    fetcher: Arc<dyn OwnedNftFetching>,
    /// Runtime configuration parameters
    config: ReportConfig,
}

impl ReportProcessor {
    pub fn new(fetcher: Arc<dyn OwnedNftFetching>, config: ReportConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn run<W: Write>(&self, out: W) -> Result<RunSummary> {
        let lines = load_addresses(&self.config.input)?;
        let Partition { valid, invalid } = partition(lines);
        tracing::info!(
            "loaded {} valid and {} invalid addresses from {}",
            valid.len(),
            invalid.len(),
            self.config.input.display()
        );

        let progress = progress_bar(valid.len() as u64, self.config.show_progress);
        let outcome = run_batch_with_progress(
            valid,
            self.config.concurrency,
            |address| {
                let fetcher = self.fetcher.clone();
                async move { fetcher.get_nfts_for_owner(address).await }
            },
            &progress,
        )
        .await;
        progress.finish_and_clear();

        let report = aggregate(&outcome.results);
        let csv_written = write_csv(&self.config.output, &report);

        // Console output is best effort; a closed stdout must not fail the run.
        let mut reporter = Reporter::new(out);
        if let Err(err) = reporter.print_report(&report) {
            tracing::error!("failed to print report: {err}");
        }
        if let Err(err) = reporter.print_invalid(&invalid) {
            tracing::error!("failed to print invalid addresses: {err}");
        }
        if let Err(err) = reporter.print_failures(&outcome.failures) {
            tracing::error!("failed to print failed lookups: {err}");
        }

        tracing::info!(
            "report complete: {} succeeded, {} failed, {} invalid",
            report.rows.len(),
            outcome.failures.len(),
            invalid.len()
        );
        Ok(RunSummary {
            report,
            invalid,
            failures: outcome.failures,
            csv_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use eth::types::Address;
    use nft_retriever::{models::NftContractRef, OwnedNft, OwnedNfts};
    use std::{collections::HashMap, path::Path, str::FromStr};

    /// Serves canned lookups; unknown owners fail.
    struct StubFetcher {
        owners: HashMap<Address, OwnedNfts>,
    }

    #[async_trait::async_trait]
    impl OwnedNftFetching for StubFetcher {
        async fn get_nfts_for_owner(&self, owner: Address) -> Result<OwnedNfts> {
            self.owners
                .get(&owner)
                .cloned()
                .ok_or_else(|| anyhow!("HTTP request failed with status code 500"))
        }
    }

    fn address_line(digit: char) -> String {
        format!("0x{}", digit.to_string().repeat(40))
    }

    fn owned(titles: &[&str]) -> OwnedNfts {
        OwnedNfts {
            total_count: titles.len() as u64,
            owned_nfts: titles
                .iter()
                .enumerate()
                .map(|(i, title)| OwnedNft {
                    contract: NftContractRef {
                        address: Address::from(7),
                        name: None,
                    },
                    token_id: i.to_string(),
                    token_type: Some("ERC721".into()),
                    title: Some(title.to_string()),
                })
                .collect(),
        }
    }

    fn config(dir: &Path) -> ReportConfig {
        ReportConfig {
            input: dir.join("addresses.txt"),
            output: dir.join("output.csv"),
            concurrency: 2,
            show_progress: false,
        }
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        std::fs::write(
            &config.input,
            [address_line('a'), "notanaddress".into(), address_line('b')].join("\n"),
        )
        .unwrap();
        let output = config.output.clone();

        let a = Address::from_str(&address_line('a')).unwrap();
        let b = Address::from_str(&address_line('b')).unwrap();
        let fetcher = StubFetcher {
            owners: HashMap::from([(a, owned(&["Cat"])), (b, owned(&[]))]),
        };
        let processor = ReportProcessor::new(Arc::new(fetcher), config);

        let mut console = vec![];
        let summary = processor.run(&mut console).await.unwrap();

        assert!(summary.csv_written);
        assert_eq!(summary.invalid, ["notanaddress"]);
        assert!(summary.failures.is_empty());

        let csv = std::fs::read_to_string(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "\"Address\",\"Total\",\"NFTs\"");
        assert!(lines.contains(&format!("\"{}\",\"1\",\"Cat\"", address_line('a')).as_str()));
        assert!(lines.contains(&format!("\"{}\",\"0\",\"\"", address_line('b')).as_str()));

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("│ Cat "));
        assert!(console.contains("Invalid addresses (1):\n  \"notanaddress\"\n"));
        assert!(console.contains("Failed lookups (0):\n"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn failed_lookups_are_reported_separately() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        std::fs::write(
            &config.input,
            format!("{}\n{}\n", address_line('c'), address_line('d')),
        )
        .unwrap();
        let c = Address::from_str(&address_line('c')).unwrap();
        let fetcher = StubFetcher {
            owners: HashMap::from([(c, owned(&["Ape 🦍", "Punk"]))]),
        };
        let processor = ReportProcessor::new(Arc::new(fetcher), config);

        let summary = processor.run(std::io::sink()).await.unwrap();

        assert_eq!(summary.report.rows.len(), 1);
        assert_eq!(summary.report.rows[0].titles, "Ape \nPunk");
        assert_eq!(
            summary.failures.iter().map(|f| f.address).collect::<Vec<_>>(),
            [Address::from_str(&address_line('d')).unwrap()]
        );
        // Trailing newline leaves one blank line behind.
        assert_eq!(summary.invalid, [""]);
        assert!(logs_contain("status code 500"));
    }

    /// Stdout whose reader went away (`owner-report | head -1`).
    struct ClosedConsole;

    impl Write for ClosedConsole {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn closed_console_still_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        std::fs::write(&config.input, format!("{}\nnope", address_line('e'))).unwrap();
        let output = config.output.clone();
        let e = Address::from_str(&address_line('e')).unwrap();
        let fetcher = StubFetcher {
            owners: HashMap::from([(e, owned(&["Cat"]))]),
        };
        let processor = ReportProcessor::new(Arc::new(fetcher), config);

        let summary = processor.run(ClosedConsole).await.unwrap();

        assert!(summary.csv_written);
        assert_eq!(summary.report.rows.len(), 1);
        assert_eq!(summary.invalid, ["nope"]);
        let csv = std::fs::read_to_string(output).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(logs_contain("failed to print report: closed"));
        assert!(logs_contain("failed to print invalid addresses: closed"));
    }

    #[tokio::test]
    async fn unreadable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let processor = ReportProcessor::new(
            Arc::new(StubFetcher {
                owners: HashMap::new(),
            }),
            config(dir.path()),
        );
        let err = processor.run(std::io::sink()).await.unwrap_err();
        assert!(err.to_string().contains("addresses.txt"));
        assert!(!dir.path().join("output.csv").exists());
    }
}
