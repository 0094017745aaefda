use console::measure_text_width;
use indicatif::{ProgressBar, ProgressStyle};
use std::{io::Write, path::Path, time::Duration};

use crate::{
    batch::FailedLookup,
    report::{Report, HEADER, TITLE_SEPARATOR},
};

pub fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} addresses")
            .expect("Invalid progress template"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Renders the report as a boxed table with an index column. Every title in
/// the NFTs cell gets its own line. Columns are sized by terminal display width,
/// so wide CJK and emoji glyphs take two cells.
pub fn render_table(report: &Report) -> String {
    let header: Vec<String> = std::iter::once("(index)")
        .chain(HEADER)
        .map(String::from)
        .collect();
    let rows: Vec<Vec<Vec<String>>> = report
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                vec![index.to_string()],
                vec![row.address.clone()],
                vec![row.total_count.to_string()],
                row.titles.split(TITLE_SEPARATOR).map(String::from).collect(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| measure_text_width(h)).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            for line in cell {
                *width = (*width).max(measure_text_width(line));
            }
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width - measure_text_width(cell);
                format!(" {cell}{} ", " ".repeat(pad))
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(header.iter().map(String::as_str).collect()));
    out.push_str(&rule("├", "┼", "┤"));
    for row in &rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(1);
        for i in 0..height {
            out.push_str(&line(
                row.iter()
                    .map(|cell| cell.get(i).map(String::as_str).unwrap_or(""))
                    .collect(),
            ));
        }
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

/// Console side of a run. Output goes to `out` (stdout in the binary).
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_report(&mut self, report: &Report) -> std::io::Result<()> {
        write!(self.out, "{}", render_table(report))
    }

    pub fn print_invalid(&mut self, invalid: &[String]) -> std::io::Result<()> {
        writeln!(self.out, "Invalid addresses ({}):", invalid.len())?;
        for line in invalid {
            writeln!(self.out, "  {line:?}")?;
        }
        Ok(())
    }

    pub fn print_failures(&mut self, failures: &[FailedLookup]) -> std::io::Result<()> {
        writeln!(self.out, "Failed lookups ({}):", failures.len())?;
        for FailedLookup { address, error } in failures {
            writeln!(self.out, "  {address}: {error}")?;
        }
        Ok(())
    }
}

/// Writes the report's CSV to `path`, replacing any existing file. Failures are
/// logged and reported as `false`.
pub fn write_csv(path: &Path, report: &Report) -> bool {
    let csv = match report.to_csv() {
        Ok(csv) => csv,
        Err(err) => {
            tracing::error!("failed to serialize report: {err:?}");
            return false;
        }
    };
    match std::fs::write(path, csv) {
        Ok(()) => {
            tracing::info!("wrote {} rows to {}", report.rows.len(), path.display());
            true
        }
        Err(err) => {
            tracing::error!("failed to write {}: {err}", path.display());
            false
        }
    }
}
