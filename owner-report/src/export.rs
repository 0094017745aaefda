use anyhow::{anyhow, Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Written in place of line breaks inside a cell.
const LINE_BREAK_REPLACEMENT: &str = ", ";

fn flatten_line_breaks(cell: &str) -> String {
    cell.replace("\r\n", LINE_BREAK_REPLACEMENT)
        .replace(['\n', '\r'], LINE_BREAK_REPLACEMENT)
}

/// Serializes records as CSV with every cell quoted and one record per `\n`
/// terminated line. Line breaks inside a cell become `, ` and embedded quotes
/// are doubled.
pub fn to_csv<I, R, C>(records: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(vec![]);
    for record in records {
        writer
            .write_record(
                record
                    .into_iter()
                    .map(|cell| flatten_line_breaks(cell.as_ref())),
            )
            .context("write csv record")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush csv: {}", err.error()))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}
