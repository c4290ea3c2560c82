//! CSV encoding for the ride table

use crate::error::{Error, Result};
use crate::normalize::{NormalizedRow, COLUMNS};
use csv::{Terminator, WriterBuilder};

/// Encode records as `\n`-terminated lines, quoting cells only where needed
pub fn encode_lines<I, R>(records: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::storage(format!("CSV output is not UTF-8: {e}")))
}

/// Header line for the fixed schema
pub fn header_line() -> Result<String> {
    encode_lines([COLUMNS])
}

/// Data lines, cells in schema order
pub fn row_lines(rows: &[NormalizedRow]) -> Result<String> {
    encode_lines(rows.iter().map(NormalizedRow::record))
}
