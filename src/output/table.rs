//! Appendable CSV table
//!
//! The table lives in one object. Appending reads the whole object, adds the
//! new lines and writes everything back as a single replacement. Two writers
//! appending at the same time can lose one of the updates; callers must make
//! sure only one collection cycle touches a table at a time.

use super::cloud::CloudDestination;
use super::csv_lines::{header_line, row_lines};
use crate::error::{Error, Result};
use crate::normalize::NormalizedRow;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

/// A persistence target that accepts normalized rows
#[async_trait]
pub trait TableSink: Send + Sync {
    /// Append rows after the existing ones; an empty slice is a no-op
    async fn append(&self, rows: &[NormalizedRow]) -> Result<()>;
}

/// Build the new table content from the current one
///
/// A missing or empty table gets the header first. Existing content is kept
/// byte for byte, with a newline added if the last line lacks one.
pub fn render_append(existing: Option<&str>, rows: &[NormalizedRow]) -> Result<String> {
    let mut content = match existing {
        Some(text) if !text.is_empty() => {
            let mut text = text.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text
        }
        _ => header_line()?,
    };

    content.push_str(&row_lines(rows)?);
    Ok(content)
}

/// CSV table stored as one object in a [`CloudDestination`]
#[derive(Debug, Clone)]
pub struct CsvTableSink {
    destination: CloudDestination,
    object: String,
}

impl CsvTableSink {
    pub fn new(destination: CloudDestination, object: impl Into<String>) -> Self {
        Self {
            destination,
            object: object.into(),
        }
    }

    /// Where the table lives
    pub fn location(&self) -> String {
        self.destination.location(&self.object)
    }

    /// Current table content, `None` if the table was never created
    pub async fn read(&self) -> Result<Option<String>> {
        let Some(bytes) = self.destination.read(&self.object).await? else {
            return Ok(None);
        };
        String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|e| Error::storage(format!("{} is not UTF-8: {e}", self.location())))
    }
}

#[async_trait]
impl TableSink for CsvTableSink {
    async fn append(&self, rows: &[NormalizedRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        // a failed read leaves the table untouched
        let existing = self.read().await?;
        if existing.is_none() {
            debug!("Creating table {}", self.location());
        }

        let content = render_append(existing.as_deref(), rows)?;
        let location = self
            .destination
            .write(&self.object, Bytes::from(content))
            .await?;

        info!("Appended {} rows to {location}", rows.len());
        Ok(())
    }
}
