//! CSV record sink.

use crate::error::Result;
use crate::types::EventRecord;
use std::path::Path;
use tracing::{info, warn};

/// Accumulates records in arrival order and writes them out once at the end
/// of a run. Column order is fixed by the field order of [`EventRecord`].
#[derive(Debug, Default)]
pub struct RecordSink {
    records: Vec<EventRecord>,
}

impl RecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes all accumulated records to `path` with a header row.
    ///
    /// With zero records no file is produced at all; an empty, headerless
    /// CSV would only confuse downstream consumers.
    pub fn finalize<P: AsRef<Path>>(self, path: P) -> Result<Option<usize>> {
        if self.records.is_empty() {
            warn!("No events to save");
            return Ok(None);
        }

        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!(
            "Saved {} events to {}",
            self.records.len(),
            path.as_ref().display()
        );
        Ok(Some(self.records.len()))
    }
}
