//! Render history - append-only log of successful renders.

use std::sync::RwLock;

use crate::application::EngineError;
use crate::domain::RenderRecord;

/// Process-local, unbounded render log owned by one engine.
///
/// Snapshots are value copies; mutating a returned `Vec` never touches the
/// stored records.
#[derive(Debug, Default)]
pub struct RenderHistory {
    records: RwLock<Vec<RenderRecord>>,
}

impl RenderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&self, record: RenderRecord) -> Result<(), EngineError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| EngineError::HistoryUnavailable)?;
        records.push(record);
        Ok(())
    }

    /// Copy of every record, oldest first.
    pub fn snapshot(&self) -> Result<Vec<RenderRecord>, EngineError> {
        let records = self
            .records
            .read()
            .map_err(|_| EngineError::HistoryUnavailable)?;
        Ok(records.clone())
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Result<Option<RenderRecord>, EngineError> {
        let records = self
            .records
            .read()
            .map_err(|_| EngineError::HistoryUnavailable)?;
        Ok(records.last().cloned())
    }

    pub fn clear(&self) -> Result<(), EngineError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| EngineError::HistoryUnavailable)?;
        records.clear();
        Ok(())
    }

    pub fn len(&self) -> Result<usize, EngineError> {
        let records = self
            .records
            .read()
            .map_err(|_| EngineError::HistoryUnavailable)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, EngineError> {
        Ok(self.len()? == 0)
    }
}
