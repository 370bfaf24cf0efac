//! The single "last generated batch" slot.
//!
//! Generation overwrites the slot and cancellation reads it. When several
//! writers can reach the same slot the read-then-write must be serialised
//! by the caller; `FileBatchStore` only guarantees that each write is atomic.

use std::path::PathBuf;

use crate::error::NudgerResult;
use crate::event::GeneratedEventRecord;
use crate::store::write_json_atomic;

pub trait BatchStore {
    /// The stored batch, empty when nothing has been generated.
    fn get(&self) -> NudgerResult<Vec<GeneratedEventRecord>>;

    /// Replace whatever was stored before.
    fn set(&mut self, batch: &[GeneratedEventRecord]) -> NudgerResult<()>;

    fn clear(&mut self) -> NudgerResult<()>;
}

/// In-process slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryBatchStore {
    batch: Vec<GeneratedEventRecord>,
}

impl BatchStore for MemoryBatchStore {
    fn get(&self) -> NudgerResult<Vec<GeneratedEventRecord>> {
        Ok(self.batch.clone())
    }

    fn set(&mut self, batch: &[GeneratedEventRecord]) -> NudgerResult<()> {
        self.batch = batch.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> NudgerResult<()> {
        self.batch.clear();
        Ok(())
    }
}

/// Slot backed by a JSON file that survives between runs.
#[derive(Debug, Clone)]
pub struct FileBatchStore {
    path: PathBuf,
}

impl FileBatchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBatchStore { path: path.into() }
    }
}

impl BatchStore for FileBatchStore {
    fn get(&self) -> NudgerResult<Vec<GeneratedEventRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn set(&mut self, batch: &[GeneratedEventRecord]) -> NudgerResult<()> {
        write_json_atomic(&self.path, batch)
    }

    fn clear(&mut self) -> NudgerResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
