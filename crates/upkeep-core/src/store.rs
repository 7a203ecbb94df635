//! Persistence seam for catalog snapshots.
//!
//! The catalog never talks to storage directly. A [`Workspace`] loads one
//! snapshot when it opens and hands the whole document to its store after
//! every successful mutation.
//!
//! [`Workspace`]: crate::workspace::Workspace

use crate::{error::Result, snapshot::Snapshot};

/// Key under which the snapshot document is stored.
pub const SNAPSHOT_KEY: &str = "maintenance-data";

/// Whole-document snapshot storage.
pub trait SnapshotStore {
    /// Reads the stored snapshot, `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replaces the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Volatile store, used for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing document.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Number of saves since creation.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}
