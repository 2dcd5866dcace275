use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartFamily, ChartKind, Dataset};

/// Datasets abandoned by a family switch, kept for a later restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    /// Nominal chart kind at capture time.
    pub kind: ChartKind,
    pub datasets: Vec<Dataset>,
    pub captured_at: DateTime<Utc>,
}

impl BackupSnapshot {
    #[must_use]
    pub fn capture(kind: ChartKind, datasets: Vec<Dataset>) -> Self {
        Self {
            kind,
            datasets,
            captured_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn family(&self) -> ChartFamily {
        self.kind.family()
    }
}

/// Family-keyed snapshot storage: one slot per family, most recent write wins.
///
/// Expiry and durability are storage concerns of the implementor.
pub trait BackupStore {
    fn get(&self, family: ChartFamily) -> Option<BackupSnapshot>;

    /// Stores `snapshot` under its own family, replacing any previous one.
    fn put(&mut self, snapshot: BackupSnapshot);

    fn clear(&mut self, family: ChartFamily);

    fn has(&self, family: ChartFamily) -> bool {
        self.get(family).is_some()
    }
}

/// Process-local backup store used by default and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryBackupStore {
    categorical: Option<BackupSnapshot>,
    coordinate: Option<BackupSnapshot>,
}

impl InMemoryBackupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, family: ChartFamily) -> &Option<BackupSnapshot> {
        match family {
            ChartFamily::Categorical => &self.categorical,
            ChartFamily::Coordinate => &self.coordinate,
        }
    }

    fn slot_mut(&mut self, family: ChartFamily) -> &mut Option<BackupSnapshot> {
        match family {
            ChartFamily::Categorical => &mut self.categorical,
            ChartFamily::Coordinate => &mut self.coordinate,
        }
    }
}

impl BackupStore for InMemoryBackupStore {
    fn get(&self, family: ChartFamily) -> Option<BackupSnapshot> {
        self.slot(family).clone()
    }

    fn put(&mut self, snapshot: BackupSnapshot) {
        let family = snapshot.family();
        trace!(
            family = %family,
            datasets = snapshot.datasets.len(),
            "store backup snapshot"
        );
        *self.slot_mut(family) = Some(snapshot);
    }

    fn clear(&mut self, family: ChartFamily) {
        *self.slot_mut(family) = None;
    }

    fn has(&self, family: ChartFamily) -> bool {
        self.slot(family).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{BackupSnapshot, BackupStore, InMemoryBackupStore};
    use crate::core::{ChartFamily, ChartKind};

    #[test]
    fn most_recent_snapshot_wins_per_family() {
        let mut store = InMemoryBackupStore::new();
        store.put(BackupSnapshot::capture(ChartKind::Bar, Vec::new()));
        store.put(BackupSnapshot::capture(ChartKind::Line, Vec::new()));

        let snapshot = store.get(ChartFamily::Categorical).expect("snapshot");
        assert_eq!(snapshot.kind, ChartKind::Line);
        assert!(!store.has(ChartFamily::Coordinate));

        store.clear(ChartFamily::Categorical);
        assert!(!store.has(ChartFamily::Categorical));
    }

    #[test]
    fn snapshots_land_in_their_own_family_slot() {
        let mut store = InMemoryBackupStore::new();
        store.put(BackupSnapshot::capture(ChartKind::Bubble, Vec::new()));

        assert!(store.has(ChartFamily::Coordinate));
        assert!(!store.has(ChartFamily::Categorical));
        let snapshot = store.get(ChartFamily::Coordinate).expect("coordinate snapshot");
        assert_eq!(snapshot.family(), ChartFamily::Coordinate);
    }
}
