//! Typed access to the two persisted keys

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::record::{CompletedTaskLog, LifetimeStats};
use super::store::DurableStore;

/// Key holding the JSON-encoded [`LifetimeStats`]
pub const STATS_KEY: &str = "taskStats";

/// Key holding the JSON-encoded [`CompletedTaskLog`]
pub const LOG_KEY: &str = "completedTasks";

/// What a read found in the store
#[derive(Debug)]
enum Recovered<T> {
    Stored(T),
    Absent,
    Malformed(String),
    /// The store itself failed, the stored value may still be intact
    Unreadable(String),
}

impl<T: Default> Recovered<T> {
    fn or_default(self, key: &str) -> T {
        match self {
            Recovered::Stored(value) => value,
            Recovered::Absent => T::default(),
            Recovered::Malformed(reason) => {
                tracing::warn!(key, %reason, "Discarding malformed persisted state");
                T::default()
            }
            Recovered::Unreadable(reason) => {
                tracing::warn!(key, %reason, "Could not read persisted state, leaving it untouched");
                T::default()
            }
        }
    }
}

/// Loads and saves stats through a [`DurableStore`]
///
/// A key whose read failed at the store level is never written afterwards,
/// so a transient read error cannot replace stored stats with defaults.
pub struct StatsRepository {
    store: Box<dyn DurableStore>,
    unreadable: HashSet<String>,
}

impl StatsRepository {
    pub fn new(store: Box<dyn DurableStore>) -> Self {
        Self { store, unreadable: HashSet::new() }
    }

    /// Stored stats, or zero defaults if absent or unreadable
    pub fn load_stats(&mut self) -> LifetimeStats {
        self.read::<LifetimeStats>(STATS_KEY).or_default(STATS_KEY).normalized()
    }

    /// Stored log, or an empty log if absent or unreadable
    pub fn load_log(&mut self) -> CompletedTaskLog {
        self.read(LOG_KEY).or_default(LOG_KEY)
    }

    pub fn save_stats(&mut self, stats: &LifetimeStats) -> Result<()> {
        self.write(STATS_KEY, stats)
    }

    pub fn save_log(&mut self, log: &CompletedTaskLog) -> Result<()> {
        self.write(LOG_KEY, log)
    }

    fn read<T: DeserializeOwned>(&mut self, key: &str) -> Recovered<T> {
        match self.store.read(key) {
            Ok(None) => Recovered::Absent,
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(value) => Recovered::Stored(value),
                Err(e) => Recovered::Malformed(e.to_string()),
            },
            Err(e) => {
                self.unreadable.insert(key.to_string());
                Recovered::Unreadable(format!("{e:#}"))
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        if self.unreadable.contains(key) {
            bail!("{key} could not be read at start-up, refusing to overwrite it");
        }
        let contents =
            serde_json::to_string(value).with_context(|| format!("Failed to serialize {key}"))?;
        self.store.write(key, &contents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stats::store::MemoryStore;

    #[test]
    fn absent_keys_load_defaults() {
        let mut repo = StatsRepository::new(Box::new(MemoryStore::default()));
        assert_eq!(repo.load_stats(), LifetimeStats::default());
        assert!(repo.load_log().is_empty());
    }

    #[test]
    fn malformed_values_load_defaults() {
        let mut store = MemoryStore::default();
        store.write(STATS_KEY, "not json").unwrap();
        store.write(LOG_KEY, "{\"oops\":true}").unwrap();

        let mut repo = StatsRepository::new(Box::new(store));
        assert_eq!(repo.load_stats(), LifetimeStats::default());
        assert!(repo.load_log().is_empty());
    }

    #[test]
    fn saved_state_survives_a_new_repository() {
        let store = MemoryStore::default();
        let mut repo = StatsRepository::new(Box::new(store.clone()));

        let mut stats = LifetimeStats::default();
        stats.record_quiz(4, 5);
        let mut log = CompletedTaskLog::default();
        log.push();
        repo.save_stats(&stats).unwrap();
        repo.save_log(&log).unwrap();

        let mut reopened = StatsRepository::new(Box::new(store));
        assert_eq!(reopened.load_stats(), stats);
        assert_eq!(reopened.load_log().len(), 1);
    }

    /// Fails every read of the stats key, delegating everything else
    struct FlakyStatsRead(MemoryStore);

    impl DurableStore for FlakyStatsRead {
        fn read(&self, key: &str) -> Result<Option<String>> {
            if key == STATS_KEY {
                bail!("permission denied");
            }
            self.0.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.write(key, value)
        }
    }

    #[test]
    fn failed_read_protects_stored_value() {
        let mut inner = MemoryStore::default();
        inner.write(STATS_KEY, r#"{"quizzesCompleted":4}"#).unwrap();

        let mut repo = StatsRepository::new(Box::new(FlakyStatsRead(inner.clone())));
        assert_eq!(repo.load_stats(), LifetimeStats::default());
        assert!(repo.load_log().is_empty());

        assert!(repo.save_stats(&LifetimeStats::default()).is_err());
        assert_eq!(inner.read(STATS_KEY).unwrap().as_deref(), Some(r#"{"quizzesCompleted":4}"#));
        repo.save_log(&CompletedTaskLog::default()).unwrap();
    }
}
