//! Key-value settings with explicit save.

use alloc::{
    collections::BTreeMap,
    string::{
        String,
        ToString,
    },
};

use crate::error::SettingsError;

/// Key the display name is stored under.
pub const NAME_KEY: &str = "name";

/// Key-value store whose writes become durable only on [`save`](Self::save).
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn save(&mut self) -> Result<(), SettingsError>;
}

/// RAM-backed store. Writes stage until `save` commits them.
///
/// `get` sees staged values, matching how the badge settings behave
/// between `set` and `save`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    committed: BTreeMap<String, String>,
    pending: BTreeMap<String, String>,
    capacity: Option<usize>,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses to commit more than `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Pre-committed name, e.g. from `HEXBADGE_NAME`.
    #[must_use]
    pub fn seeded(name: Option<&str>) -> Self {
        let mut settings = Self::new();
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            settings
                .committed
                .insert(NAME_KEY.to_string(), name.to_string());
        }
        settings
    }

    /// Value as of the last successful save.
    #[must_use]
    pub fn committed(&self, key: &str) -> Option<&str> {
        self.committed.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.pending
            .get(key)
            .or_else(|| self.committed.get(key))
            .cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.pending.insert(key.to_string(), value.to_string());
    }

    fn save(&mut self) -> Result<(), SettingsError> {
        if let Some(capacity) = self.capacity {
            let new_keys = self
                .pending
                .keys()
                .filter(|k| !self.committed.contains_key(*k))
                .count();
            if self.committed.len() + new_keys > capacity {
                return Err(SettingsError::Full);
            }
        }
        self.committed.append(&mut self.pending);
        Ok(())
    }
}
