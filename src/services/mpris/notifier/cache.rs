use std::collections::HashMap;

use tracing::warn;

use super::{PropertySource, PropertyValue, Signal};
use crate::services::mpris::{CachePolicy, Interface};

/// Last announced value of every cached property.
///
/// Owned by the notifier worker; nothing else reads or writes it.
#[derive(Debug, Default)]
pub struct PropertyCache {
    values: HashMap<(Interface, &'static str), PropertyValue>,
}

/// Properties whose live value differs from the cache.
#[derive(Debug)]
pub struct ChangeSet {
    interface: Interface,
    entries: Vec<(&'static str, PropertyValue, CachePolicy)>,
}

impl ChangeSet {
    /// Whether nothing changed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the changed properties, in refresh order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _, _)| *name)
    }

    /// The single changed-properties signal announcing this set.
    pub fn to_signal(&self) -> Signal {
        let mut changed = Vec::new();
        let mut invalidated = Vec::new();

        for (name, value, policy) in &self.entries {
            match policy {
                CachePolicy::Invalidate => invalidated.push(*name),
                _ => changed.push((*name, value.clone())),
            }
        }

        Signal::PropertiesChanged {
            interface: self.interface,
            changed,
            invalidated,
        }
    }
}

impl PropertyCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Last announced value of a property
    pub fn get(&self, interface: Interface, property: &'static str) -> Option<&PropertyValue> {
        self.values.get(&(interface, property))
    }

    /// Reads each property live and collects those that differ from the cache.
    ///
    /// Uncached properties are skipped. A getter that fails leaves its
    /// property out of the set so the cache keeps its last good value.
    pub fn diff(
        &self,
        interface: Interface,
        properties: &[&'static str],
        source: &dyn PropertySource,
    ) -> ChangeSet {
        let mut entries: Vec<(&'static str, PropertyValue, CachePolicy)> = Vec::new();

        for &name in properties {
            let policy = interface.cache_policy(name);
            if policy == CachePolicy::Uncached || entries.iter().any(|(n, _, _)| *n == name) {
                continue;
            }

            let value = match source.property(interface, name) {
                Ok(value) => value,
                Err(e) => {
                    warn!(%interface, property = name, error = %e, "Failed to read property");
                    continue;
                }
            };

            if self.values.get(&(interface, name)) != Some(&value) {
                entries.push((name, value, policy));
            }
        }

        ChangeSet { interface, entries }
    }

    /// Records the values of an emitted change set.
    pub fn commit(&mut self, changes: ChangeSet) {
        for (name, value, _) in changes.entries {
            self.values.insert((changes.interface, name), value);
        }
    }
}
