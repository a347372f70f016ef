//! Name → manager cache.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use crate::ruleset::manager::RuleSetManager;
use crate::ruleset::name::{NameError, RuleSetName};

/// Lazily creates one [`RuleSetManager`] per sanitized name under a base directory.
///
/// Managers are never evicted. Concurrent first lookups of the same name may
/// each build (and load) a manager; only the first one inserted is kept and
/// returned to every caller.
#[derive(Debug)]
pub struct RuleSetCache {
    base_dir: PathBuf,
    managers: DashMap<String, Arc<RuleSetManager>>,
}

impl RuleSetCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            managers: DashMap::new(),
        }
    }

    /// Resolve a raw name to its manager, creating it on first use.
    ///
    /// The only error is a rejected name; no manager is created for it.
    pub fn manager_for(&self, raw: &str) -> Result<Arc<RuleSetManager>, NameError> {
        let name = RuleSetName::parse(raw)?;

        if let Some(existing) = self.managers.get(name.as_str()) {
            return Ok(Arc::clone(existing.value()));
        }

        // Built outside the map's shard lock; the initial load can be slow.
        let path = self.base_dir.join(name.as_str());
        let manager = Arc::new(RuleSetManager::new(name.as_str(), path, name.mode()));

        let entry = self.managers.entry(name.into_string()).or_insert(manager);
        Ok(Arc::clone(entry.value()))
    }

    /// Number of managers created so far.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
