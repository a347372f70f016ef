//! Per-rule-set reload state machine.
//!
//! # Responsibilities
//! - Own the current checker for one rule-set file
//! - Decide, on each check, whether the file must be re-read
//! - Publish a new checker and its modification time as one unit
//!
//! # Design Decisions
//! - `(checker, modified)` lives in an immutable `Snapshot` behind `ArcSwapOption`
//! - stat and load run outside any lock; only the swap is atomic
//! - A deleted file publishes `Checker::NoMatch` with no modification time
//! - Content read before a deletion never replaces the published `NoMatch`
//!   while the file is still gone
//! - Read failures keep serving the previous snapshot
//! - Only a strictly newer modification time triggers a reload, so two
//!   writes inside one timestamp tick can go unnoticed until the next write

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwapOption;

use crate::observability::metrics;
use crate::rules::{load_checker, Checker, MatchMode};

/// A checker together with the modification time it was built from.
#[derive(Debug)]
pub struct Snapshot {
    checker: Checker,
    /// `None` when the file was absent (or its mtime unreadable) at load time.
    modified: Option<SystemTime>,
}

impl Snapshot {
    pub fn checker(&self) -> &Checker {
        &self.checker
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// True if the published checker is the one for an absent file.
    fn is_cleared(&self) -> bool {
        matches!(self.checker, Checker::NoMatch)
    }

    /// True if this snapshot must not be replaced by `next`.
    ///
    /// Guards against a slow concurrent reload publishing older content over
    /// newer content. An incoming deletion (`next.modified == None`) is never
    /// refused here.
    fn supersedes(&self, next: &Snapshot) -> bool {
        match (self.modified, next.modified) {
            (Some(current), Some(incoming)) => current > incoming,
            _ => false,
        }
    }
}

/// Result of a [`RuleSetManager::reload_if_needed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// File unchanged since the last load.
    Unchanged,
    /// File (re)compiled and published.
    Reloaded,
    /// File absent; a no-match checker was published.
    Cleared,
    /// stat or read failed; previous snapshot kept.
    Failed,
}

/// Owns one rule set's current checker.
#[derive(Debug)]
pub struct RuleSetManager {
    name: String,
    path: PathBuf,
    mode: MatchMode,
    state: ArcSwapOption<Snapshot>,
}

impl RuleSetManager {
    /// Create a manager and load the file immediately.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, mode: MatchMode) -> Self {
        let manager = Self {
            name: name.into(),
            path: path.into(),
            mode,
            state: ArcSwapOption::empty(),
        };
        manager.reload_if_needed();
        manager
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The currently published snapshot, if any load has succeeded.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.load_full()
    }

    /// Number of rules in the current checker.
    pub fn rule_count(&self) -> usize {
        self.state
            .load()
            .as_ref()
            .map_or(0, |snapshot| snapshot.checker.len())
    }

    /// Stat the backing file and reload if it appeared, changed, or vanished.
    pub fn reload_if_needed(&self) -> ReloadOutcome {
        let current = self.state.load_full();
        let last_modified = current.as_ref().and_then(|s| s.modified);

        let modified = match fs::metadata(&self.path) {
            Ok(meta) => {
                let modified = meta.modified().ok();
                let newer = match (modified, last_modified) {
                    (Some(seen), Some(last)) => seen > last,
                    (_, None) => true,
                    (None, Some(_)) => false,
                };
                if !newer {
                    return ReloadOutcome::Unchanged;
                }
                modified
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if current.as_ref().is_some_and(|s| s.is_cleared()) {
                    return ReloadOutcome::Unchanged;
                }
                None
            }
            Err(e) => {
                tracing::warn!(
                    rule_set = %self.name,
                    path = %self.path.display(),
                    error = %e,
                    "Unable to stat rule set"
                );
                metrics::record_reload_failure();
                return ReloadOutcome::Failed;
            }
        };

        let checker = match load_checker(self.mode, &self.path) {
            Ok(checker) => checker,
            Err(e) => {
                tracing::warn!(
                    rule_set = %self.name,
                    error = %e,
                    "Failed to load rule set, keeping current rules"
                );
                metrics::record_reload_failure();
                return ReloadOutcome::Failed;
            }
        };

        let cleared = matches!(checker, Checker::NoMatch);
        let rules = checker.len();
        self.publish(Snapshot { checker, modified });
        metrics::record_reload(self.mode);

        if cleared {
            tracing::info!(
                rule_set = %self.name,
                path = %self.path.display(),
                "Rule set absent, matching nothing"
            );
            ReloadOutcome::Cleared
        } else {
            tracing::info!(
                rule_set = %self.name,
                path = %self.path.display(),
                mode = %self.mode,
                rules,
                "Rule set loaded"
            );
            ReloadOutcome::Reloaded
        }
    }

    /// Match `input` against the published checker. Never reloads.
    pub fn matches(&self, input: &str) -> bool {
        self.state
            .load()
            .as_ref()
            .is_some_and(|snapshot| snapshot.checker.matches(input))
    }

    fn publish(&self, next: Snapshot) {
        let next = Arc::new(next);
        self.state.rcu(|current| match current {
            Some(current) if self.keeps(current, &next) => Some(Arc::clone(current)),
            _ => Some(Arc::clone(&next)),
        });
    }

    /// True if `current` must stay published instead of `next`.
    fn keeps(&self, current: &Snapshot, next: &Snapshot) -> bool {
        if current.is_cleared() && !next.is_cleared() {
            // Content stat'ed before a deletion that has already been published.
            return matches!(
                fs::metadata(&self.path),
                Err(e) if e.kind() == io::ErrorKind::NotFound
            );
        }
        current.supersedes(next)
    }
}
