//! Startup orchestration.
//!
//! # Responsibilities
//! - Work out where the running binary lives when the configuration needs it
//! - Build the resolver for the configured front-end
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The executable path is only consulted when a default depends on it

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, ServiceConfig};
use crate::protocol::Resolver;
use crate::rules::MatchMode;
use crate::ruleset::{NameError, RuleSetCache, RuleSetManager, RuleSetName};

/// Errors that stop the process before the first request is read.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot determine executable path: {0}")]
    ExecutablePath(#[source] io::Error),

    #[error("executable path {} has no file name", .0.display())]
    ExecutableName(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid rule set: {0}")]
    RuleSetName(#[from] NameError),
}

/// Directory and file stem of the running binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableIdentity {
    dir: PathBuf,
    stem: String,
}

impl ExecutableIdentity {
    /// Identity of the current process.
    pub fn current() -> Result<Self, StartupError> {
        let path = env::current_exe().map_err(StartupError::ExecutablePath)?;
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, StartupError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| StartupError::ExecutableName(path.to_path_buf()))?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self {
            dir,
            stem: stem.to_owned(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// `<dir>/<stem>.conf`, the rule file served in executable-derived mode.
    pub fn rule_file(&self) -> PathBuf {
        self.dir.join(format!("{}.conf", self.stem))
    }

    /// Mode for the executable-derived rule file, chosen by binary name.
    pub fn rule_mode(&self) -> MatchMode {
        match self.stem.as_str() {
            "useragents" => MatchMode::RegexCaseInsensitive,
            "ips" => MatchMode::Network,
            _ => MatchMode::Literal,
        }
    }
}

/// Build the resolver described by `config`.
///
/// `identity` is resolved lazily so a fully specified configuration never
/// touches the executable path.
pub fn build_resolver<F>(config: &ServiceConfig, identity: F) -> Result<Resolver, StartupError>
where
    F: FnOnce() -> Result<ExecutableIdentity, StartupError>,
{
    if config.rules.from_executable {
        let id = identity()?;
        let manager = RuleSetManager::new(id.stem(), id.rule_file(), id.rule_mode());
        tracing::info!(
            rule_set = %manager.name(),
            path = %manager.path().display(),
            mode = %manager.mode(),
            "Serving executable-derived rule set"
        );
        return Ok(Resolver::Fixed(Arc::new(manager)));
    }

    let base_dir = match &config.rules.base_dir {
        Some(dir) => dir.clone(),
        None => identity()?.dir().to_path_buf(),
    };

    if let Some(raw) = &config.rules.rule_set {
        let name = RuleSetName::parse(raw)?;
        let path = base_dir.join(name.as_str());
        let manager = RuleSetManager::new(name.as_str(), path, name.mode());
        tracing::info!(
            rule_set = %manager.name(),
            path = %manager.path().display(),
            mode = %manager.mode(),
            "Serving fixed rule set"
        );
        return Ok(Resolver::Fixed(Arc::new(manager)));
    }

    tracing::info!(
        base_dir = %base_dir.display(),
        delimiter = %config.protocol.delimiter,
        "Serving per-line rule sets"
    );
    Ok(Resolver::PerLine {
        cache: Arc::new(RuleSetCache::new(base_dir)),
        delimiter: config.protocol.delimiter,
    })
}
