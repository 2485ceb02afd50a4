//! Version catalog with memoized symbolic reference resolution.
//!
//! Maps symbolic version references (the shared platform version, "latest
//! release" of a module) to concrete version strings. Lookups go through a
//! pluggable [`VersionSource`] and are memoized per evaluation so repeated
//! lookups of the same reference are guaranteed identical within one
//! resolution pass.

use std::cell::RefCell;
use std::collections::BTreeMap;

use bomline_common::error::{BomlineError, Result};
use bomline_common::types::{ModuleId, VersionSpec};

/// External source of published version information.
///
/// Embedders implement this to plug in a real repository lookup; the
/// library ships [`StaticVersionSource`] for in-memory use.
pub trait VersionSource {
    /// Returns the latest published release version of a module.
    ///
    /// # Errors
    ///
    /// Returns an error if the module is unknown to this source.
    fn latest_release(&self, id: &ModuleId) -> Result<String>;
}

/// In-memory version source backed by per-module release lists.
///
/// The latest release is the highest version by semver ordering, so
/// pre-release versions rank below the final release they precede.
#[derive(Debug, Clone, Default)]
pub struct StaticVersionSource {
    releases: BTreeMap<ModuleId, Vec<String>>,
}

impl StaticVersionSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the published versions of a module.
    #[must_use]
    pub fn with_releases(mut self, id: ModuleId, versions: &[&str]) -> Self {
        let _ = self
            .releases
            .insert(id, versions.iter().map(ToString::to_string).collect());
        self
    }
}

impl VersionSource for StaticVersionSource {
    fn latest_release(&self, id: &ModuleId) -> Result<String> {
        let versions = self
            .releases
            .get(id)
            .ok_or_else(|| BomlineError::UnresolvedVersion {
                reference: id.to_string(),
            })?;
        versions
            .iter()
            .filter_map(|v| semver::Version::parse(v).ok().map(|parsed| (parsed, v)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| BomlineError::UnresolvedVersion {
                reference: id.to_string(),
            })
    }
}

/// Reference to the platform BOM whose version unversioned requirements inherit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRef {
    /// The BOM module.
    pub bom: ModuleId,
    /// Version of the BOM; `Explicit` or `Latest`, never `Inherited`.
    pub version: VersionSpec,
}

/// Read-only catalog of symbolic version references for one evaluation.
///
/// Constructed once per descriptor evaluation and immutable for its
/// duration; memoization guarantees that repeated lookups of the platform
/// version or of a module's latest release return identical strings.
pub struct VersionCatalog<'a> {
    source: &'a dyn VersionSource,
    platform: Option<PlatformRef>,
    platform_cache: RefCell<Option<String>>,
    latest_cache: RefCell<BTreeMap<ModuleId, String>>,
}

impl<'a> VersionCatalog<'a> {
    /// Creates a catalog over a version source and an optional platform.
    #[must_use]
    pub fn new(source: &'a dyn VersionSource, platform: Option<PlatformRef>) -> Self {
        Self {
            source,
            platform,
            platform_cache: RefCell::new(None),
            latest_cache: RefCell::new(BTreeMap::new()),
        }
    }

    /// Resolves the shared platform version.
    ///
    /// # Errors
    ///
    /// Returns an error if no platform is declared, if the platform version
    /// is itself marked inherited, or if the symbolic latest lookup fails.
    pub fn platform_version(&self) -> Result<String> {
        if let Some(version) = self.platform_cache.borrow().as_ref() {
            return Ok(version.clone());
        }

        let platform = self
            .platform
            .as_ref()
            .ok_or_else(|| BomlineError::UnresolvedVersion {
                reference: "platform version".into(),
            })?;
        let version = match &platform.version {
            VersionSpec::Explicit(v) => v.clone(),
            VersionSpec::Latest => self.latest_release(&platform.bom)?,
            VersionSpec::Inherited => {
                return Err(BomlineError::Config {
                    message: "platform version cannot itself be inherited".into(),
                });
            }
        };

        tracing::debug!(version = %version, "platform version resolved");
        *self.platform_cache.borrow_mut() = Some(version.clone());
        Ok(version)
    }

    /// Resolves the latest release of a module, memoized per catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the version source cannot resolve the module.
    pub fn latest_release(&self, id: &ModuleId) -> Result<String> {
        if let Some(version) = self.latest_cache.borrow().get(id) {
            return Ok(version.clone());
        }

        let version = self.source.latest_release(id)?;
        tracing::debug!(module = %id, version = %version, "latest release resolved");
        let _ = self
            .latest_cache
            .borrow_mut()
            .insert(id.clone(), version.clone());
        Ok(version)
    }
}
