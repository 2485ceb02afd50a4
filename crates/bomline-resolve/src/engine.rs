//! Reconciliation of module requirements into a resolved dependency graph.
//!
//! Requirements are grouped by module identifier, each group is reduced to
//! one concrete version (explicit beats symbolic latest beats inherited
//! platform version), the version is checked against the exclusion policy,
//! and all requirement kinds of the group are unioned. The first error
//! aborts the whole pass; no partial graph is returned.

use std::collections::BTreeMap;

use bomline_common::error::{BomlineError, Result};
use bomline_common::types::{ModuleId, ModuleRequirement, ResolvedModule, VersionSpec};

use crate::catalog::VersionCatalog;
use crate::exclusion::ExclusionPolicy;

/// Deduplicated mapping from module identifier to resolved module.
///
/// Exactly one entry per distinct identifier; iteration order is sorted by
/// identifier and therefore deterministic for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedGraph {
    modules: BTreeMap<ModuleId, ResolvedModule>,
}

impl ResolvedGraph {
    /// Looks up a resolved module by identifier.
    #[must_use]
    pub fn get(&self, id: &ModuleId) -> Option<&ResolvedModule> {
        self.modules.get(id)
    }

    /// Reports whether the graph contains a module.
    #[must_use]
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    /// Number of resolved modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Reports whether the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterates over resolved modules in identifier order.
    pub fn modules(&self) -> impl Iterator<Item = &ResolvedModule> {
        self.modules.values()
    }
}

impl FromIterator<ResolvedModule> for ResolvedGraph {
    /// Builds a graph from resolved modules; a later module with a
    /// duplicate identifier replaces the earlier entry.
    fn from_iter<T: IntoIterator<Item = ResolvedModule>>(iter: T) -> Self {
        let mut modules = BTreeMap::new();
        for module in iter {
            let _ = modules.insert(module.id.clone(), module);
        }
        Self { modules }
    }
}

/// Resolves a list of module requirements into a consistent graph.
///
/// # Errors
///
/// Returns an error if two requirements for the same module declare
/// different explicit versions, if a symbolic reference cannot be looked
/// up, or if a resolved version matches an exclusion rule.
pub fn resolve(
    requirements: &[ModuleRequirement],
    catalog: &VersionCatalog<'_>,
    policy: &ExclusionPolicy,
) -> Result<ResolvedGraph> {
    tracing::info!(requirements = requirements.len(), "resolving module requirements");

    let mut groups: BTreeMap<&ModuleId, Vec<&ModuleRequirement>> = BTreeMap::new();
    for req in requirements {
        groups.entry(&req.id).or_default().push(req);
    }

    let mut modules = BTreeMap::new();
    for (id, group) in groups {
        let version = determine_version(id, &group, catalog)?;
        if !policy.accepts(&id.group, &id.name, &version) {
            return Err(BomlineError::ExcludedVersion {
                module: id.to_string(),
                version,
            });
        }

        tracing::debug!(module = %id, version = %version, "module resolved");
        let resolved = ResolvedModule {
            id: id.clone(),
            version,
            kinds: group.iter().map(|r| r.kind).collect(),
            axes: group.iter().filter_map(|r| r.axis.clone()).collect(),
        };
        let _ = modules.insert(id.clone(), resolved);
    }

    Ok(ResolvedGraph { modules })
}

/// Reduces one requirement group to a concrete version.
fn determine_version(
    id: &ModuleId,
    group: &[&ModuleRequirement],
    catalog: &VersionCatalog<'_>,
) -> Result<String> {
    let mut explicit: Option<&str> = None;
    let mut wants_latest = false;

    for req in group {
        match &req.version {
            VersionSpec::Explicit(v) => match explicit {
                Some(first) if first != v.as_str() => {
                    return Err(BomlineError::ConflictingVersions {
                        module: id.to_string(),
                        first: first.to_string(),
                        second: v.clone(),
                    });
                }
                Some(_) => {}
                None => explicit = Some(v.as_str()),
            },
            VersionSpec::Latest => wants_latest = true,
            VersionSpec::Inherited => {}
        }
    }

    if let Some(version) = explicit {
        Ok(version.to_string())
    } else if wants_latest {
        catalog.latest_release(id)
    } else {
        catalog.platform_version()
    }
}
