//! Build descriptor model and evaluation orchestration.
//!
//! A [`BuildDescriptor`] is the typed form of a parsed `.bom` file. Its
//! evaluation constructs the version catalog and exclusion policy once,
//! runs the resolution engine over the declared requirements, and reduces
//! the variant axes through the profile selector.

use std::collections::BTreeMap;
use std::path::Path;

use bomline_common::constants;
use bomline_common::error::{BomlineError, Result};
use bomline_common::types::{ModuleId, ModuleRequirement, RequirementKind, VersionSpec};
use bomline_descriptor::parser::{self, ast};

use crate::catalog::{PlatformRef, VersionCatalog, VersionSource};
use crate::engine::{self, ResolvedGraph};
use crate::exclusion::{ExclusionPolicy, ExclusionRule};
use crate::profile;

/// A repository source URL with its version-exclusion rules.
#[derive(Debug, Clone)]
pub struct RepositorySource {
    /// Repository URL.
    pub url: String,
    /// Exclusion rules attached to this source.
    pub rules: Vec<ExclusionRule>,
}

/// Top-level build descriptor: a named module aggregating requirements.
#[derive(Debug, Clone)]
pub struct BuildDescriptor {
    /// Descriptor module name.
    pub name: String,
    /// Group the descriptor module belongs to.
    pub group: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Repository sources with their exclusion filters.
    pub repositories: Vec<RepositorySource>,
    /// Platform BOM reference, if declared.
    pub platform: Option<PlatformRef>,
    /// Declared module requirements, in source order.
    pub requirements: Vec<ModuleRequirement>,
    /// Per-axis candidate priorities for variant selection.
    pub profiles: BTreeMap<String, Vec<ModuleId>>,
}

/// Result of evaluating a build descriptor.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The resolved dependency graph.
    pub graph: ResolvedGraph,
    /// Chosen module per variant axis.
    pub selections: BTreeMap<String, ModuleId>,
}

impl BuildDescriptor {
    /// Parses a build descriptor from `.bom` source text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text fails to parse or validate.
    pub fn parse(input: &str) -> Result<Self> {
        let file = parser::parse_descriptor(input)?;
        Self::from_file(&file)
    }

    /// Loads a build descriptor from a `.bom` file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading build descriptor");
        let content = std::fs::read_to_string(path).map_err(|e| BomlineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Converts a parsed descriptor file into the typed model.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate or requirement kind is malformed.
    pub fn from_file(file: &ast::DescriptorFile) -> Result<Self> {
        let header = file.header.as_ref().ok_or_else(|| BomlineError::Config {
            message: "descriptor has no DESCRIPTOR header block".into(),
        })?;

        let repositories = file
            .repositories
            .iter()
            .map(|repo| RepositorySource {
                url: repo.url.clone(),
                rules: repo
                    .excludes
                    .iter()
                    .map(|e| ExclusionRule::new(&e.group, &e.name, &e.version))
                    .collect(),
            })
            .collect();

        let platform = file
            .platform
            .as_ref()
            .map(|p| {
                Ok::<PlatformRef, BomlineError>(PlatformRef {
                    bom: p.coordinate.parse()?,
                    version: convert_version(Some(&p.version)),
                })
            })
            .transpose()?;

        let requirements = file
            .requirements
            .iter()
            .map(|req| {
                let id: ModuleId = req.coordinate.parse()?;
                let kind = req
                    .kind
                    .as_deref()
                    .map_or(Ok(RequirementKind::Implementation), str::parse)?;
                let mut requirement =
                    ModuleRequirement::new(id, convert_version(req.version.as_ref()), kind);
                requirement.axis = req.axis.clone();
                Ok(requirement)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut profiles = BTreeMap::new();
        for decl in &file.profiles {
            let candidates = decl
                .candidates
                .iter()
                .map(|c| c.parse())
                .collect::<Result<Vec<ModuleId>>>()?;
            let _ = profiles.insert(decl.axis.clone(), candidates);
        }

        Ok(Self {
            name: header.name.clone(),
            group: header.group.clone(),
            description: header.description.clone(),
            repositories,
            platform,
            requirements,
            profiles,
        })
    }

    /// Evaluates the descriptor against a version source.
    ///
    /// Constructs the catalog and exclusion policy once (both immutable for
    /// the pass), resolves all requirements, and selects profile variants.
    ///
    /// # Errors
    ///
    /// Returns an error on the first resolution or selection failure; no
    /// partial result is produced.
    pub fn evaluate(&self, source: &dyn VersionSource) -> Result<Evaluation> {
        tracing::info!(descriptor = %self.name, "evaluating build descriptor");

        let catalog = VersionCatalog::new(source, self.platform.clone());
        let rules: Vec<ExclusionRule> = self
            .repositories
            .iter()
            .flat_map(|repo| repo.rules.iter().cloned())
            .collect();
        let policy = ExclusionPolicy::new(&rules)?;

        let graph = engine::resolve(&self.requirements, &catalog, &policy)?;
        let selections = profile::select(&graph, &self.profiles)?;

        tracing::info!(
            modules = graph.len(),
            selections = selections.len(),
            "descriptor evaluated"
        );
        Ok(Evaluation { graph, selections })
    }
}

/// Maps a raw version string to its spec; absence means inherit.
fn convert_version(version: Option<&String>) -> VersionSpec {
    match version.map(String::as_str) {
        None => VersionSpec::Inherited,
        Some(constants::LATEST_KEYWORD) => VersionSpec::Latest,
        Some(v) => VersionSpec::Explicit(v.to_string()),
    }
}
