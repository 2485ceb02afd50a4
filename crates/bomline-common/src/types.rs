//! Domain primitive types used across the bomline workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BomlineError;

/// Identifier of an externally supplied module artifact.
///
/// Displayed and parsed in `group:name` coordinate form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    /// Group the module belongs to.
    pub group: String,
    /// Artifact name within the group.
    pub name: String,
}

impl ModuleId {
    /// Creates a module identifier from its group and name.
    #[must_use]
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

impl FromStr for ModuleId {
    type Err = BomlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(crate::constants::COORDINATE_SEPARATOR) {
            Some((group, name)) if !group.is_empty() && !name.is_empty() => {
                Ok(Self::new(group, name))
            }
            _ => Err(BomlineError::Config {
                message: format!("invalid module coordinate: \"{s}\" (expected group:name)"),
            }),
        }
    }
}

/// How a requirement's version is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionSpec {
    /// A concrete version string declared on the requirement itself.
    Explicit(String),
    /// Inherit the shared platform (BOM) version.
    Inherited,
    /// Resolve the symbolic latest release through the version catalog.
    Latest,
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(v) => write!(f, "{v}"),
            Self::Inherited => write!(f, "<platform>"),
            Self::Latest => write!(f, "<latest>"),
        }
    }
}

/// Dependency configuration a requirement participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequirementKind {
    /// Needed to compile, absent at runtime.
    CompileOnly,
    /// Annotation-processing toolchain entry.
    AnnotationProcessor,
    /// Compile and runtime dependency.
    Implementation,
    /// Test-compile and test-runtime dependency.
    TestImplementation,
    /// Present only on the test runtime path.
    TestRuntimeOnly,
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompileOnly => write!(f, "compile-only"),
            Self::AnnotationProcessor => write!(f, "annotation-processor"),
            Self::Implementation => write!(f, "implementation"),
            Self::TestImplementation => write!(f, "test-implementation"),
            Self::TestRuntimeOnly => write!(f, "test-runtime-only"),
        }
    }
}

impl FromStr for RequirementKind {
    type Err = BomlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile-only" => Ok(Self::CompileOnly),
            "annotation-processor" => Ok(Self::AnnotationProcessor),
            "implementation" => Ok(Self::Implementation),
            "test-implementation" => Ok(Self::TestImplementation),
            "test-runtime-only" => Ok(Self::TestRuntimeOnly),
            other => Err(BomlineError::Config {
                message: format!("unknown requirement kind: \"{other}\""),
            }),
        }
    }
}

/// A single declared dependency of a build descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRequirement {
    /// Module the requirement refers to.
    pub id: ModuleId,
    /// How the version is determined.
    pub version: VersionSpec,
    /// Dependency configuration the requirement participates in.
    pub kind: RequirementKind,
    /// Variant axis tag, for mutually exclusive modules.
    pub axis: Option<String>,
}

impl ModuleRequirement {
    /// Creates a requirement with no variant axis tag.
    #[must_use]
    pub const fn new(id: ModuleId, version: VersionSpec, kind: RequirementKind) -> Self {
        Self {
            id,
            version,
            kind,
            axis: None,
        }
    }

    /// Tags the requirement with a variant axis.
    #[must_use]
    pub fn with_axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = Some(axis.into());
        self
    }
}

/// A module after resolution: one concrete version, all declared kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    /// Module the entry refers to.
    pub id: ModuleId,
    /// Final concrete version.
    pub version: String,
    /// Union of all requirement kinds declared for this module.
    pub kinds: BTreeSet<RequirementKind>,
    /// Union of all variant axis tags declared for this module.
    pub axes: BTreeSet<String>,
}
