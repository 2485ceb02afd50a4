//! Abstract Syntax Tree for `.bom` build descriptor files.

/// Root node of a parsed `.bom` file.
#[derive(Debug, Clone, Default)]
pub struct DescriptorFile {
    /// The `DESCRIPTOR` header block.
    pub header: Option<HeaderDecl>,
    /// Repository source declarations.
    pub repositories: Vec<RepositoryDecl>,
    /// The `PLATFORM` declaration.
    pub platform: Option<PlatformDecl>,
    /// Module requirement declarations, in source order.
    pub requirements: Vec<RequireDecl>,
    /// Profile priority declarations.
    pub profiles: Vec<ProfileDecl>,
}

/// A `DESCRIPTOR` header block.
#[derive(Debug, Clone, Default)]
pub struct HeaderDecl {
    /// Descriptor module name.
    pub name: String,
    /// Group the descriptor module belongs to.
    pub group: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

/// A `REPOSITORY` declaration with its version-exclusion filters.
#[derive(Debug, Clone)]
pub struct RepositoryDecl {
    /// Repository source URL.
    pub url: String,
    /// Exclusion filters attached to this source.
    pub excludes: Vec<ExcludeDecl>,
}

/// An `exclude` filter: three regex patterns matched conjunctively.
#[derive(Debug, Clone)]
pub struct ExcludeDecl {
    /// Pattern matched against the candidate group.
    pub group: String,
    /// Pattern matched against the candidate name.
    pub name: String,
    /// Pattern matched against the candidate version.
    pub version: String,
}

/// A `PLATFORM` declaration naming the BOM and its version.
#[derive(Debug, Clone)]
pub struct PlatformDecl {
    /// BOM module coordinate in `group:name` form.
    pub coordinate: String,
    /// Version string; the literal `latest` is symbolic.
    pub version: String,
}

/// A `REQUIRE` declaration.
#[derive(Debug, Clone, Default)]
pub struct RequireDecl {
    /// Module coordinate in `group:name` form.
    pub coordinate: String,
    /// Requirement kind; defaults to `implementation` when absent.
    pub kind: Option<String>,
    /// Version string; absent means inherit the platform version,
    /// the literal `latest` is symbolic.
    pub version: Option<String>,
    /// Variant axis tag.
    pub axis: Option<String>,
}

/// A `PROFILE` declaration: ordered candidate priority for one axis.
#[derive(Debug, Clone)]
pub struct ProfileDecl {
    /// Variant axis name.
    pub axis: String,
    /// Candidate module coordinates, highest priority first.
    pub candidates: Vec<String>,
}
