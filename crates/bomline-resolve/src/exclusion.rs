//! Pattern-based version exclusion policy.
//!
//! Repository sources carry content filters that reject candidate versions
//! (typically pre-release identifiers such as `-rc` suffixes). A rule's
//! three patterns are matched conjunctively; a candidate is rejected if any
//! rule in the policy matches all three fields.

use bomline_common::error::{BomlineError, Result};
use regex::Regex;

/// A single exclusion rule: regex patterns for group, name, and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    /// Pattern matched against the candidate group.
    pub group: String,
    /// Pattern matched against the candidate name.
    pub name: String,
    /// Pattern matched against the candidate version.
    pub version: String,
}

impl ExclusionRule {
    /// Creates a rule from its three patterns.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A rule with its patterns compiled and anchored.
#[derive(Debug)]
struct CompiledRule {
    group: Regex,
    name: Regex,
    version: Regex,
}

/// Evaluates candidate versions against a set of exclusion rules.
///
/// Stateless once constructed; the empty policy accepts everything.
#[derive(Debug, Default)]
pub struct ExclusionPolicy {
    rules: Vec<CompiledRule>,
}

impl ExclusionPolicy {
    /// Compiles a policy from a set of rules.
    ///
    /// Patterns are anchored so a rule must match the entire field.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid regex.
    pub fn new(rules: &[ExclusionRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    group: compile_anchored(&rule.group)?,
                    name: compile_anchored(&rule.name)?,
                    version: compile_anchored(&rule.version)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Creates a policy with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reports whether a candidate is accepted by the policy.
    ///
    /// A candidate is rejected if any rule matches its group, name, and
    /// version simultaneously.
    #[must_use]
    pub fn accepts(&self, group: &str, name: &str, version: &str) -> bool {
        !self.rules.iter().any(|rule| {
            rule.group.is_match(group) && rule.name.is_match(name) && rule.version.is_match(version)
        })
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| BomlineError::Config {
        message: format!("invalid exclusion pattern \"{pattern}\": {e}"),
    })
}
