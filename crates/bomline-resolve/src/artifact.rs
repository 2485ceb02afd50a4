//! Flat serializable resolution artifact for downstream build tooling.
//!
//! Downstream consumers receive the resolved graph as a flat list of
//! `(group, name, version, kinds)` records plus one `(axis, module)` record
//! per variant selection. Record order follows the graph's deterministic
//! iteration order, so identical input produces byte-identical output.

use serde::{Deserialize, Serialize};

use bomline_common::error::Result;

use crate::descriptor::Evaluation;

/// One resolved module as a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module group.
    pub group: String,
    /// Module name.
    pub name: String,
    /// Final resolved version.
    pub version: String,
    /// Requirement kinds the module satisfies, in kind order.
    pub kinds: Vec<String>,
}

/// One variant selection as a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Variant axis.
    pub axis: String,
    /// Chosen module group.
    pub group: String,
    /// Chosen module name.
    pub name: String,
}

/// The complete serializable output of one descriptor evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionArtifact {
    /// Resolved modules in identifier order.
    pub modules: Vec<ModuleRecord>,
    /// Variant selections in axis order.
    pub selections: Vec<SelectionRecord>,
}

impl ResolutionArtifact {
    /// Flattens an evaluation into the artifact form.
    #[must_use]
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let modules = evaluation
            .graph
            .modules()
            .map(|m| ModuleRecord {
                group: m.id.group.clone(),
                name: m.id.name.clone(),
                version: m.version.clone(),
                kinds: m.kinds.iter().map(ToString::to_string).collect(),
            })
            .collect();
        let selections = evaluation
            .selections
            .iter()
            .map(|(axis, id)| SelectionRecord {
                axis: axis.clone(),
                group: id.group.clone(),
                name: id.name.clone(),
            })
            .collect();
        Self {
            modules,
            selections,
        }
    }

    /// Renders the artifact as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::StaticVersionSource;
    use crate::descriptor::BuildDescriptor;

    use super::*;

    const DESCRIPTOR: &str = r#"
DESCRIPTOR recipe-bundle { }
PLATFORM "org.openrewrite:rewrite-bom" "8.23.1"
REQUIRE "org.openrewrite:rewrite-java"
REQUIRE "org.openrewrite:rewrite-java" {
    kind = "test-implementation"
}
REQUIRE "org.openrewrite:rewrite-java-21" {
    kind = "test-runtime-only"
    axis = "test-runtime"
}
"#;

    fn evaluate() -> Evaluation {
        let descriptor = BuildDescriptor::parse(DESCRIPTOR).expect("should parse");
        descriptor
            .evaluate(&StaticVersionSource::new())
            .expect("should evaluate")
    }

    #[test]
    fn artifact_flattens_graph_and_selections() {
        let artifact = ResolutionArtifact::from_evaluation(&evaluate());

        assert_eq!(artifact.modules.len(), 2);
        let java = artifact
            .modules
            .iter()
            .find(|m| m.name == "rewrite-java")
            .expect("rewrite-java should be present");
        assert_eq!(java.version, "8.23.1");
        assert_eq!(java.kinds, vec!["implementation", "test-implementation"]);

        assert_eq!(artifact.selections.len(), 1);
        assert_eq!(artifact.selections[0].axis, "test-runtime");
        assert_eq!(artifact.selections[0].name, "rewrite-java-21");
    }

    #[test]
    fn artifact_serialization_roundtrip() {
        let artifact = ResolutionArtifact::from_evaluation(&evaluate());
        let json = artifact.to_json().expect("should serialize");
        let back: ResolutionArtifact = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, artifact);
    }

    #[test]
    fn identical_evaluations_render_identically() {
        let first = ResolutionArtifact::from_evaluation(&evaluate())
            .to_json()
            .expect("should serialize");
        let second = ResolutionArtifact::from_evaluation(&evaluate())
            .to_json()
            .expect("should serialize");
        assert_eq!(first, second);
    }
}
