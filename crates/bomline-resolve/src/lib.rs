//! # bomline-resolve
//!
//! Version-aligned dependency resolution and build composition.
//!
//! Handles:
//! - **Catalog**: Memoized symbolic version resolution over a pluggable source.
//! - **Exclusion**: Pattern-based rejection of pre-release versions.
//! - **Engine**: Reconciliation of module requirements into a resolved graph.
//! - **Profile**: Variant-axis selection among mutually exclusive modules.
//! - **Descriptor**: Build descriptor model and evaluation orchestration.
//! - **Artifact**: Flat serializable output for downstream build tooling.

pub mod artifact;
pub mod catalog;
pub mod descriptor;
pub mod engine;
pub mod exclusion;
pub mod profile;
