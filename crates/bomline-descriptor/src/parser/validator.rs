//! Static analysis and validation of the parsed descriptor.
//!
//! Checks for structural completeness, well-formed module coordinates,
//! and known requirement kinds before the descriptor is resolved.

use std::collections::HashSet;

use bomline_common::error::{BomlineError, Result};
use bomline_common::types::{ModuleId, RequirementKind};

use super::ast::DescriptorFile;

/// Validates a parsed descriptor file for semantic correctness.
///
/// # Checks performed
///
/// 1. A `DESCRIPTOR` header block is present.
/// 2. A `PLATFORM` declaration exists if any requirement inherits its version.
/// 3. Every module coordinate is a well-formed `group:name` pair.
/// 4. Every declared requirement kind is known.
/// 5. No duplicate `PROFILE` axis declarations.
///
/// # Errors
///
/// Returns an error if any semantic check fails.
pub fn validate(file: &DescriptorFile) -> Result<()> {
    tracing::info!("validating build descriptor");
    check_header(file)?;
    check_platform_required(file)?;
    check_coordinates(file)?;
    check_kinds(file)?;
    check_duplicate_profiles(file)?;
    Ok(())
}

fn check_header(file: &DescriptorFile) -> Result<()> {
    if file.header.is_none() {
        return Err(BomlineError::Config {
            message: "descriptor has no DESCRIPTOR header block".into(),
        });
    }
    Ok(())
}

fn check_platform_required(file: &DescriptorFile) -> Result<()> {
    let inherits = file.requirements.iter().any(|r| r.version.is_none());
    if inherits && file.platform.is_none() {
        return Err(BomlineError::Config {
            message: "requirements inherit the platform version but no PLATFORM is declared"
                .into(),
        });
    }
    Ok(())
}

fn check_coordinates(file: &DescriptorFile) -> Result<()> {
    for req in &file.requirements {
        let _ = req.coordinate.parse::<ModuleId>()?;
    }
    if let Some(platform) = &file.platform {
        let _ = platform.coordinate.parse::<ModuleId>()?;
    }
    for profile in &file.profiles {
        for candidate in &profile.candidates {
            let _ = candidate.parse::<ModuleId>()?;
        }
    }
    Ok(())
}

fn check_kinds(file: &DescriptorFile) -> Result<()> {
    for req in &file.requirements {
        if let Some(kind) = &req.kind {
            let _ = kind.parse::<RequirementKind>()?;
        }
    }
    Ok(())
}

fn check_duplicate_profiles(file: &DescriptorFile) -> Result<()> {
    let mut seen = HashSet::new();
    for profile in &file.profiles {
        if !seen.insert(&profile.axis) {
            return Err(BomlineError::Config {
                message: format!("duplicate PROFILE axis: \"{}\"", profile.axis),
            });
        }
    }
    Ok(())
}
