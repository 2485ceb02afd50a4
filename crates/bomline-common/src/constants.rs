//! System-wide constants.

/// Application name used in diagnostics and generated artifacts.
pub const APP_NAME: &str = "bomline";

/// File extension for build descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = ".bom";

/// Separator between the group and name parts of a module coordinate.
pub const COORDINATE_SEPARATOR: char = ':';

/// Version string that requests the symbolic latest release.
pub const LATEST_KEYWORD: &str = "latest";

/// Conventional axis name for test-runtime variant selection.
pub const TEST_RUNTIME_AXIS: &str = "test-runtime";
