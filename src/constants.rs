//! Common constants used throughout the daystart application.

/// Logical name of the bundled templates catalog document
pub const CATALOG_RESOURCE: &str = "templates.json";

/// Logical name of the bundled user configuration document
pub const PROFILE_RESOURCE: &str = "user-config.json";

/// Prefix under which template file bodies live in the resource set
pub const TEMPLATES_PREFIX: &str = "templates";

/// Maximum number of numeric suffixes tried when allocating a project directory
pub const MAX_DIR_SUFFIXES: u32 = 1000;

/// Project name used when no positional name is given
pub const DEFAULT_PROJECT_PREFIX: &str = "daystart";

/// External editor handed the finished project
pub const EDITOR_COMMAND: &str = "code";
