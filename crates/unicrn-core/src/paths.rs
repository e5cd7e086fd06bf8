//! Mapping registry paths onto a consumer project

use crate::config::ProjectConfig;

/// Registry prefix for component sources
pub const UI_PREFIX: &str = "lib/components/ui/";

/// Registry prefix for hook sources
pub const HOOKS_PREFIX: &str = "lib/hooks/";

/// Compute the project-relative destination of a registry file
///
/// `lib/components/ui/` becomes `{componentsFolder}/ui/` and `lib/hooks/` becomes
/// `{componentsFolder}/hooks/`. Anything else (the theme file) passes through.
/// A folder that already ends in `ui` still gets the `ui/` segment appended.
pub fn resolve_destination(registry_path: &str, config: &ProjectConfig) -> String {
    let folder = config.components_folder.trim_end_matches('/');

    if let Some(rest) = registry_path.strip_prefix(UI_PREFIX) {
        format!("{}/ui/{}", folder, rest)
    } else if let Some(rest) = registry_path.strip_prefix(HOOKS_PREFIX) {
        format!("{}/hooks/{}", folder, rest)
    } else {
        registry_path.to_string()
    }
}
