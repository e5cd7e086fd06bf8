//! Product configuration trait for the CLI binary
//!
//! The core never hard-codes which tool it is running as. The binary implements
//! this trait to name the npm package, the remote mirror and the files the tool
//! owns in a consumer project.

/// Configuration trait for a component-distribution CLI
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Where component sources come from (installed package, remote mirror)
/// - The project files the tool owns
/// - Post-init instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Base URL that registry paths are appended to for the remote fallback
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// npm package name of this tool, looked up under `node_modules/`
    fn package_name(&self) -> &'static str;

    /// Project-level JSON config file name
    fn config_file_name(&self) -> &'static str;

    /// Generate the "next steps" instructions after `init`
    fn next_steps(&self) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
