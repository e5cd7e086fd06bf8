//! UNICRN Core - provisioning library behind the `unicrn` CLI
//!
//! Copies or downloads component and hook sources from a catalog into a React Native
//! project and keeps the project's barrel index files in sync with what is on disk.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - config loading, path rewriting, source location,
//!   file materialization and index regeneration
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `Project` with
//!   `init`/`add`/`remove`/`theme`
//! - **Layer 3: CLI/TUI Interface** - console output plus optional cliclack prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based entry picker
//!
//! # Example Usage
//!
//! ```ignore
//! use unicrn_core::{Project, Registry};
//!
//! let project = Project::open(&MyConfig, std::env::current_dir()?, Registry::builtin(), None)?;
//! let report = project.add("button").await?;
//! assert!(report.is_success());
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod materialize;
pub mod output;
pub mod paths;
pub mod product;
pub mod project;
pub mod registry;
pub mod source;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{load_config, ProjectConfig};
pub use error::{CatalogError, CatalogResult, FetchError};
pub use index::{regenerate_index, ExportTable};
pub use materialize::{HttpFetcher, Materializer, RemoteFetch};
pub use paths::resolve_destination;
pub use product::ProductConfig;
pub use project::{AddReport, InitReport, Project, RemoveReport, ThemeReport};
pub use registry::{CatalogEntry, EntryInfo, EntryKind, Registry, Theme};
pub use source::{SourceLocator, SourceRef, SourceStrategy};
