//! Catalog operations against one consumer project
//!
//! Every operation works per unit: one failing file never stops its siblings, and
//! the affected index is regenerated afterwards no matter how many files landed.

use crate::config::{load_config, ProjectConfig};
use crate::error::{CatalogError, CatalogResult};
use crate::index::{regenerate_index, ExportTable, INDEX_FILE};
use crate::materialize::{HttpFetcher, Materializer, RemoteFetch};
use crate::paths::resolve_destination;
use crate::product::ProductConfig;
use crate::registry::{CatalogEntry, EntryKind, Registry, Theme, THEME_FILE};
use crate::source::{SourceLocator, SourceRef};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Expo entry point at the project root
pub const ROOT_ENTRY_FILE: &str = "index.ts";

const EXPO_ROUTER_IMPORT: &str = "import 'expo-router/entry';";
const THEME_IMPORT: &str = "import './unistyles.ts';";

/// Result of materializing one registry file
#[derive(Debug)]
pub struct FileOutcome {
    pub registry_path: String,
    pub destination: PathBuf,
    pub result: CatalogResult<SourceRef>,
}

#[derive(Debug)]
pub struct AddReport {
    pub entry: CatalogEntry,
    pub files: Vec<FileOutcome>,
    pub index: CatalogResult<PathBuf>,
}

impl AddReport {
    /// Number of files that reached the project
    pub fn landed(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_ok()).count()
    }

    pub fn is_success(&self) -> bool {
        self.landed() == self.files.len() && self.index.is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    Absent,
}

#[derive(Debug)]
pub struct RemovedFile {
    pub registry_path: String,
    pub destination: PathBuf,
    pub result: CatalogResult<Removal>,
}

#[derive(Debug)]
pub struct RemoveReport {
    pub entry: CatalogEntry,
    pub files: Vec<RemovedFile>,
    pub index: CatalogResult<PathBuf>,
}

impl RemoveReport {
    pub fn is_success(&self) -> bool {
        self.files.iter().all(|f| f.result.is_ok()) && self.index.is_ok()
    }
}

#[derive(Debug)]
pub struct ThemeReport {
    pub theme: Theme,
    pub file: FileOutcome,
}

/// What `init` did to one project artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug)]
pub struct InitReport {
    pub config: (PathBuf, Step),
    pub directories: Vec<(PathBuf, Step)>,
    pub indexes: Vec<(PathBuf, Step)>,
    pub entry_point: (PathBuf, Step),
    /// `None` when the theme file was already present
    pub theme_file: Option<FileOutcome>,
}

impl InitReport {
    pub fn is_success(&self) -> bool {
        self.theme_file.as_ref().map_or(true, |f| f.result.is_ok())
    }

    /// True when a second run found nothing to do
    pub fn is_noop(&self) -> bool {
        self.config.1 == Step::Unchanged
            && self.entry_point.1 == Step::Unchanged
            && self.theme_file.is_none()
            && self
                .directories
                .iter()
                .chain(self.indexes.iter())
                .all(|(_, step)| *step == Step::Unchanged)
    }
}

/// A consumer project plus everything needed to provision files into it
pub struct Project<'r, F> {
    root: PathBuf,
    config_path: PathBuf,
    config: ProjectConfig,
    registry: &'r Registry,
    locator: SourceLocator,
    materializer: Materializer<F>,
}

impl<'r> Project<'r, HttpFetcher> {
    /// Open `root` with the standard source chain and an HTTP fetcher
    pub fn open<C: ProductConfig>(
        product: &C,
        root: PathBuf,
        registry: &'r Registry,
        source_dir: Option<PathBuf>,
    ) -> CatalogResult<Self> {
        let locator = SourceLocator::from_config(product, &root, source_dir)?;
        Ok(Self::new(
            root,
            product.config_file_name(),
            registry,
            locator,
            HttpFetcher::from_config(product),
        ))
    }
}

impl<'r, F: RemoteFetch> Project<'r, F> {
    /// Build a project, reading its config file (defaults if missing or broken)
    pub fn new(
        root: PathBuf,
        config_file_name: &str,
        registry: &'r Registry,
        locator: SourceLocator,
        fetcher: F,
    ) -> Self {
        let config_path = root.join(config_file_name);
        let config = load_config(&config_path);
        Self {
            root,
            config_path,
            config,
            registry,
            locator,
            materializer: Materializer::new(fetcher),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn fetcher(&self) -> &F {
        self.materializer.fetcher()
    }

    /// Absolute destination of a registry file in this project
    pub fn destination(&self, registry_path: &str) -> PathBuf {
        self.root.join(resolve_destination(registry_path, &self.config))
    }

    pub fn index_dir(&self, kind: EntryKind) -> PathBuf {
        match kind {
            EntryKind::Component => self.root.join(self.config.ui_dir()),
            EntryKind::Hook => self.root.join(self.config.hooks_dir()),
        }
    }

    /// Whether `init` has left any of its marks on the project
    pub fn is_initialized(&self) -> bool {
        self.root.join(THEME_FILE).exists()
            || self.index_dir(EntryKind::Component).exists()
            || self.root.join(ROOT_ENTRY_FILE).exists()
    }

    /// Gate for commands that only make sense after `init`
    pub fn require_initialized(&self, cli_name: &'static str) -> CatalogResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(CatalogError::NotInitialized(cli_name))
        }
    }

    /// Rebuild the index for `kind` from what is on disk
    pub fn regenerate(&self, kind: EntryKind) -> CatalogResult<PathBuf> {
        let table = ExportTable::for_kind(self.registry, kind);
        regenerate_index(&self.index_dir(kind), &table)
    }

    /// Locate and materialize one registry file
    pub async fn provision(&self, registry_path: &str) -> FileOutcome {
        let destination = self.destination(registry_path);
        let result = match self.locator.locate(registry_path) {
            Some(source) => self
                .materializer
                .materialize(registry_path, &source, &destination)
                .await
                .map(|()| source),
            None => Err(CatalogError::NoSource(registry_path.to_string())),
        };

        FileOutcome {
            registry_path: registry_path.to_string(),
            destination,
            result,
        }
    }

    /// Copy or download every file of `name`, then resync its index
    pub async fn add(&self, name: &str) -> CatalogResult<AddReport> {
        let entry = self.registry.require(name)?;

        let mut files = Vec::with_capacity(entry.info().files.len());
        for registry_path in entry.info().files {
            files.push(self.provision(registry_path).await);
        }

        let index = self.regenerate(entry.kind());
        Ok(AddReport {
            entry,
            files,
            index,
        })
    }

    /// Delete every file of `name` that exists, then resync its index
    pub async fn remove(&self, name: &str) -> CatalogResult<RemoveReport> {
        let entry = self.registry.require(name)?;

        let mut files = Vec::with_capacity(entry.info().files.len());
        for registry_path in entry.info().files {
            let destination = self.destination(registry_path);
            let result = match fs::remove_file(&destination).await {
                Ok(()) => Ok(Removal::Deleted),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Removal::Absent),
                Err(e) => Err(CatalogError::io("delete", &destination, e)),
            };
            files.push(RemovedFile {
                registry_path: registry_path.to_string(),
                destination,
                result,
            });
        }

        let index = self.regenerate(entry.kind());
        Ok(RemoveReport {
            entry,
            files,
            index,
        })
    }

    /// Fetch the theme configuration file fresh, overwriting the local copy
    pub async fn theme(&self, name: &str) -> CatalogResult<ThemeReport> {
        let theme = *self.registry.require_theme(name)?;
        let file = self.provision(THEME_FILE).await;
        Ok(ThemeReport { theme, file })
    }

    /// Create whatever project scaffolding is missing; safe to re-run
    ///
    /// Failing to write the config or the root entry point aborts. A theme file that
    /// cannot be obtained is reported in the returned [`InitReport`].
    pub async fn init(&self) -> CatalogResult<InitReport> {
        let config = (self.config_path.clone(), self.write_config_if_absent().await?);

        let mut directories = Vec::new();
        let mut indexes = Vec::new();
        for kind in [EntryKind::Component, EntryKind::Hook] {
            let dir = self.index_dir(kind);
            let step = if dir.is_dir() {
                Step::Unchanged
            } else {
                fs::create_dir_all(&dir)
                    .await
                    .map_err(|e| CatalogError::io("create directory", &dir, e))?;
                Step::Created
            };
            directories.push((dir.clone(), step));

            let index_path = dir.join(INDEX_FILE);
            let step = if index_path.exists() {
                Step::Unchanged
            } else {
                self.regenerate(kind)?;
                Step::Created
            };
            indexes.push((index_path, step));
        }

        let entry_point = self.ensure_entry_point().await?;

        let theme_file = if self.root.join(THEME_FILE).exists() {
            None
        } else {
            Some(self.provision(THEME_FILE).await)
        };

        Ok(InitReport {
            config,
            directories,
            indexes,
            entry_point,
            theme_file,
        })
    }

    async fn write_config_if_absent(&self) -> CatalogResult<Step> {
        if self.config_path.exists() {
            return Ok(Step::Unchanged);
        }

        let mut content = serde_json::to_string_pretty(&self.config)
            .map_err(|e| CatalogError::io("serialize", &self.config_path, e.into()))?;
        content.push('\n');
        fs::write(&self.config_path, content)
            .await
            .map_err(|e| CatalogError::io("write", &self.config_path, e))?;
        Ok(Step::Created)
    }

    async fn ensure_entry_point(&self) -> CatalogResult<(PathBuf, Step)> {
        let path = self.root.join(ROOT_ENTRY_FILE);

        let step = if path.exists() {
            let existing = fs::read_to_string(&path)
                .await
                .map_err(|e| CatalogError::io("read", &path, e))?;
            match patch_entry_point(&existing) {
                Some(updated) => {
                    fs::write(&path, updated)
                        .await
                        .map_err(|e| CatalogError::io("write", &path, e))?;
                    Step::Updated
                }
                None => Step::Unchanged,
            }
        } else {
            fs::write(&path, format!("{}\n{}\n", EXPO_ROUTER_IMPORT, THEME_IMPORT))
                .await
                .map_err(|e| CatalogError::io("write", &path, e))?;
            Step::Created
        };

        Ok((path, step))
    }
}

/// Add the router and theme imports an existing entry point is missing
///
/// Returns `None` when both are already present.
pub fn patch_entry_point(existing: &str) -> Option<String> {
    let has_router = existing.contains(EXPO_ROUTER_IMPORT);
    let has_theme = existing.contains(THEME_IMPORT);
    if has_router && has_theme {
        return None;
    }

    let mut updated = existing.to_string();
    if !has_router {
        updated = format!("{}\n{}", EXPO_ROUTER_IMPORT, updated);
    }
    if !has_theme {
        // Theme registration must run right after the router entry
        updated = updated.replacen(
            EXPO_ROUTER_IMPORT,
            &format!("{}\n{}", EXPO_ROUTER_IMPORT, THEME_IMPORT),
            1,
        );
    }
    Some(updated)
}
