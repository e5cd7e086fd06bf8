//! Locating the authoritative bytes for a registry file
//!
//! Sources are tried in a fixed order, first match wins:
//! 1. An installed copy of this tool under the project's `node_modules/`
//! 2. A local development checkout (one directory above the executable, or `--source-dir`)
//! 3. The remote mirror (no probe; the fetch itself decides)

use crate::error::{CatalogError, CatalogResult};
use crate::product::ProductConfig;
use std::path::{Path, PathBuf};
use url::Url;

/// Where a registry file will be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    LocalPackage(PathBuf),
    LocalDevTree(PathBuf),
    Remote(Url),
}

impl SourceRef {
    pub fn describe(&self) -> String {
        match self {
            SourceRef::LocalPackage(path) => format!("installed package ({})", path.display()),
            SourceRef::LocalDevTree(path) => format!("local checkout ({})", path.display()),
            SourceRef::Remote(url) => url.to_string(),
        }
    }
}

/// One step of the resolution chain
pub trait SourceStrategy: Send + Sync {
    /// Return a source if this strategy can serve `registry_path`
    fn locate(&self, registry_path: &str) -> Option<SourceRef>;
}

fn existing_file(root: &Path, registry_path: &str) -> Option<PathBuf> {
    let path = root.join(registry_path);
    path.is_file().then_some(path)
}

/// The tool installed as an npm dependency of the consumer project
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    root: PathBuf,
}

impl InstalledPackage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Nearest `node_modules/<package>` at or above `project_root`, like Node's resolver
    pub fn for_project<C: ProductConfig>(config: &C, project_root: &Path) -> Self {
        let install = |dir: &Path| dir.join("node_modules").join(config.package_name());
        let root = project_root
            .ancestors()
            .map(install)
            .find(|candidate| candidate.is_dir())
            .unwrap_or_else(|| install(project_root));
        Self::new(root)
    }
}

impl SourceStrategy for InstalledPackage {
    fn locate(&self, registry_path: &str) -> Option<SourceRef> {
        existing_file(&self.root, registry_path).map(SourceRef::LocalPackage)
    }
}

/// A development checkout of the component library
#[derive(Debug, Clone)]
pub struct DevTree {
    root: PathBuf,
}

impl DevTree {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory above the one holding the running executable
    pub fn from_current_exe() -> Option<Self> {
        let exe = std::env::current_exe().ok()?;
        let root = exe.parent()?.parent()?;
        Some(Self::new(root.to_path_buf()))
    }
}

impl SourceStrategy for DevTree {
    fn locate(&self, registry_path: &str) -> Option<SourceRef> {
        existing_file(&self.root, registry_path).map(SourceRef::LocalDevTree)
    }
}

/// The remote mirror; always offers a URL
#[derive(Debug, Clone)]
pub struct RemoteMirror {
    base: Url,
}

impl RemoteMirror {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Use the product's default URL unless its env override is set
    pub fn from_config<C: ProductConfig>(config: &C) -> CatalogResult<Self> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let base = Url::parse(&url_str).map_err(|_| CatalogError::InvalidUrl(url_str.clone()))?;
        Ok(Self::new(base))
    }

    /// Append the registry path's segments to the base URL
    pub fn url_for(&self, registry_path: &str) -> CatalogResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(registry_path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

impl SourceStrategy for RemoteMirror {
    fn locate(&self, registry_path: &str) -> Option<SourceRef> {
        self.url_for(registry_path).ok().map(SourceRef::Remote)
    }
}

/// Ordered strategy chain
pub struct SourceLocator {
    strategies: Vec<Box<dyn SourceStrategy>>,
}

impl SourceLocator {
    pub fn new(strategies: Vec<Box<dyn SourceStrategy>>) -> Self {
        Self { strategies }
    }

    /// Standard chain: installed package, dev checkout, remote mirror
    ///
    /// `source_dir` replaces the executable-relative guess for the dev checkout.
    pub fn from_config<C: ProductConfig>(
        config: &C,
        project_root: &Path,
        source_dir: Option<PathBuf>,
    ) -> CatalogResult<Self> {
        let mut strategies: Vec<Box<dyn SourceStrategy>> =
            vec![Box::new(InstalledPackage::for_project(config, project_root))];

        if let Some(dev) = source_dir.map(DevTree::new).or_else(DevTree::from_current_exe) {
            strategies.push(Box::new(dev));
        }

        strategies.push(Box::new(RemoteMirror::from_config(config)?));
        Ok(Self::new(strategies))
    }

    pub fn locate(&self, registry_path: &str) -> Option<SourceRef> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.locate(registry_path))
    }
}
