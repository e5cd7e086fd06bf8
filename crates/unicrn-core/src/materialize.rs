//! Producing a registry file's bytes at its destination
//!
//! Local sources are byte-copied. Remote sources are fetched into memory and
//! renamed into place, so a failed request never leaves a partial file behind.

use crate::error::{CatalogError, CatalogResult, FetchError};
use crate::product::ProductConfig;
use crate::source::SourceRef;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use url::Url;

/// Upper bound for a single remote fetch
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can GET a URL and hand back the full body
pub trait RemoteFetch: Send + Sync {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// reqwest-backed fetcher with the product user agent and a bounded timeout
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self::new(config.user_agent())
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

impl RemoteFetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await.map_err(classify)?.to_vec())
    }
}

/// Copies or downloads files into the project
pub struct Materializer<F> {
    fetcher: F,
}

impl<F: RemoteFetch> Materializer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Write `registry_path`'s bytes from `source` to `destination`, replacing any prior content
    pub async fn materialize(
        &self,
        registry_path: &str,
        source: &SourceRef,
        destination: &Path,
    ) -> CatalogResult<()> {
        match source {
            SourceRef::LocalPackage(path) | SourceRef::LocalDevTree(path) => {
                if same_file(path, destination).await {
                    return Ok(());
                }
                ensure_parent(destination).await?;
                fs::copy(path, destination)
                    .await
                    .map_err(|e| CatalogError::io("copy to", destination, e))?;
                Ok(())
            }
            SourceRef::Remote(url) => {
                let body = self.fetcher.fetch(url).await.map_err(|reason| {
                    CatalogError::SourceUnavailable {
                        registry_path: registry_path.to_string(),
                        url: url.to_string(),
                        reason,
                    }
                })?;
                ensure_parent(destination).await?;
                write_atomic(destination, &body).await
            }
        }
    }
}

async fn ensure_parent(path: &Path) -> CatalogResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| CatalogError::io("create directory", parent, e))?;
    }
    Ok(())
}

/// Copying a file onto itself would truncate it before the read
async fn same_file(source: &Path, destination: &Path) -> bool {
    match (
        fs::canonicalize(source).await,
        fs::canonicalize(destination).await,
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.unicrn-tmp", name))
}

/// Write to a sibling temp file, then rename over the destination
pub(crate) async fn write_atomic(path: &Path, content: &[u8]) -> CatalogResult<()> {
    let tmp = temp_sibling(path);
    fs::write(&tmp, content)
        .await
        .map_err(|e| CatalogError::io("write", &tmp, e))?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(CatalogError::io("replace", path, e));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::FakeFetcher;
    use super::*;
    use tempfile::TempDir;

    const URL: &str = "https://mirror.test/lib/components/ui/Badge.tsx";

    #[tokio::test]
    async fn test_local_copy_creates_parents_and_replaces() {
        let src_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let src = src_dir.path().join("Badge.tsx");
        std::fs::write(&src, "export const Badge = 1;").unwrap();

        let dest = project.path().join("components/ui/Badge.tsx");
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, "local edits").unwrap();

        let materializer = Materializer::new(FakeFetcher::default());
        materializer
            .materialize("lib/components/ui/Badge.tsx", &SourceRef::LocalDevTree(src), &dest)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "export const Badge = 1;"
        );
        assert_eq!(materializer.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_local_copy_onto_itself_keeps_content() {
        let project = TempDir::new().unwrap();
        let theme = project.path().join("unistyles.ts");
        std::fs::write(&theme, "export const theme = 1;\n").unwrap();

        let materializer = Materializer::new(FakeFetcher::default());
        materializer
            .materialize(
                "unistyles.ts",
                &SourceRef::LocalDevTree(project.path().join("./unistyles.ts")),
                &theme,
            )
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&theme).unwrap(),
            "export const theme = 1;\n"
        );
    }

    #[tokio::test]
    async fn test_remote_success_writes_body() {
        let project = TempDir::new().unwrap();
        let dest = project.path().join("components/ui/Badge.tsx");
        let materializer = Materializer::new(FakeFetcher::default().with_body(URL, "badge"));

        materializer
            .materialize(
                "lib/components/ui/Badge.tsx",
                &SourceRef::Remote(Url::parse(URL).unwrap()),
                &dest,
            )
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "badge");
        assert!(!temp_sibling(&dest).exists());
    }

    #[tokio::test]
    async fn test_remote_failure_leaves_nothing_behind() {
        let project = TempDir::new().unwrap();
        let dest = project.path().join("components/ui/Badge.tsx");
        let materializer = Materializer::new(FakeFetcher::default());

        let err = materializer
            .materialize(
                "lib/components/ui/Badge.tsx",
                &SourceRef::Remote(Url::parse(URL).unwrap()),
                &dest,
            )
            .await
            .unwrap_err();

        match err {
            CatalogError::SourceUnavailable { reason, url, .. } => {
                assert_eq!(reason, FetchError::Status(404));
                assert_eq!(url, URL);
            }
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
        assert!(!dest.exists());
        assert!(!project.path().join("components").exists());
    }

    #[tokio::test]
    async fn test_timeout_is_a_source_failure() {
        let project = TempDir::new().unwrap();
        let dest = project.path().join("unistyles.ts");
        let materializer =
            Materializer::new(FakeFetcher::default().with_failure(URL, FetchError::Timeout));

        let err = materializer
            .materialize("unistyles.ts", &SourceRef::Remote(Url::parse(URL).unwrap()), &dest)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::SourceUnavailable {
                reason: FetchError::Timeout,
                ..
            }
        ));
    }
}
