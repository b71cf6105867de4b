// src/crawl/layout.rs
// =============================================================================
// Where crawled data lands on disk.
//
// Under the data root (./data by default):
//   json/<query>/page_<NNN>.json   raw search response, one per page
//   images/<query>/<slug>.jpg      image bytes, one per photo record
//
// NNN is the zero-based page index padded to 3 digits. The slug comes from
// the API response, so it must be a single plain file name; anything that
// would climb out of images/<query>/ is refused. Directories are
// created on demand. Files are overwritten if they already exist; every run
// is independent.
// =============================================================================

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tokio::fs;

/// Paths and writers for crawl output
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the page responses of `query`
    pub fn json_dir(&self, query: &str) -> PathBuf {
        self.root.join("json").join(query)
    }

    /// Directory holding the images of `query`
    pub fn image_dir(&self, query: &str) -> PathBuf {
        self.root.join("images").join(query)
    }

    /// `<root>/json/<query>/page_<NNN>.json`
    pub fn page_path(&self, query: &str, page: u32) -> PathBuf {
        self.json_dir(query).join(page_file_name(page))
    }

    /// `<root>/images/<query>/<slug>.jpg`
    ///
    /// Fails when `slug` is not a single plain file name (`..`, `a/b`, `/abs`).
    pub fn image_path(&self, query: &str, slug: &str) -> Result<PathBuf> {
        if !is_plain_file_name(slug) {
            return Err(anyhow!("Refusing to save image under unsafe slug {:?}", slug));
        }
        Ok(self.image_dir(query).join(format!("{}.jpg", slug)))
    }

    /// Writes a page body verbatim and returns its path
    pub async fn write_page(&self, query: &str, page: u32, body: &str) -> Result<PathBuf> {
        let path = self.page_path(query, page);
        write_creating_dirs(&path, body.as_bytes()).await?;
        Ok(path)
    }

    /// Writes image bytes and returns the path
    pub async fn write_image(&self, query: &str, slug: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.image_path(query, slug)?;
        write_creating_dirs(&path, bytes).await?;
        Ok(path)
    }
}

/// `page_007.json` for page 7; wider indices keep all their digits
pub fn page_file_name(page: u32) -> String {
    format!("page_{:03}.json", page)
}

// Exactly one normal path component, spelled the same as the input
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part == OsStr::new(name),
        _ => false,
    }
}

async fn write_creating_dirs(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_page_file_name_padding() {
        assert_eq!(page_file_name(0), "page_000.json");
        assert_eq!(page_file_name(7), "page_007.json");
        assert_eq!(page_file_name(42), "page_042.json");
        assert_eq!(page_file_name(1234), "page_1234.json");
    }

    #[test]
    fn test_paths() {
        let layout = OutputLayout::new("./data");
        assert_eq!(
            layout.page_path("pattern", 3),
            PathBuf::from("./data/json/pattern/page_003.json")
        );
        assert_eq!(
            layout.image_path("pattern", "red-brick-wall").unwrap(),
            PathBuf::from("./data/images/pattern/red-brick-wall.jpg")
        );
    }

    #[test]
    fn test_unsafe_slugs_are_refused() {
        let layout = OutputLayout::new("./data");
        for slug in ["../x", "..", ".", "/abs", "/tmp/outside", "a/b", "a/", ""] {
            assert!(layout.image_path("pattern", slug).is_err(), "accepted {:?}", slug);
        }
        assert!(layout.image_path("pattern", "blue-tiles-Xy_9").is_ok());
    }

    #[tokio::test]
    async fn test_write_image_never_leaves_root() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let layout = OutputLayout::new(root.path());
        let escaping = outside.path().join("escaped");

        let result = layout
            .write_image("pattern", escaping.to_str().unwrap(), b"bytes")
            .await;

        assert!(result.is_err());
        assert!(!outside.path().join("escaped.jpg").exists());
        assert!(!root.path().join("images").exists());
    }

    #[tokio::test]
    async fn test_write_page_creates_dirs_and_keeps_body() {
        let root = TempDir::new().unwrap();
        let layout = OutputLayout::new(root.path());
        let body = r#"{"total_pages": 5, "results": []}"#;

        let path = layout.write_page("pattern", 1, body).await.unwrap();

        assert_eq!(path, root.path().join("json/pattern/page_001.json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
    }

    #[tokio::test]
    async fn test_write_image_overwrites() {
        let root = TempDir::new().unwrap();
        let layout = OutputLayout::new(root.path());

        layout.write_image("pattern", "slug", b"first").await.unwrap();
        let path = layout.write_image("pattern", "slug", b"second").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
