use std::path::PathBuf;

use anyhow::Context as _;
use url::Url;

use crate::http::{FetchError, ImageSource};

/// Turns a Drive sharing link (`/open?id=...`) into a direct download link
/// (`/uc?id=...`). Only the first `open` path segment is rewritten; anything
/// that does not parse as a URL is passed through for the fetch to reject.
pub fn image_fetch_url(source: &str) -> String {
    let source = source.trim();
    let Ok(mut url) = Url::parse(source) else {
        return source.to_owned();
    };
    let Some(segments) = url.path_segments() else {
        return source.to_owned();
    };
    let mut segments: Vec<String> = segments.map(str::to_owned).collect();
    let Some(open) = segments.iter().position(|segment| segment == "open") else {
        return source.to_owned();
    };
    segments[open] = "uc".to_owned();
    url.set_path(&segments.join("/"));
    url.to_string()
}

#[derive(Debug)]
pub enum CacheOutcome {
    /// The image was already on disk; nothing was fetched.
    Cached(PathBuf),
    Fetched(PathBuf),
    /// The download failed; no file was written.
    Failed(FetchError),
}

/// Write-once image store keyed by entry slug.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.png"))
    }

    /// Makes sure the image for `slug` is on disk, downloading it from
    /// `source` only when no file exists yet. Download failures are returned
    /// as [`CacheOutcome::Failed`]; only local I/O errors are `Err`.
    pub fn ensure(
        &self,
        slug: &str,
        source: &str,
        images: &dyn ImageSource,
    ) -> anyhow::Result<CacheOutcome> {
        let path = self.path_for(slug);
        if path.exists() {
            return Ok(CacheOutcome::Cached(path));
        }

        let url = image_fetch_url(source);
        let bytes = match images.fetch_image(&url) {
            Ok(bytes) => bytes,
            Err(err) => return Ok(CacheOutcome::Failed(err)),
        };

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create image dir: {}", self.dir.display()))?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("write image: {}", path.display()))?;
        Ok(CacheOutcome::Fetched(path))
    }
}
