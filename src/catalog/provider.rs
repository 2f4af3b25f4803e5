//! Catalog providers: built-in, file-backed and remote.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SitingError};
use crate::mode::SelectionMode;

use super::types::{Catalog, CatalogDocument};

/// Supplies the category list for one analysis mode.
///
/// Providers are called once before the first selection is made; the result
/// is never refreshed.
pub trait CatalogProvider {
    /// Fetch the raw, unvalidated catalog document
    fn fetch(&self) -> Result<CatalogDocument>;

    /// Fetch and validate
    fn load(&self) -> Result<Catalog> {
        Catalog::from_document(self.fetch()?)
    }
}

/// Catalogs compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCatalog(pub SelectionMode);

impl BuiltinCatalog {
    fn source(&self) -> &'static str {
        match self.0 {
            SelectionMode::Region => include_str!("../../catalogs/region.json"),
            SelectionMode::Drain => include_str!("../../catalogs/drain.json"),
        }
    }
}

impl CatalogProvider for BuiltinCatalog {
    fn fetch(&self) -> Result<CatalogDocument> {
        Ok(serde_json::from_str(self.source())?)
    }
}

/// JSON or YAML catalog on disk
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
    }
}

impl CatalogProvider for FileCatalog {
    fn fetch(&self) -> Result<CatalogDocument> {
        let content = std::fs::read_to_string(&self.path)?;
        let mut document: CatalogDocument = if self.is_yaml() {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        if document.name.is_empty() {
            document.name = self
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(document)
    }
}

/// Catalog served by the analysis backend.
///
/// A single blocking GET; failures are reported, not retried.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last path segment without its extension, used when the body has no name
    fn fallback_name(&self) -> String {
        let path = self
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segment = match path.split_once("://") {
            Some((_, rest)) => rest.rsplit('/').next().unwrap_or(rest),
            None => path.rsplit('/').next().unwrap_or(path),
        };
        Path::new(segment)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| segment.to_string())
    }
}

impl CatalogProvider for HttpCatalog {
    fn fetch(&self) -> Result<CatalogDocument> {
        tracing::debug!("Fetching catalog from {}", self.url);

        let response = ureq::get(&self.url)
            .set("User-Agent", "stp-siting")
            .set("Accept", "application/json")
            .call()
            .map_err(|e| SitingError::Http(format!("{}: {}", self.url, e)))?;

        let body = response.into_string()?;
        let mut document: CatalogDocument = serde_json::from_str(&body)?;
        if document.name.is_empty() {
            document.name = self.fallback_name();
        }
        Ok(document)
    }
}

/// Where a mode's catalog comes from, as written in the config file.
///
/// `"builtin"`, an `http(s)://` URL, or anything else as a file path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CatalogSource {
    #[default]
    Builtin,
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn provider(&self, mode: SelectionMode) -> Box<dyn CatalogProvider> {
        match self {
            CatalogSource::Builtin => Box::new(BuiltinCatalog(mode)),
            CatalogSource::File(path) => Box::new(FileCatalog::new(path)),
            CatalogSource::Url(url) => Box::new(HttpCatalog::new(url.clone())),
        }
    }
}

impl From<String> for CatalogSource {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("builtin") {
            CatalogSource::Builtin
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl From<CatalogSource> for String {
    fn from(value: CatalogSource) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Builtin => f.write_str("builtin"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalogs_are_valid() {
        let region = BuiltinCatalog(SelectionMode::Region).load().unwrap();
        assert_eq!(region.name(), "region");
        assert_eq!(region.len(), 7);
        assert_eq!(
            region.default_influence("STP_River_Stretches_Raster"),
            Some(2.93)
        );

        let drain = BuiltinCatalog(SelectionMode::Drain).load().unwrap();
        assert_eq!(drain.len(), 8);
        assert_eq!(drain.default_influence("STP_Drain_Flow_Rate_Raster"), Some(3.75));
    }

    #[test]
    fn test_http_catalog_name_falls_back_to_url() {
        let name = |url: &str| HttpCatalog::new(url).fallback_name();
        assert_eq!(name("https://example.org/catalogs/drain.json"), "drain");
        assert_eq!(name("https://example.org/api/categories/?mode=drain"), "categories");
        assert_eq!(name("http://localhost:8000/region#top"), "region");
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!(CatalogSource::from("builtin".to_string()), CatalogSource::Builtin);
        assert_eq!(
            CatalogSource::from("https://example.org/api/categories".to_string()),
            CatalogSource::Url("https://example.org/api/categories".to_string())
        );
        assert_eq!(
            CatalogSource::from("catalogs/custom.json".to_string()),
            CatalogSource::File(PathBuf::from("catalogs/custom.json"))
        );
    }

    #[test]
    fn test_yaml_file_catalog() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "categories:\n  - id: 1\n    name: Slope\n    criterionKey: Slope_Raster\n    defaultInfluence: \"4.5\""
        )
        .unwrap();

        let catalog = FileCatalog::new(file.path()).load().unwrap();
        assert_eq!(catalog.default_influence("Slope_Raster"), Some(4.5));
        assert!(!catalog.name().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        drop(file);

        let result = FileCatalog::new(&path).fetch();
        assert!(matches!(result, Err(SitingError::Io(_))));
    }
}
