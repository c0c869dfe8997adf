//! Where a catalog document is read from.
//!
//! `DocumentSource` mirrors the places a catalog can live: a file on disk
//! (the usual `README.md`), text already in memory, or a remote URL such as
//! a raw repository file. Every read produces a [`Fingerprint`] so callers
//! can tell whether the document changed since the last parse.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default catalog location, relative to the working directory.
pub const DEFAULT_DOCUMENT_PATH: &str = "README.md";

static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

const HTTP_TIMEOUT_SECS: u64 = 30;

fn get_http_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_default()
    })
}

/// Location of a catalog document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentSource {
    File { path: PathBuf },
    InMemory { content: String },
    Http { url: String },
}

impl DocumentSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn in_memory(content: impl Into<String>) -> Self {
        Self::InMemory {
            content: content.into(),
        }
    }

    pub fn http(url: impl Into<String>) -> Self {
        Self::Http { url: url.into() }
    }

    /// Interpret a configured location: `http://` and `https://` select a
    /// remote source, anything else is a file path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::http(location)
        } else {
            Self::file(location)
        }
    }

    pub fn as_file_path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path.as_path()),
            _ => None,
        }
    }

    /// Read the document.
    ///
    /// Any failure (missing file, invalid UTF-8, HTTP error) is reported as
    /// [`Error::DocumentUnavailable`].
    pub async fn load(&self) -> Result<LoadedDocument> {
        match self {
            Self::File { path } => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| self.unavailable(e.to_string()))?;
                let content = String::from_utf8(bytes)
                    .map_err(|e| self.unavailable(format!("invalid UTF-8: {}", e)))?;
                let modified = tokio::fs::metadata(path)
                    .await
                    .ok()
                    .and_then(|m| m.modified().ok());
                Ok(LoadedDocument::new(content, modified))
            }
            Self::InMemory { content } => Ok(LoadedDocument::new(content.clone(), None)),
            Self::Http { url } => {
                let response = get_http_client()
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| self.unavailable(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(self.unavailable(format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown")
                    )));
                }

                let content = response
                    .text()
                    .await
                    .map_err(|e| self.unavailable(e.to_string()))?;
                Ok(LoadedDocument::new(content, None))
            }
        }
    }

    fn unavailable(&self, reason: String) -> Error {
        Error::DocumentUnavailable {
            location: self.to_string(),
            reason,
        }
    }
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self::file(DEFAULT_DOCUMENT_PATH)
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::InMemory { .. } => write!(f, "<memory>"),
            Self::Http { url } => write!(f, "{}", url),
        }
    }
}

/// Identity of one version of a document: content hash plus modification
/// time when the source has one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    content_hash: String,
    modified: Option<SystemTime>,
}

impl Fingerprint {
    pub fn new(content: &str, modified: Option<SystemTime>) -> Self {
        Self {
            content_hash: compute_hash(&content),
            modified,
        }
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

fn compute_hash<T: Hash>(value: &T) -> String {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Document text together with its fingerprint.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
    content: String,
    fingerprint: Fingerprint,
}

impl LoadedDocument {
    pub fn new(content: String, modified: Option<SystemTime>) -> Self {
        let fingerprint = Fingerprint::new(&content, modified);
        Self {
            content,
            fingerprint,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}
