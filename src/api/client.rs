use super::models::{CatalogItem, decode_catalog};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl CatalogSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            CatalogSource::Url(raw.to_string())
        } else {
            CatalogSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Url(u) => write!(f, "{u}"),
            CatalogSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Fetches and decodes a catalog snapshot.
pub async fn fetch_catalog(source: &CatalogSource) -> Result<Vec<CatalogItem>, CatalogError> {
    let body = match source {
        CatalogSource::Url(url) => {
            let resp = reqwest::Client::new().get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }
            resp.text().await?
        }
        CatalogSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?,
    };

    let items = decode_catalog(serde_json::from_str(&body)?);
    info!(%source, items = items.len(), "catalog loaded");
    Ok(items)
}
