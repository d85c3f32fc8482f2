use serde::{Deserialize, Serialize};

/// The active document choice of one component instance.
///
/// A local file and an external URL are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unconfigured,
    /// Name of an asset in the managed namespace.
    LocalFile(String),
    /// Absolute `http(s)` URL or absolute path, never checked for existence.
    ExternalUrl(String),
}

impl SelectionState {
    /// Rebuild from the two persisted columns. A local file wins if a row
    /// somehow carries both; blank values count as unset.
    pub fn from_columns(local_file: Option<String>, external_url: Option<String>) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (non_blank(local_file), non_blank(external_url)) {
            (Some(name), _) => Self::LocalFile(name),
            (None, Some(url)) => Self::ExternalUrl(url),
            (None, None) => Self::Unconfigured,
        }
    }

    pub fn local_file(&self) -> Option<&str> {
        match self {
            Self::LocalFile(name) => Some(name),
            _ => None,
        }
    }

    pub fn external_url(&self) -> Option<&str> {
        match self {
            Self::ExternalUrl(url) => Some(url),
            _ => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::Unconfigured)
    }
}

/// Where the viewer should load its document from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerSource {
    /// A managed asset, reachable through the serve endpoint.
    Served(String),
    External(String),
    /// Nothing selected yet; the UI prompts for configuration.
    Unconfigured,
}

impl ViewerSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Served(url) | Self::External(url) => Some(url),
            Self::Unconfigured => None,
        }
    }
}
