use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::version::sort_versions_desc;

/// A published provider or module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: String,
    pub full_name: String,
    pub namespace: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ArtifactKind,
    /// Newest first once passed through [`Artifact::normalized`].
    #[serde(default)]
    pub versions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Artifact flavour, tagged by the `type` field on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArtifactKind {
    Provider,
    Module { provider: String },
}

impl ArtifactKind {
    /// Route category of the artifact pages.
    pub fn category(&self) -> &'static str {
        match self {
            ArtifactKind::Provider => "providers",
            ArtifactKind::Module { .. } => "modules",
        }
    }

    pub fn provider(&self) -> Option<&str> {
        match self {
            ArtifactKind::Provider => None,
            ArtifactKind::Module { provider } => Some(provider),
        }
    }
}

impl Artifact {
    /// Sort versions newest first.
    pub fn normalized(mut self) -> Self {
        sort_versions_desc(&mut self.versions);
        self
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }

    pub fn slug(&self) -> ArtifactSlug {
        ArtifactSlug {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            provider: self.kind.provider().map(str::to_string),
        }
    }
}

/// Path segments identifying one artifact: `namespace/name[/provider]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSlug {
    pub namespace: String,
    pub name: String,
    /// Present for modules only.
    pub provider: Option<String>,
}

impl ArtifactSlug {
    pub fn provider(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            provider: None,
        }
    }

    pub fn module(namespace: &str, name: &str, provider: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            provider: Some(provider.to_string()),
        }
    }

    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.namespace.as_str(), self.name.as_str()];
        if let Some(provider) = &self.provider {
            segments.push(provider);
        }
        segments
    }

    /// `/namespace/name[/provider]`, relative to the artifacts API.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }

    pub fn is_empty(&self) -> bool {
        self.segments().iter().any(|s| s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtifact {
    pub namespace: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ArtifactKind,
    pub version: String,
}
