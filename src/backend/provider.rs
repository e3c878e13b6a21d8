// ABOUTME: Provider tags recognised in object references and the set actually supported
// ABOUTME: Validation here runs before any client is built or any listing happens

use std::collections::HashSet;
use std::fmt;

use crate::engine::error::{Result, SweepError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Local filesystem
    File,
    /// Amazon S3 and compatible stores
    S3,
    /// Google Cloud Storage
    Gcs,
    /// Azure Blob Storage
    Abs,
    /// Files inside a cluster workload
    K8s,
}

impl Provider {
    pub fn tag(&self) -> &'static str {
        match self {
            Provider::File => "file",
            Provider::S3 => "s3",
            Provider::Gcs => "gcs",
            Provider::Abs => "abs",
            Provider::K8s => "k8s",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "file" => Some(Provider::File),
            "s3" => Some(Provider::S3),
            "gcs" => Some(Provider::Gcs),
            "abs" => Some(Provider::Abs),
            "k8s" => Some(Provider::K8s),
            _ => None,
        }
    }

    /// Whether paths for this provider start with a bucket or container name
    pub fn is_bucketed(&self) -> bool {
        matches!(self, Provider::S3 | Provider::Gcs | Provider::Abs)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Providers that have a working client
pub fn supported_providers() -> HashSet<Provider> {
    [Provider::File, Provider::S3, Provider::Gcs, Provider::Abs]
        .into_iter()
        .collect()
}

/// Resolve `tag` to a supported provider or fail with `UnsupportedProvider`
pub fn ensure_supported(tag: &str) -> Result<Provider> {
    Provider::from_tag(tag)
        .filter(|provider| supported_providers().contains(provider))
        .ok_or_else(|| SweepError::UnsupportedProvider {
            provider: tag.to_string(),
        })
}
