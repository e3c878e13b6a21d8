// ABOUTME: ObjectClient implementation on top of the object_store crate
// ABOUTME: Builds local, S3, GCS and Azure clients and maps logical paths to store locations

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectMeta, ObjectStore, PutPayload};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::error::{BackendError, Result};
use super::provider::Provider;
use super::ObjectClient;
use crate::engine::error::SweepError;

/// Connection settings applied on top of the provider's own environment
/// variables when a client is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreOptions {
    #[serde(default)]
    pub aws_region: Option<String>,

    #[serde(default)]
    pub aws_endpoint: Option<String>,

    #[serde(default)]
    pub allow_http: bool,
}

/// Client over any `ObjectStore`.
///
/// Logical paths are what users see after `provider://`. For bucketed
/// providers the first segment is the bucket, which the store itself is bound
/// to, so it is stripped before the store is called.
pub struct StoreClient {
    provider: Provider,
    store: Arc<dyn ObjectStore>,
    bucket: Option<String>,
}

impl StoreClient {
    pub fn new(provider: Provider, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            provider,
            store,
            bucket: None,
        }
    }

    pub fn with_bucket(
        provider: Provider,
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            store,
            bucket: Some(bucket.into()),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn location(&self, path: &str) -> Result<ObjectPath> {
        let trimmed = path.trim_matches('/');

        let key = match &self.bucket {
            None => trimmed,
            Some(bucket) => match trimmed.strip_prefix(bucket.as_str()) {
                Some("") => "",
                Some(rest) if rest.starts_with('/') => &rest[1..],
                _ => {
                    return Err(BackendError::InvalidPath {
                        path: path.to_string(),
                        reason: format!("not inside bucket '{}'", bucket),
                    })
                }
            },
        };

        ObjectPath::parse(key).map_err(|e| BackendError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ObjectClient for StoreClient {
    #[instrument(skip(self))]
    async fn list_objects(&self, root: &str) -> Result<Vec<String>> {
        let prefix = self.location(root)?;
        let prefix_str = prefix.as_ref().to_string();

        let listing = if prefix_str.is_empty() {
            self.store.list(None)
        } else {
            self.store.list(Some(&prefix))
        };

        let objects: Vec<ObjectMeta> = listing
            .try_collect()
            .await
            .map_err(|e| BackendError::from_store(root, e))?;

        let mut relative: Vec<String> = objects
            .into_iter()
            .filter_map(|meta| {
                let location = meta.location.as_ref();
                if prefix_str.is_empty() {
                    return Some(location.to_string());
                }
                location
                    .strip_prefix(prefix_str.as_str())
                    .map(|rest| rest.trim_start_matches('/').to_string())
            })
            .filter(|rest| !rest.is_empty())
            .collect();

        relative.sort();
        debug!("Listed {} objects under {}", relative.len(), root);
        Ok(relative)
    }

    async fn delete_object(&self, path: &str) -> Result<()> {
        let location = self.location(path)?;
        self.store
            .delete(&location)
            .await
            .map_err(|e| BackendError::from_store(path, e))
    }

    async fn read_object(&self, path: &str) -> Result<Bytes> {
        let location = self.location(path)?;
        let object = self
            .store
            .get(&location)
            .await
            .map_err(|e| BackendError::from_store(path, e))?;

        object
            .bytes()
            .await
            .map_err(|e| BackendError::from_store(path, e))
    }

    async fn write_object(&self, path: &str, data: Bytes) -> Result<()> {
        let location = self.location(path)?;
        self.store
            .put(&location, PutPayload::from(data))
            .await
            .map(|_| ())
            .map_err(|e| BackendError::from_store(path, e))
    }
}

/// Build a client able to reach objects under `root` for `provider`
pub fn resolve_client(
    provider: Provider,
    root: &str,
    options: &StoreOptions,
) -> std::result::Result<StoreClient, SweepError> {
    let client_error = |message: String| SweepError::Client {
        provider: provider.to_string(),
        message,
    };

    if !provider.is_bucketed() {
        return match provider {
            Provider::File => Ok(StoreClient::new(
                provider,
                Arc::new(LocalFileSystem::new()),
            )),
            _ => Err(SweepError::UnsupportedProvider {
                provider: provider.to_string(),
            }),
        };
    }

    let bucket = root
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    if bucket.is_empty() {
        return Err(client_error(format!(
            "path '{}' must start with a bucket name",
            root
        )));
    }

    let store: Arc<dyn ObjectStore> = match provider {
        Provider::S3 => {
            let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
            if let Some(region) = &options.aws_region {
                builder = builder.with_region(region);
            }
            if let Some(endpoint) = &options.aws_endpoint {
                builder = builder
                    .with_endpoint(endpoint)
                    .with_virtual_hosted_style_request(false);
            }
            if options.allow_http {
                builder = builder.with_allow_http(true);
            }
            Arc::new(builder.build().map_err(|e| client_error(e.to_string()))?)
        }
        Provider::Gcs => Arc::new(
            GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| client_error(e.to_string()))?,
        ),
        Provider::Abs => Arc::new(
            MicrosoftAzureBuilder::from_env()
                .with_container_name(bucket)
                .build()
                .map_err(|e| client_error(e.to_string()))?,
        ),
        Provider::File | Provider::K8s => {
            return Err(SweepError::UnsupportedProvider {
                provider: provider.to_string(),
            })
        }
    };

    debug!("Created {} client for bucket {}", provider, bucket);
    Ok(StoreClient::with_bucket(provider, store, bucket))
}
