// ABOUTME: Reference-level entry points for delete, copy and list
// ABOUTME: Validates the provider, resolves clients, expands listings and runs the batch engine

use std::sync::Arc;
use tracing::{info, instrument};

use crate::backend::{
    ensure_supported, join_path, resolve_client, split_reference, ObjectClient, Provider,
    StoreOptions,
};
use crate::engine::error::{Result, SweepError};
use crate::engine::{perform_copy, perform_delete, CopyPair, ProgressLog};

/// Delete every object under `"<provider>://<root>"`.
///
/// The provider is checked before any client is built, and a failing client
/// or listing aborts before anything is deleted.
#[instrument(skip(options, log))]
pub async fn delete(
    reference: &str,
    parallelism: usize,
    options: &StoreOptions,
    log: Arc<dyn ProgressLog>,
) -> Result<()> {
    let (provider, root) = parse(reference)?;
    let client = Arc::new(resolve_client(provider, &root, options)?);

    delete_with_client(client, provider, &root, parallelism, log).await
}

/// Same as [`delete`] with an already constructed client
pub async fn delete_with_client<C>(
    client: Arc<C>,
    provider: Provider,
    root: &str,
    parallelism: usize,
    log: Arc<dyn ProgressLog>,
) -> Result<()>
where
    C: ObjectClient + ?Sized + 'static,
{
    let relative = client.list_objects(root).await?;
    let absolute: Vec<String> = relative.iter().map(|r| join_path(root, r)).collect();

    info!(
        "Deleting {} objects under {}://{}",
        absolute.len(),
        provider,
        root
    );

    perform_delete(client, provider, absolute, parallelism, log).await
}

/// Copy every object under the source reference to the same relative
/// location under the target reference
#[instrument(skip(options, log))]
pub async fn copy(
    source_reference: &str,
    target_reference: &str,
    parallelism: usize,
    options: &StoreOptions,
    log: Arc<dyn ProgressLog>,
) -> Result<()> {
    let (source_provider, source_root) = parse(source_reference)?;
    let (target_provider, target_root) = parse(target_reference)?;

    let source = Arc::new(resolve_client(source_provider, &source_root, options)?);
    let target = Arc::new(resolve_client(target_provider, &target_root, options)?);

    copy_with_clients(
        (source, source_provider, &source_root),
        (target, target_provider, &target_root),
        parallelism,
        log,
    )
    .await
}

/// Same as [`copy`] with already constructed clients, each given as
/// `(client, provider, root)`
pub async fn copy_with_clients<S, T>(
    source: (Arc<S>, Provider, &str),
    target: (Arc<T>, Provider, &str),
    parallelism: usize,
    log: Arc<dyn ProgressLog>,
) -> Result<()>
where
    S: ObjectClient + ?Sized + 'static,
    T: ObjectClient + ?Sized + 'static,
{
    let (source_client, source_provider, source_root) = source;
    let (target_client, target_provider, target_root) = target;

    let relative = source_client.list_objects(source_root).await?;
    let pairs: Vec<CopyPair> = relative
        .iter()
        .map(|r| CopyPair::new(join_path(source_root, r), join_path(target_root, r)))
        .collect();

    info!(
        "Copying {} objects from {}://{} to {}://{}",
        pairs.len(),
        source_provider,
        source_root,
        target_provider,
        target_root
    );

    perform_copy(
        source_client,
        source_provider,
        target_client,
        target_provider,
        pairs,
        parallelism,
        log,
    )
    .await
}

/// Absolute paths of every object under `"<provider>://<root>"`
pub async fn list(reference: &str, options: &StoreOptions) -> Result<Vec<String>> {
    let (provider, root) = parse(reference)?;
    let client = resolve_client(provider, &root, options)?;

    let relative = client.list_objects(&root).await?;
    Ok(relative.iter().map(|r| join_path(&root, r)).collect())
}

fn parse(reference: &str) -> Result<(Provider, String)> {
    let (tag, root) = split_reference(reference)?;
    let provider = ensure_supported(tag)?;
    let root = normalize_root(provider, reference, root)?;
    Ok((provider, root))
}

// Local roots become absolute so the filesystem store, which is rooted at
// `/`, resolves them the same way the shell would.
fn normalize_root(provider: Provider, reference: &str, root: &str) -> Result<String> {
    match provider {
        Provider::File => {
            let root = if root.is_empty() { "." } else { root };
            let absolute =
                std::path::absolute(root).map_err(|e| SweepError::InvalidReference {
                    reference: reference.to_string(),
                    reason: e.to_string(),
                })?;
            Ok(absolute.to_string_lossy().into_owned())
        }
        _ => Ok(root.trim_start_matches('/').to_string()),
    }
}
