// ABOUTME: Parallel delete and copy orchestration with fail-fast error propagation
// ABOUTME: Feeds one task per object into the bounded executor and returns the first failure

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::error::{Result, SweepError};
use super::executor::BoundedExecutor;
use super::progress::{effective_parallelism, ordinal_label, ProgressLog};
use super::slot::ErrorSlot;
use crate::backend::{ObjectClient, Provider};

/// Lifecycle of a single batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    /// Tasks are being handed to the executor in list order
    Submitting,
    /// No more submissions; in-flight tasks are finishing
    Draining,
    Done,
}

/// One source object and where its copy goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPair {
    pub source: String,
    pub target: String,
}

impl CopyPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Delete every path in `paths` through `client`, at most `parallelism` at a
/// time (zero means all at once).
///
/// Once a delete fails no further paths are submitted; deletes that are
/// already running finish normally. Only the first failure is returned, the
/// rest are only logged.
#[instrument(skip(client, paths, log), fields(provider = %provider, total = paths.len()))]
pub async fn perform_delete<C>(
    client: Arc<C>,
    provider: Provider,
    paths: Vec<String>,
    parallelism: usize,
    log: Arc<dyn ProgressLog>,
) -> Result<()>
where
    C: ObjectClient + ?Sized + 'static,
{
    run_batch(
        paths,
        parallelism,
        log,
        |path| (format!("delete: {}://{}", provider, path), path.clone()),
        move |path| {
            let client = Arc::clone(&client);
            async move { client.delete_object(&path).await }
        },
    )
    .await
}

/// Copy each pair from `source` to `target` with the same bounded, fail-fast
/// behaviour as [`perform_delete`].
#[instrument(
    skip(source, target, pairs, log),
    fields(from = %source_provider, to = %target_provider, total = pairs.len())
)]
pub async fn perform_copy<S, T>(
    source: Arc<S>,
    source_provider: Provider,
    target: Arc<T>,
    target_provider: Provider,
    pairs: Vec<CopyPair>,
    parallelism: usize,
    log: Arc<dyn ProgressLog>,
) -> Result<()>
where
    S: ObjectClient + ?Sized + 'static,
    T: ObjectClient + ?Sized + 'static,
{
    run_batch(
        pairs,
        parallelism,
        log,
        |pair| {
            (
                format!(
                    "copy: {}://{} -> {}://{}",
                    source_provider, pair.source, target_provider, pair.target
                ),
                format!("{} -> {}", pair.source, pair.target),
            )
        },
        move |pair| {
            let source = Arc::clone(&source);
            let target = Arc::clone(&target);
            async move {
                let data = source.read_object(&pair.source).await?;
                target.write_object(&pair.target, data).await
            }
        },
    )
    .await
}

/// Shared submission loop.
///
/// `describe` gives the progress text and the subject named in failure lines;
/// `operation` builds the work for one item. The work future is only polled if
/// no failure was recorded by the time its task gets to run. A panicking work
/// future counts as a failure and stops submission like any other error.
async fn run_batch<I, D, F, Fut>(
    items: Vec<I>,
    parallelism: usize,
    log: Arc<dyn ProgressLog>,
    describe: D,
    operation: F,
) -> Result<()>
where
    I: Send + 'static,
    D: Fn(&I) -> (String, String),
    F: Fn(I) -> Fut,
    Fut: Future<Output = crate::backend::error::Result<()>> + Send + 'static,
{
    let total = items.len();
    let mut state = BatchState::Idle;

    if total == 0 {
        debug!(state = ?BatchState::Done, "Empty batch, nothing to submit");
        return Ok(());
    }

    let capacity = effective_parallelism(parallelism, total);
    let mut executor = BoundedExecutor::new(capacity)?;
    let slot: Arc<ErrorSlot<SweepError>> = Arc::new(ErrorSlot::new());

    transition(&mut state, BatchState::Submitting);
    debug!("Submitting {} tasks with parallelism {}", total, capacity);

    let mut submitted = 0;
    for (index, item) in items.into_iter().enumerate() {
        if slot.is_occupied() {
            warn!(
                "Failure observed, not submitting the remaining {} tasks",
                total - index
            );
            break;
        }

        let label = ordinal_label(index + 1, total);
        let (action, subject) = describe(&item);
        let work = operation(item);
        let slot = Arc::clone(&slot);
        let log = Arc::clone(&log);

        executor
            .submit(async move {
                if slot.is_occupied() {
                    return;
                }

                log.log(&format!("[{}/{}] {}", label, total, action));

                match AssertUnwindSafe(work).catch_unwind().await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        log.log(&format!("{} file: {}", e, subject));
                        slot.offer(SweepError::from(e));
                    }
                    Err(_) => {
                        let e = SweepError::TaskPanicked { subject };
                        log.log(&e.to_string());
                        slot.offer(e);
                    }
                }
            })
            .await?;
        submitted += 1;
    }

    transition(&mut state, BatchState::Draining);
    let drained = executor.wait().await;
    transition(&mut state, BatchState::Done);
    debug!("Batch finished, {}/{} tasks submitted", submitted, total);

    match slot.take() {
        Some(e) => Err(e),
        None => drained,
    }
}

fn transition(state: &mut BatchState, next: BatchState) {
    debug!(from = ?*state, to = ?next, "Batch state change");
    *state = next;
}
