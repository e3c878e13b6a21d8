// ABOUTME: Bounded concurrency executor gating task submission on a counting semaphore
// ABOUTME: Spawns each task body onto the runtime once a permit is held and drains them on wait

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use super::error::{Result, SweepError};

/// Runs at most `capacity` task bodies at once.
///
/// `submit` waits for a free permit and then spawns the body; the permit moves
/// into the spawned task and is released when the body returns or panics.
/// There is no queue: backpressure is applied to the submitting caller.
pub struct BoundedExecutor {
    capacity: usize,
    semaphore: Arc<Semaphore>,
    tasks: JoinSet<()>,
}

impl BoundedExecutor {
    /// Create an executor with `capacity` permits. Zero is rejected; callers
    /// resolve "unbounded" into a concrete task count first.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SweepError::InvalidCapacity { capacity });
        }

        Ok(Self {
            capacity,
            semaphore: Arc::new(Semaphore::new(capacity)),
            tasks: JoinSet::new(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently held by running bodies
    pub fn in_flight(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }

    /// Wait for a permit, then start `body` as an independent task
    pub async fn submit<F>(&mut self, body: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| SweepError::ExecutorClosed)?;

        self.tasks.spawn(async move {
            let _permit = permit;
            body.await;
        });

        Ok(())
    }

    /// Wait for every submitted body to finish.
    ///
    /// All bodies are drained even if one of them panicked; the first join
    /// failure is reported afterwards.
    pub async fn wait(mut self) -> Result<()> {
        let mut first_failure = None;

        while let Some(joined) = self.tasks.join_next().await {
            if let Err(join_error) = joined {
                error!("Task join error: {}", join_error);
                if first_failure.is_none() {
                    first_failure = Some(join_error);
                }
            }
        }

        debug!("Executor drained ({} permits)", self.capacity);

        match first_failure {
            Some(join_error) => Err(SweepError::Join(join_error)),
            None => Ok(()),
        }
    }
}
