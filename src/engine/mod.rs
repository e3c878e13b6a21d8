// ABOUTME: Batch execution engine for per-object operations
// ABOUTME: Bounded concurrency, first-error capture and progress accounting

pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod progress;
pub mod slot;

pub use error::{Result, SweepError};
pub use executor::BoundedExecutor;
pub use orchestrator::{perform_copy, perform_delete, BatchState, CopyPair};
pub use progress::{CapturedLog, ProgressLog, TracingLog};
pub use slot::ErrorSlot;
