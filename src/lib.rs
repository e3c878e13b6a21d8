// ABOUTME: Main library module for the sweeper bulk object tool
// ABOUTME: Exports the batch engine, backend clients, operations and CLI

pub mod backend;
pub mod cli;
pub mod engine;
pub mod ops;

// Re-export commonly used types
pub use backend::{ObjectClient, Provider, StoreClient, StoreOptions};
pub use engine::{perform_copy, perform_delete, BoundedExecutor, ProgressLog, SweepError};
pub use ops::{copy, delete, list};

pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
