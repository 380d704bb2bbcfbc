//! Runner module for fan-out batch execution
//!
//! Provides the batch runner, its summary type and the shared progress
//! counter that workers bump as operations finish.

pub mod core;
pub mod progress;

pub use core::{BatchRunner, BatchSummary};
pub use progress::BatchProgress;
