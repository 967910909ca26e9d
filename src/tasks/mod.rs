//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Idle sweep: Removes cache entries idle for longer than the timeout

mod cleanup;

pub use cleanup::spawn_cleanup_task;
