//! Background Tasks Module
//!
//! Contains background tasks spawned on behalf of a cache instance.
//!
//! # Tasks
//! - Idle cleanup: wipes the whole cache after a configured quiet period

mod cleanup;

pub use cleanup::spawn_idle_cleanup_task;
