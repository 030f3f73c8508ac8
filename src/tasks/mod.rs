//! Background Tasks Module
//!
//! # Tasks
//! - TTL Purge: Removes expired cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_purge_task;
