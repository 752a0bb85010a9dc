//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
