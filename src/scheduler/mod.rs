//! Scheduler Module
//!
//! Windowed request scheduling: a FIFO task queue drained under a
//! sliding-window admission cap.

mod queue;
mod window;

// Re-export public types
pub use queue::RequestScheduler;
pub use window::AdmissionWindow;
