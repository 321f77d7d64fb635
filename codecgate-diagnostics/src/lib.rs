//! # codecgate diagnostics
//!
//! Debugging support for codecgate.
//! Provides logging initialization and a serializable report of the
//! decisions a device profile makes.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod debug_logger;
pub mod device_report;

// Re-export main types
pub use debug_logger::DebugLogger;
pub use device_report::DeviceReport;
