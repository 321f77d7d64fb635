//! # codecgate core
//!
//! Data model shared by the codecgate crates: stream descriptors, the
//! platform decode configuration, and the error taxonomy used when a stream
//! cannot be decoded.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod error;
pub mod format;
pub mod mime;

// Re-export main types
pub use descriptor::{ColorInfo, ColorRange, ColorSpace, ColorTransfer, StreamDescriptor};
pub use error::{
    CodecGateError, CodecGateResult, ContractViolation, ErrorCategory, FailureCode,
    ResolutionFailure,
};
pub use format::{keys, DecodeConfiguration, FormatValue};
pub use mime::TrackKind;
