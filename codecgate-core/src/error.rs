//! Error types for codecgate
//!
//! Two tiers: [`ContractViolation`] for caller bugs (a descriptor missing a
//! field that resolution requires) and [`ResolutionFailure`] for runtime
//! conditions on this device. Both surface through [`CodecGateError`].

use crate::descriptor::StreamDescriptor;
use crate::mime;
use thiserror::Error;

/// Main error type for codecgate operations
#[derive(Error, Debug)]
pub enum CodecGateError {
    /// Caller passed a descriptor that breaks the resolution contract
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractViolation),

    /// Stream cannot be decoded on this device
    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),

    /// Configuration could not be loaded
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Reason the configuration was rejected
        reason: String,
    },

    /// Logging could not be initialized
    #[error("Logging initialization failed: {reason}")]
    Logging {
        /// Reason for the failure
        reason: String,
    },
}

/// Result type alias for codecgate operations
pub type CodecGateResult<T> = Result<T, CodecGateError>;

/// Caller-side contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// A descriptor field required for this kind of stream is absent
    #[error("stream descriptor is missing required field `{field}`")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
}

/// Machine-checkable reason for a [`ResolutionFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCode {
    /// No decoder satisfies the requested configuration
    DecodingFormatUnsupported,
    /// The platform cannot decode HDR content at all
    HdrDecodingUnsupported,
    /// The platform or device cannot tone-map HDR to SDR while decoding
    ToneMappingUnsupported,
    /// A decoder was found but could not be constructed
    DecoderInitFailed,
}

impl FailureCode {
    /// Stable string code for programmatic handling
    pub fn error_code(self) -> &'static str {
        match self {
            FailureCode::DecodingFormatUnsupported => "DECODING_FORMAT_UNSUPPORTED",
            FailureCode::HdrDecodingUnsupported => "HDR_DECODING_UNSUPPORTED",
            FailureCode::ToneMappingUnsupported => "TONE_MAPPING_UNSUPPORTED",
            FailureCode::DecoderInitFailed => "DECODER_INIT_FAILED",
        }
    }

    /// Default human-readable reason
    pub fn default_reason(self) -> &'static str {
        match self {
            FailureCode::DecodingFormatUnsupported => {
                "The requested decoding format is not supported."
            }
            FailureCode::HdrDecodingUnsupported => "Decoding HDR is not supported.",
            FailureCode::ToneMappingUnsupported => "Tone-mapping HDR is not supported.",
            FailureCode::DecoderInitFailed => "The decoder could not be initialized.",
        }
    }
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.error_code())
    }
}

/// A stream that cannot be decoded under the current device constraints
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} decoder failure ({code}): {reason}", track_label(.is_video))]
pub struct ResolutionFailure {
    /// Why resolution failed
    pub code: FailureCode,
    /// Human-readable reason
    pub reason: String,
    /// Descriptor the caller asked to decode
    pub descriptor: Box<StreamDescriptor>,
    /// Whether the stream is a video stream
    pub is_video: bool,
    /// Whether the failing codec role is a decoder
    pub is_decoder: bool,
}

impl ResolutionFailure {
    /// Decoder failure with the code's default reason
    pub fn new(code: FailureCode, descriptor: &StreamDescriptor) -> Self {
        Self::with_reason(code, descriptor, code.default_reason())
    }

    /// Decoder failure with a specific reason
    pub fn with_reason(
        code: FailureCode,
        descriptor: &StreamDescriptor,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            code,
            reason: reason.into(),
            is_video: descriptor.mime_type().is_some_and(mime::is_video),
            descriptor: Box::new(descriptor.clone()),
            is_decoder: true,
        }
    }

    /// Whether the caller can retry with a different request.
    ///
    /// A tone-mapping failure leaves plain HDR decoding available.
    pub fn is_recoverable(&self) -> bool {
        self.code == FailureCode::ToneMappingUnsupported
    }
}

fn track_label(is_video: &bool) -> &'static str {
    if *is_video {
        "Video"
    } else {
        "Audio"
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied inconsistent input
    Contract,
    /// Stream format not decodable here
    Format,
    /// Platform version or device model limitation
    Platform,
    /// Decoder construction problem
    Codec,
    /// Configuration and setup errors
    Configuration,
    /// Logging and other system-level errors
    System,
}

impl CodecGateError {
    /// Get error code for programmatic handling
    pub fn error_code(&self) -> String {
        match self {
            CodecGateError::Contract(_) => "CONTRACT_VIOLATION".to_string(),
            CodecGateError::Resolution(failure) => failure.code.error_code().to_string(),
            CodecGateError::Configuration { .. } => "CONFIGURATION_ERROR".to_string(),
            CodecGateError::Logging { .. } => "LOGGING_ERROR".to_string(),
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            CodecGateError::Contract(_) => ErrorCategory::Contract,
            CodecGateError::Resolution(failure) => match failure.code {
                FailureCode::DecodingFormatUnsupported => ErrorCategory::Format,
                FailureCode::HdrDecodingUnsupported => ErrorCategory::Platform,
                FailureCode::ToneMappingUnsupported => ErrorCategory::Platform,
                FailureCode::DecoderInitFailed => ErrorCategory::Codec,
            },
            CodecGateError::Configuration { .. } => ErrorCategory::Configuration,
            CodecGateError::Logging { .. } => ErrorCategory::System,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CodecGateError::Resolution(failure) => failure.is_recoverable(),
            _ => false,
        }
    }

    /// Resolution failure, if this is one
    pub fn as_resolution_failure(&self) -> Option<&ResolutionFailure> {
        match self {
            CodecGateError::Resolution(failure) => Some(failure),
            _ => None,
        }
    }

    /// Failure code, if this is a resolution failure
    pub fn failure_code(&self) -> Option<FailureCode> {
        self.as_resolution_failure().map(|failure| failure.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ColorInfo;

    fn hdr_descriptor() -> StreamDescriptor {
        StreamDescriptor::video(mime::VIDEO_H265, 1920, 1080).color_info(ColorInfo::hdr10())
    }

    #[test]
    fn test_error_categories() {
        let tone_mapping: CodecGateError =
            ResolutionFailure::new(FailureCode::ToneMappingUnsupported, &hdr_descriptor()).into();
        assert_eq!(tone_mapping.category(), ErrorCategory::Platform);
        assert!(tone_mapping.is_recoverable());

        let format: CodecGateError =
            ResolutionFailure::new(FailureCode::DecodingFormatUnsupported, &hdr_descriptor())
                .into();
        assert_eq!(format.category(), ErrorCategory::Format);
        assert!(!format.is_recoverable());

        let contract: CodecGateError = ContractViolation::MissingField {
            field: "sample_mime_type",
        }
        .into();
        assert_eq!(contract.category(), ErrorCategory::Contract);
        assert_eq!(contract.error_code(), "CONTRACT_VIOLATION");
        assert_eq!(contract.failure_code(), None);
    }

    #[test]
    fn test_failure_carries_descriptor_context() {
        let descriptor = hdr_descriptor();
        let failure = ResolutionFailure::new(FailureCode::HdrDecodingUnsupported, &descriptor);

        assert_eq!(*failure.descriptor, descriptor);
        assert!(failure.is_video);
        assert!(failure.is_decoder);
        assert_eq!(failure.reason, "Decoding HDR is not supported.");

        let audio = StreamDescriptor::audio(mime::AUDIO_OPUS, 48_000, 2);
        let failure = ResolutionFailure::new(FailureCode::DecodingFormatUnsupported, &audio);
        assert!(!failure.is_video);
    }

    #[test]
    fn test_error_display() {
        let failure =
            ResolutionFailure::new(FailureCode::ToneMappingUnsupported, &hdr_descriptor());
        assert_eq!(
            failure.to_string(),
            "Video decoder failure (TONE_MAPPING_UNSUPPORTED): Tone-mapping HDR is not supported."
        );

        let error = CodecGateError::from(ContractViolation::MissingField { field: "width" });
        assert_eq!(
            error.to_string(),
            "Contract violation: stream descriptor is missing required field `width`"
        );
    }
}
