//! # codecgate - Platform-aware decoder selection
//!
//! codecgate picks and constructs a media decoder for a stream, taking the
//! device it runs on into account: HDR content is only admitted where the
//! platform can decode it, HDR to SDR tone-mapping is only requested where
//! it works, and decoders are told not to drop frames where that is
//! supported.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codecgate::{mime, CodecGate, ColorInfo, GlobalConfig, PlatformInfo, StreamDescriptor};
//!
//! fn main() -> Result<(), codecgate::CodecGateError> {
//!     let gate = CodecGate::init_with(GlobalConfig {
//!         platform: PlatformInfo {
//!             api_level: 33,
//!             target_api_level: 33,
//!             manufacturer: "Acme".to_string(),
//!             build_id: "AX1.230101.001".to_string(),
//!         },
//!         ..Default::default()
//!     })?;
//!
//!     let descriptor = StreamDescriptor::video(mime::VIDEO_H265, 3840, 2160)
//!         .color_info(ColorInfo::hdr10());
//!     let decoder = gate.resolve_video_decoder(&descriptor, None, false)?;
//!     println!("Decoding with {}", decoder.codec_name());
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use codecgate_core::{
    keys, mime, CodecGateError, CodecGateResult, ColorInfo, ColorRange, ColorSpace, ColorTransfer,
    ContractViolation, DecodeConfiguration, ErrorCategory, FailureCode, FormatValue,
    ResolutionFailure, StreamDescriptor, TrackKind,
};

pub use codecgate_media::{
    CapabilityQuery, CodecCapabilities, CodecCatalog, CodecStringLookup, ConfiguredDecoder,
    ConfiguredDecoderFactory, ConstructionError, DecoderFactory, DecoderHandle, DecoderInstance,
    DecoderRequest, DecoderResolver, DecoderResolverBuilder, DecoderState, DeviceProfile,
    DeviceQuirk, OutputSurface, PlatformInfo, ProfileLevel, ProfileLevelLookup, QuirkTable,
    SurfaceHandle,
};

#[cfg(feature = "diagnostics")]
pub use codecgate_diagnostics::{DebugLogger, DeviceReport};

// Public API modules
pub mod config;

pub use config::{ConfigError, GlobalConfig};

use std::sync::Arc;

/// Main entry point for codecgate
#[derive(Debug, Clone)]
pub struct CodecGate {
    inner: Arc<CodecGateInner>,
}

#[derive(Debug)]
struct CodecGateInner {
    config: GlobalConfig,
    resolver: DecoderResolver,
}

impl CodecGate {
    /// Initialize codecgate with default settings
    pub fn init() -> CodecGateResult<Self> {
        Self::init_with(GlobalConfig::default())
    }

    /// Initialize with custom global configuration
    ///
    /// The device profile is derived here, once, and shared by every
    /// resolution made through this instance.
    pub fn init_with(config: GlobalConfig) -> CodecGateResult<Self> {
        #[cfg(feature = "diagnostics")]
        if config.debug_logging {
            // Another subscriber may already be installed by the host
            if let Err(e) = DebugLogger::for_debug_logging(true).init() {
                tracing::debug!("Debug logging not installed: {}", e);
            }
        }

        let resolver = DecoderResolver::builder(config.device_profile())
            .capability_query(Arc::new(config.catalog()))
            .build();
        Ok(Self::from_resolver(config, resolver))
    }

    /// Wrap an already built resolver, e.g. one with a platform capability
    /// query and decoder factory
    pub fn from_resolver(config: GlobalConfig, resolver: DecoderResolver) -> Self {
        let device = resolver.device();
        tracing::info!(
            manufacturer = %device.platform().manufacturer,
            build_id = %device.platform().build_id,
            api_level = device.api_level(),
            frame_drop_suppression = device.supports_frame_drop_suppression(),
            hdr_decoding = device.supports_hdr_decoding(),
            tone_mapping = device.supports_tone_mapping(),
            "Device profile derived"
        );

        Self {
            inner: Arc::new(CodecGateInner { config, resolver }),
        }
    }

    /// Configuration this instance was created with
    pub fn config(&self) -> &GlobalConfig {
        &self.inner.config
    }

    /// Device profile shared by all resolutions
    pub fn device(&self) -> &DeviceProfile {
        self.inner.resolver.device()
    }

    /// Underlying resolver
    pub fn resolver(&self) -> &DecoderResolver {
        &self.inner.resolver
    }

    /// Serializable snapshot of the device profile decisions
    #[cfg(feature = "diagnostics")]
    pub fn device_report(&self) -> DeviceReport {
        DeviceReport::from_profile(self.device())
    }

    /// Resolve a decoder for an audio stream
    pub fn resolve_audio_decoder(
        &self,
        descriptor: &StreamDescriptor,
    ) -> CodecGateResult<DecoderHandle> {
        let result = self.inner.resolver.resolve_audio_decoder(descriptor);
        log_outcome("audio", descriptor, &result);
        result
    }

    /// Resolve a decoder for a video stream
    ///
    /// See [`DecoderResolver::resolve_video_decoder`].
    pub fn resolve_video_decoder(
        &self,
        descriptor: &StreamDescriptor,
        output_surface: Option<SurfaceHandle>,
        tone_mapping_requested: bool,
    ) -> CodecGateResult<DecoderHandle> {
        let result = self.inner.resolver.resolve_video_decoder(
            descriptor,
            output_surface,
            tone_mapping_requested,
        );
        log_outcome("video", descriptor, &result);
        result
    }
}

fn log_outcome(
    track: &str,
    descriptor: &StreamDescriptor,
    result: &CodecGateResult<DecoderHandle>,
) {
    let mime_type = descriptor.mime_type().unwrap_or("<none>");
    match result {
        Ok(handle) => tracing::debug!(
            handle = %handle.id(),
            codec = handle.codec_name(),
            mime = mime_type,
            "Resolved {} decoder",
            track
        ),
        Err(e) => tracing::warn!(
            code = %e.error_code(),
            mime = mime_type,
            "Failed to resolve {} decoder: {}",
            track,
            e
        ),
    }
}
