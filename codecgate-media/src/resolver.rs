//! Decoder resolution
//!
//! [`DecoderResolver`] turns a [`StreamDescriptor`] into a [`DecoderHandle`]:
//! it gates HDR content on platform support, builds the decode
//! configuration, asks the capability query for a decoder and has the
//! factory construct it. Every call is synchronous, performs at most one
//! capability query and returns failures as values without retrying.

use crate::capability::{CapabilityQuery, CodecCatalog};
use crate::decoder::{
    ConfiguredDecoderFactory, DecoderFactory, DecoderHandle, DecoderRequest, SurfaceHandle,
};
use crate::device::{DeviceProfile, HDR_DECODING_MIN_API, TONE_MAPPING_MIN_API};
use crate::profile::{CodecStringLookup, ProfileLevelLookup};
use codecgate_core::{
    keys, CodecGateResult, ColorTransfer, ContractViolation, DecodeConfiguration, FailureCode,
    ResolutionFailure, StreamDescriptor,
};
use std::sync::Arc;

/// Resolves descriptors to constructed decoders
#[derive(Debug, Clone)]
pub struct DecoderResolver {
    device: Arc<DeviceProfile>,
    capabilities: Arc<dyn CapabilityQuery>,
    profiles: Arc<dyn ProfileLevelLookup>,
    factory: Arc<dyn DecoderFactory>,
}

impl DecoderResolver {
    /// Resolver with the default catalog, codecs-string lookup and factory
    pub fn new(device: DeviceProfile) -> Self {
        Self::builder(device).build()
    }

    /// Start building a resolver around a device profile
    pub fn builder(device: DeviceProfile) -> DecoderResolverBuilder {
        DecoderResolverBuilder::new(Arc::new(device))
    }

    /// Device profile shared by all calls
    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    /// Resolve a decoder for an audio stream
    pub fn resolve_audio_decoder(
        &self,
        descriptor: &StreamDescriptor,
    ) -> CodecGateResult<DecoderHandle> {
        let configuration = self.build_audio_configuration(descriptor)?;
        self.instantiate(descriptor, configuration, None)
    }

    /// Resolve a decoder for a video stream
    ///
    /// `output_surface` is passed through to the decoder; the caller keeps
    /// ownership of it. With `tone_mapping_requested`, HDR content is
    /// converted to SDR during decode, or resolution fails with
    /// [`FailureCode::ToneMappingUnsupported`] where that is not possible.
    pub fn resolve_video_decoder(
        &self,
        descriptor: &StreamDescriptor,
        output_surface: Option<SurfaceHandle>,
        tone_mapping_requested: bool,
    ) -> CodecGateResult<DecoderHandle> {
        let configuration = self.build_video_configuration(descriptor, tone_mapping_requested)?;
        self.instantiate(descriptor, configuration, output_surface)
    }

    /// Build the audio decode configuration without querying for a decoder
    pub fn build_audio_configuration(
        &self,
        descriptor: &StreamDescriptor,
    ) -> CodecGateResult<DecodeConfiguration> {
        let mime_type = require_mime_type(descriptor)?;
        let sample_rate = require(descriptor.sample_rate, "sample_rate")?;
        let channel_count = require(descriptor.channel_count, "channel_count")?;

        let mut configuration =
            DecodeConfiguration::create_audio(mime_type, sample_rate, channel_count);
        configuration.maybe_set_integer(keys::MAX_INPUT_SIZE, descriptor.max_input_size);
        configuration.set_csd_buffers(&descriptor.initialization_data);
        Ok(configuration)
    }

    /// Apply HDR gating and build the video decode configuration without
    /// querying for a decoder
    pub fn build_video_configuration(
        &self,
        descriptor: &StreamDescriptor,
        tone_mapping_requested: bool,
    ) -> CodecGateResult<DecodeConfiguration> {
        let mime_type = require_mime_type(descriptor)?;
        let width = require(descriptor.width, "width")?;
        let height = require(descriptor.height, "height")?;

        self.check_hdr_support(descriptor, tone_mapping_requested)?;

        let mut configuration = DecodeConfiguration::create_video(mime_type, width, height);
        configuration.maybe_set_integer(
            keys::ROTATION,
            descriptor.rotation_degrees.filter(|&degrees| degrees != 0),
        );
        configuration.maybe_set_integer(keys::MAX_INPUT_SIZE, descriptor.max_input_size);
        configuration.set_csd_buffers(&descriptor.initialization_data);
        configuration.maybe_set_color_info(descriptor.color_info.as_ref());
        if self.device.supports_frame_drop_suppression() {
            // Keep every frame when the output surface is full so the
            // consumer paces decoding instead of losing frames.
            configuration.set_integer(keys::ALLOW_FRAME_DROP, 0);
        }
        if self.device.api_level() >= TONE_MAPPING_MIN_API && tone_mapping_requested {
            configuration.set_integer(
                keys::COLOR_TRANSFER_REQUEST,
                ColorTransfer::Sdr.platform_value(),
            );
        }
        if let Some(profile_level) = self.profiles.profile_and_level(descriptor) {
            configuration.set_integer(keys::PROFILE, profile_level.profile);
        }
        Ok(configuration)
    }

    /// HDR gating for a video descriptor.
    ///
    /// Tone-mapping is checked before HDR decoding support so each reason
    /// keeps its own failure code.
    pub fn check_hdr_support(
        &self,
        descriptor: &StreamDescriptor,
        tone_mapping_requested: bool,
    ) -> Result<(), ResolutionFailure> {
        if !descriptor.is_transfer_hdr() {
            return Ok(());
        }
        if tone_mapping_requested
            && (self.device.api_level() < TONE_MAPPING_MIN_API
                || self.device.needs_no_tone_mapping_workaround())
        {
            return Err(ResolutionFailure::new(
                FailureCode::ToneMappingUnsupported,
                descriptor,
            ));
        }
        if self.device.api_level() < HDR_DECODING_MIN_API {
            return Err(ResolutionFailure::new(
                FailureCode::HdrDecodingUnsupported,
                descriptor,
            ));
        }
        Ok(())
    }

    fn instantiate(
        &self,
        descriptor: &StreamDescriptor,
        configuration: DecodeConfiguration,
        output_surface: Option<SurfaceHandle>,
    ) -> CodecGateResult<DecoderHandle> {
        let codec_name = self
            .capabilities
            .find_codec(&configuration, true)
            .ok_or_else(|| {
                ResolutionFailure::new(FailureCode::DecodingFormatUnsupported, descriptor)
            })?;

        let instance = self
            .factory
            .construct(DecoderRequest {
                descriptor,
                configuration: &configuration,
                codec_name: &codec_name,
                is_decoder: true,
                output_surface: output_surface.as_ref(),
            })
            .map_err(|e| {
                ResolutionFailure::with_reason(
                    FailureCode::DecoderInitFailed,
                    descriptor,
                    e.to_string(),
                )
            })?;

        Ok(DecoderHandle::new(
            codec_name,
            descriptor.clone(),
            configuration,
            output_surface,
            instance,
        ))
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ContractViolation> {
    value.ok_or(ContractViolation::MissingField { field })
}

// A blank mime type counts as missing.
fn require_mime_type(descriptor: &StreamDescriptor) -> Result<&str, ContractViolation> {
    require(
        descriptor
            .mime_type()
            .filter(|mime_type| !mime_type.trim().is_empty()),
        "sample_mime_type",
    )
}

/// Builder for [`DecoderResolver`]
#[derive(Debug)]
pub struct DecoderResolverBuilder {
    device: Arc<DeviceProfile>,
    capabilities: Option<Arc<dyn CapabilityQuery>>,
    profiles: Option<Arc<dyn ProfileLevelLookup>>,
    factory: Option<Arc<dyn DecoderFactory>>,
}

impl DecoderResolverBuilder {
    /// Builder around an already shared device profile
    pub fn new(device: Arc<DeviceProfile>) -> Self {
        Self {
            device,
            capabilities: None,
            profiles: None,
            factory: None,
        }
    }

    /// Set the capability query
    pub fn capability_query(mut self, capabilities: Arc<dyn CapabilityQuery>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Set the profile/level lookup
    pub fn profile_lookup(mut self, profiles: Arc<dyn ProfileLevelLookup>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Set the decoder factory
    pub fn decoder_factory(mut self, factory: Arc<dyn DecoderFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Build the resolver, filling unset collaborators with defaults
    pub fn build(self) -> DecoderResolver {
        DecoderResolver {
            device: self.device,
            capabilities: self.capabilities.unwrap_or_else(|| {
                Arc::new(CodecCatalog::with_defaults()) as Arc<dyn CapabilityQuery>
            }),
            profiles: self
                .profiles
                .unwrap_or_else(|| Arc::new(CodecStringLookup) as Arc<dyn ProfileLevelLookup>),
            factory: self
                .factory
                .unwrap_or_else(|| Arc::new(ConfiguredDecoderFactory) as Arc<dyn DecoderFactory>),
        }
    }
}
