//! Codec capability lookup
//!
//! [`CapabilityQuery`] is the seam to whatever enumerates the platform's
//! codecs. [`CodecCatalog`] is an in-memory implementation driven by a list
//! of [`CodecCapabilities`] entries, usable as the production lookup when the
//! codec list is known ahead of time and as a fixture in tests.

use codecgate_core::{keys, mime, ColorTransfer, DecodeConfiguration};
use serde::{Deserialize, Serialize};

/// Finds a concrete codec able to handle a configuration
pub trait CapabilityQuery: Send + Sync + std::fmt::Debug {
    /// Name of a codec supporting `configuration`, or `None`
    fn find_codec(&self, configuration: &DecodeConfiguration, is_decoder: bool) -> Option<String>;
}

/// What one codec implementation supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCapabilities {
    /// Codec implementation name, e.g. `c2.android.hevc.decoder`
    pub name: String,
    /// Whether this is an encoder rather than a decoder
    #[serde(default)]
    pub is_encoder: bool,
    /// Mime types handled
    pub mime_types: Vec<String>,
    /// Largest supported width
    #[serde(default)]
    pub max_width: Option<u32>,
    /// Largest supported height
    #[serde(default)]
    pub max_height: Option<u32>,
    /// Supported profiles; empty means any
    #[serde(default)]
    pub profiles: Vec<u32>,
    /// Supported sample rates; empty means any
    #[serde(default)]
    pub sample_rates: Vec<u32>,
    /// Largest supported channel count
    #[serde(default)]
    pub max_channel_count: Option<u32>,
    /// Whether HDR to SDR tone-mapping can be requested
    #[serde(default)]
    pub supports_tone_mapping: bool,
}

impl CodecCapabilities {
    /// Decoder entry handling a single mime type
    pub fn decoder(name: &str, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            is_encoder: false,
            mime_types: vec![mime_type.to_string()],
            max_width: None,
            max_height: None,
            profiles: Vec::new(),
            sample_rates: Vec::new(),
            max_channel_count: None,
            supports_tone_mapping: false,
        }
    }

    /// Encoder entry handling a single mime type
    pub fn encoder(name: &str, mime_type: &str) -> Self {
        Self {
            is_encoder: true,
            ..Self::decoder(name, mime_type)
        }
    }

    /// Set the largest supported resolution
    pub fn max_resolution(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    /// Set supported profiles
    pub fn profiles(mut self, profiles: &[u32]) -> Self {
        self.profiles = profiles.to_vec();
        self
    }

    /// Set supported sample rates
    pub fn sample_rates(mut self, sample_rates: &[u32]) -> Self {
        self.sample_rates = sample_rates.to_vec();
        self
    }

    /// Set the largest supported channel count
    pub fn max_channel_count(mut self, channels: u32) -> Self {
        self.max_channel_count = Some(channels);
        self
    }

    /// Mark the codec as able to tone-map HDR to SDR
    pub fn tone_mapping(mut self) -> Self {
        self.supports_tone_mapping = true;
        self
    }

    /// Whether the codec handles `mime_type`
    pub fn supports_mime_type(&self, mime_type: &str) -> bool {
        self.mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type))
    }

    /// Whether every constraint set in `configuration` is within this codec's limits
    pub fn is_format_supported(&self, configuration: &DecodeConfiguration) -> bool {
        let Some(mime_type) = configuration.mime_type() else {
            return false;
        };
        if !self.supports_mime_type(mime_type) {
            return false;
        }

        if mime::is_video(mime_type) {
            if exceeds(configuration.get_integer(keys::WIDTH), self.max_width)
                || exceeds(configuration.get_integer(keys::HEIGHT), self.max_height)
            {
                return false;
            }
            if let Some(profile) = configuration.get_integer(keys::PROFILE) {
                if !self.profiles.is_empty() && !self.profiles.contains(&profile) {
                    return false;
                }
            }
            // For SDR content the transfer request is only a hint.
            if configuration.contains_key(keys::COLOR_TRANSFER_REQUEST)
                && has_hdr_transfer(configuration)
                && !self.supports_tone_mapping
            {
                return false;
            }
        }

        if mime::is_audio(mime_type) {
            if let Some(rate) = configuration.get_integer(keys::SAMPLE_RATE) {
                if !self.sample_rates.is_empty() && !self.sample_rates.contains(&rate) {
                    return false;
                }
            }
            if exceeds(
                configuration.get_integer(keys::CHANNEL_COUNT),
                self.max_channel_count,
            ) {
                return false;
            }
        }

        true
    }
}

fn has_hdr_transfer(configuration: &DecodeConfiguration) -> bool {
    configuration
        .get_integer(keys::COLOR_TRANSFER)
        .and_then(ColorTransfer::from_platform_value)
        .is_some_and(ColorTransfer::is_hdr)
}

fn exceeds(value: Option<u32>, limit: Option<u32>) -> bool {
    matches!((value, limit), (Some(value), Some(limit)) if value > limit)
}

/// In-memory codec list, searched in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCatalog {
    codecs: Vec<CodecCapabilities>,
}

impl CodecCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Catalog of the software codecs every device ships
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        // Audio decoders
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.aac.decoder", mime::AUDIO_AAC)
                .max_channel_count(8),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.opus.decoder", mime::AUDIO_OPUS)
                .sample_rates(&[8_000, 12_000, 16_000, 24_000, 48_000])
                .max_channel_count(8),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.vorbis.decoder", mime::AUDIO_VORBIS)
                .max_channel_count(8),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.flac.decoder", mime::AUDIO_FLAC)
                .max_channel_count(8),
        );

        // Video decoders
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.avc.decoder", mime::VIDEO_H264)
                .max_resolution(4096, 4096),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.hevc.decoder", mime::VIDEO_H265)
                .max_resolution(4096, 4096)
                .tone_mapping(),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.vp8.decoder", mime::VIDEO_VP8)
                .max_resolution(2048, 2048),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.vp9.decoder", mime::VIDEO_VP9)
                .max_resolution(4096, 4096)
                .tone_mapping(),
        );
        catalog.register_codec(
            CodecCapabilities::decoder("c2.android.av1.decoder", mime::VIDEO_AV1)
                .max_resolution(4096, 4096)
                .tone_mapping(),
        );

        catalog
    }

    /// Register a codec; later registrations are searched after earlier ones
    pub fn register_codec(&mut self, codec: CodecCapabilities) {
        self.codecs.push(codec);
    }

    /// Get a codec by name
    pub fn get_codec(&self, name: &str) -> Option<&CodecCapabilities> {
        self.codecs.iter().find(|codec| codec.name == name)
    }

    /// List codec names in search order
    pub fn list_codecs(&self) -> Vec<String> {
        self.codecs.iter().map(|codec| codec.name.clone()).collect()
    }

    /// All codecs handling `mime_type`
    pub fn codecs_for_mime_type(&self, mime_type: &str) -> Vec<&CodecCapabilities> {
        self.codecs
            .iter()
            .filter(|codec| codec.supports_mime_type(mime_type))
            .collect()
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no codecs are registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl FromIterator<CodecCapabilities> for CodecCatalog {
    fn from_iter<I: IntoIterator<Item = CodecCapabilities>>(iter: I) -> Self {
        Self {
            codecs: iter.into_iter().collect(),
        }
    }
}

impl CapabilityQuery for CodecCatalog {
    fn find_codec(&self, configuration: &DecodeConfiguration, is_decoder: bool) -> Option<String> {
        self.codecs
            .iter()
            .filter(|codec| codec.is_encoder != is_decoder)
            .find(|codec| codec.is_format_supported(configuration))
            .map(|codec| codec.name.clone())
    }
}
