//! # codecgate media
//!
//! Decoder selection for codecgate: the device profile and its known-defect
//! table, codec capability lookup, profile/level derivation, and the
//! [`DecoderResolver`] that ties them together into a constructed decoder.

#![warn(clippy::all)]

pub mod capability;
pub mod decoder;
pub mod device;
pub mod profile;
pub mod resolver;

// Re-export main types
pub use capability::{CapabilityQuery, CodecCapabilities, CodecCatalog};
pub use decoder::{
    ConfiguredDecoder, ConfiguredDecoderFactory, ConstructionError, DecoderFactory,
    DecoderHandle, DecoderInstance, DecoderRequest, DecoderState, OutputSurface, SurfaceHandle,
};
pub use device::{
    DeviceProfile, DeviceQuirk, PlatformInfo, QuirkTable, FRAME_DROP_SUPPRESSION_MIN_API,
    HDR_DECODING_MIN_API, TONE_MAPPING_MIN_API,
};
pub use profile::{CodecStringLookup, ProfileLevel, ProfileLevelLookup};
pub use resolver::{DecoderResolver, DecoderResolverBuilder};
