//! Decoder construction and the handle returned to callers
//!
//! Constructing the platform decoder is delegated to a [`DecoderFactory`].
//! The resolver calls it once per successful resolution and hands the
//! instance back inside a [`DecoderHandle`]; from then on the caller owns it.

use codecgate_core::{DecodeConfiguration, StreamDescriptor};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Render target a video decoder writes into
pub trait OutputSurface: Send + Sync + std::fmt::Debug {
    /// Identifier of the underlying surface
    fn surface_id(&self) -> u64;
}

/// Shared reference to a caller-owned output surface
pub type SurfaceHandle = Arc<dyn OutputSurface>;

/// Error raised by a decoder factory or instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The factory could not configure the named decoder
    #[error("Failed to configure {codec}: {reason}")]
    ConfigurationRejected {
        /// Codec name
        codec: String,
        /// Failure reason
        reason: String,
    },

    /// The decoder was already released
    #[error("Decoder {codec} already released")]
    AlreadyReleased {
        /// Codec name
        codec: String,
    },
}

/// Everything a factory needs to construct one decoder
#[derive(Debug, Clone, Copy)]
pub struct DecoderRequest<'a> {
    /// Stream being decoded
    pub descriptor: &'a StreamDescriptor,
    /// Configuration the decoder must accept
    pub configuration: &'a DecodeConfiguration,
    /// Concrete codec chosen by the capability query
    pub codec_name: &'a str,
    /// Always true for decoders built by the resolver
    pub is_decoder: bool,
    /// Surface to render into, if any
    pub output_surface: Option<&'a SurfaceHandle>,
}

/// A constructed decoder; its runtime behaviour belongs to the implementation
pub trait DecoderInstance: Send + std::fmt::Debug {
    /// Codec name the instance was created for
    fn name(&self) -> &str;

    /// Whether this is a decoder (as opposed to an encoder)
    fn is_decoder(&self) -> bool;

    /// Release underlying resources
    fn release(&mut self) -> Result<(), ConstructionError>;
}

/// Builds decoder instances
pub trait DecoderFactory: Send + Sync + std::fmt::Debug {
    /// Construct a decoder for `request`
    fn construct(
        &self,
        request: DecoderRequest<'_>,
    ) -> Result<Box<dyn DecoderInstance>, ConstructionError>;
}

/// Lifecycle state of a [`ConfiguredDecoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Configured and ready to be started by its owner
    Configured,
    /// Resources released
    Released,
}

/// Decoder that records its configuration and surface binding
#[derive(Debug)]
pub struct ConfiguredDecoder {
    name: String,
    configuration: DecodeConfiguration,
    output_surface: Option<SurfaceHandle>,
    state: DecoderState,
}

impl ConfiguredDecoder {
    /// Configuration the decoder was created with
    pub fn configuration(&self) -> &DecodeConfiguration {
        &self.configuration
    }

    /// Surface the decoder renders into
    pub fn output_surface(&self) -> Option<&SurfaceHandle> {
        self.output_surface.as_ref()
    }

    /// Current lifecycle state
    pub fn state(&self) -> DecoderState {
        self.state
    }
}

impl DecoderInstance for ConfiguredDecoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_decoder(&self) -> bool {
        true
    }

    fn release(&mut self) -> Result<(), ConstructionError> {
        if self.state == DecoderState::Released {
            return Err(ConstructionError::AlreadyReleased {
                codec: self.name.clone(),
            });
        }
        self.output_surface = None;
        self.state = DecoderState::Released;
        Ok(())
    }
}

/// Default factory producing [`ConfiguredDecoder`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredDecoderFactory;

impl DecoderFactory for ConfiguredDecoderFactory {
    fn construct(
        &self,
        request: DecoderRequest<'_>,
    ) -> Result<Box<dyn DecoderInstance>, ConstructionError> {
        if !request.is_decoder {
            return Err(ConstructionError::ConfigurationRejected {
                codec: request.codec_name.to_string(),
                reason: "encoders are not supported".to_string(),
            });
        }
        if request.configuration.mime_type().is_none() {
            return Err(ConstructionError::ConfigurationRejected {
                codec: request.codec_name.to_string(),
                reason: "configuration has no mime type".to_string(),
            });
        }

        Ok(Box::new(ConfiguredDecoder {
            name: request.codec_name.to_string(),
            configuration: request.configuration.clone(),
            output_surface: request.output_surface.cloned(),
            state: DecoderState::Configured,
        }))
    }
}

/// Result of a successful resolution
#[derive(Debug)]
pub struct DecoderHandle {
    id: Uuid,
    codec_name: String,
    descriptor: StreamDescriptor,
    configuration: DecodeConfiguration,
    output_surface: Option<SurfaceHandle>,
    instance: Box<dyn DecoderInstance>,
}

impl DecoderHandle {
    pub(crate) fn new(
        codec_name: String,
        descriptor: StreamDescriptor,
        configuration: DecodeConfiguration,
        output_surface: Option<SurfaceHandle>,
        instance: Box<dyn DecoderInstance>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            codec_name,
            descriptor,
            configuration,
            output_surface,
            instance,
        }
    }

    /// Unique id for correlating this handle in logs
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Name of the resolved codec
    pub fn codec_name(&self) -> &str {
        &self.codec_name
    }

    /// Descriptor the decoder was built for
    pub fn descriptor(&self) -> &StreamDescriptor {
        &self.descriptor
    }

    /// Configuration used to build the decoder
    pub fn configuration(&self) -> &DecodeConfiguration {
        &self.configuration
    }

    /// Surface bound to the decoder, if any
    pub fn output_surface(&self) -> Option<&SurfaceHandle> {
        self.output_surface.as_ref()
    }

    /// The constructed decoder
    pub fn instance(&self) -> &dyn DecoderInstance {
        self.instance.as_ref()
    }

    /// Mutable access to the constructed decoder
    pub fn instance_mut(&mut self) -> &mut dyn DecoderInstance {
        self.instance.as_mut()
    }

    /// Take ownership of the constructed decoder
    pub fn into_instance(self) -> Box<dyn DecoderInstance> {
        self.instance
    }

    /// Release the decoder and drop the surface binding
    pub fn release(mut self) -> Result<(), ConstructionError> {
        self.output_surface = None;
        self.instance.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codecgate_core::mime;

    #[derive(Debug)]
    struct TestSurface(u64);

    impl OutputSurface for TestSurface {
        fn surface_id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_configured_decoder_lifecycle() {
        let descriptor = StreamDescriptor::video(mime::VIDEO_H264, 1280, 720);
        let configuration = DecodeConfiguration::create_video(mime::VIDEO_H264, 1280, 720);
        let surface: SurfaceHandle = Arc::new(TestSurface(7));

        let mut decoder = ConfiguredDecoderFactory
            .construct(DecoderRequest {
                descriptor: &descriptor,
                configuration: &configuration,
                codec_name: "c2.android.avc.decoder",
                is_decoder: true,
                output_surface: Some(&surface),
            })
            .unwrap();

        assert_eq!(decoder.name(), "c2.android.avc.decoder");
        assert!(decoder.is_decoder());
        // Factory holds a second reference to the caller's surface
        assert_eq!(Arc::strong_count(&surface), 2);

        decoder.release().unwrap();
        assert_eq!(Arc::strong_count(&surface), 1);
        assert_eq!(
            decoder.release(),
            Err(ConstructionError::AlreadyReleased {
                codec: "c2.android.avc.decoder".to_string(),
            })
        );
    }

    #[test]
    fn test_factory_rejects_encoder_requests() {
        let descriptor = StreamDescriptor::audio(mime::AUDIO_OPUS, 48_000, 2);
        let configuration = DecodeConfiguration::create_audio(mime::AUDIO_OPUS, 48_000, 2);

        let result = ConfiguredDecoderFactory.construct(DecoderRequest {
            descriptor: &descriptor,
            configuration: &configuration,
            codec_name: "c2.android.opus.encoder",
            is_decoder: false,
            output_surface: None,
        });
        assert!(matches!(
            result,
            Err(ConstructionError::ConfigurationRejected { .. })
        ));
    }

    #[test]
    fn test_handle_release() {
        let descriptor = StreamDescriptor::audio(mime::AUDIO_OPUS, 48_000, 2);
        let configuration = DecodeConfiguration::create_audio(mime::AUDIO_OPUS, 48_000, 2);
        let instance = ConfiguredDecoderFactory
            .construct(DecoderRequest {
                descriptor: &descriptor,
                configuration: &configuration,
                codec_name: "c2.android.opus.decoder",
                is_decoder: true,
                output_surface: None,
            })
            .unwrap();

        let handle = DecoderHandle::new(
            "c2.android.opus.decoder".to_string(),
            descriptor.clone(),
            configuration,
            None,
            instance,
        );
        assert_eq!(handle.codec_name(), "c2.android.opus.decoder");
        assert_eq!(handle.descriptor(), &descriptor);
        assert!(handle.output_surface().is_none());
        assert!(handle.release().is_ok());
    }
}
