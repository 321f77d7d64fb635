//! Stream descriptors and color metadata
//!
//! A [`StreamDescriptor`] is what a container parser hands over for one
//! elementary stream. Every optional attribute is an `Option`; nothing uses
//! sentinel values.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Color transfer characteristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTransfer {
    /// Linear transfer
    Linear,
    /// SMPTE 170M / BT.709 style SDR video transfer
    Sdr,
    /// SMPTE ST 2084 (PQ), used by HDR10 and HDR10+
    St2084,
    /// ARIB STD-B67 hybrid log-gamma
    Hlg,
    /// Gamma 2.2
    Gamma22,
}

impl ColorTransfer {
    /// Platform constant for this transfer function
    pub fn platform_value(self) -> u32 {
        match self {
            ColorTransfer::Linear => 1,
            ColorTransfer::Sdr => 3,
            ColorTransfer::St2084 => 6,
            ColorTransfer::Hlg => 7,
            ColorTransfer::Gamma22 => 10,
        }
    }

    /// Transfer function for a platform constant
    pub fn from_platform_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(ColorTransfer::Linear),
            3 => Some(ColorTransfer::Sdr),
            6 => Some(ColorTransfer::St2084),
            7 => Some(ColorTransfer::Hlg),
            10 => Some(ColorTransfer::Gamma22),
            _ => None,
        }
    }

    /// Whether this transfer function carries high dynamic range content
    pub fn is_hdr(self) -> bool {
        matches!(self, ColorTransfer::St2084 | ColorTransfer::Hlg)
    }
}

/// Color primaries / matrix coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    /// ITU-R BT.601
    Bt601,
    /// ITU-R BT.709
    Bt709,
    /// ITU-R BT.2020
    Bt2020,
}

impl ColorSpace {
    /// Platform constant for this color standard
    pub fn platform_value(self) -> u32 {
        match self {
            ColorSpace::Bt709 => 1,
            ColorSpace::Bt601 => 2,
            ColorSpace::Bt2020 => 6,
        }
    }
}

/// Quantization range of the samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRange {
    /// Full range (0-255 for 8 bit)
    Full,
    /// Limited / studio range (16-235 for 8 bit)
    Limited,
}

impl ColorRange {
    /// Platform constant for this range
    pub fn platform_value(self) -> u32 {
        match self {
            ColorRange::Full => 1,
            ColorRange::Limited => 2,
        }
    }
}

/// Color metadata attached to a video stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorInfo {
    /// Color space, if signalled
    pub color_space: Option<ColorSpace>,
    /// Color range, if signalled
    pub color_range: Option<ColorRange>,
    /// Transfer function, if signalled
    pub color_transfer: Option<ColorTransfer>,
    /// HDR static metadata (mastering display + content light level)
    pub hdr_static_info: Option<Bytes>,
}

impl ColorInfo {
    /// BT.2020 limited range PQ, as carried by HDR10 streams
    pub fn hdr10() -> Self {
        Self {
            color_space: Some(ColorSpace::Bt2020),
            color_range: Some(ColorRange::Limited),
            color_transfer: Some(ColorTransfer::St2084),
            hdr_static_info: None,
        }
    }

    /// BT.2020 limited range HLG
    pub fn hlg() -> Self {
        Self {
            color_transfer: Some(ColorTransfer::Hlg),
            ..Self::hdr10()
        }
    }

    /// BT.709 limited range SDR
    pub fn sdr_bt709() -> Self {
        Self {
            color_space: Some(ColorSpace::Bt709),
            color_range: Some(ColorRange::Limited),
            color_transfer: Some(ColorTransfer::Sdr),
            hdr_static_info: None,
        }
    }

    /// Attach HDR static metadata
    pub fn with_hdr_static_info(mut self, info: impl Into<Bytes>) -> Self {
        self.hdr_static_info = Some(info.into());
        self
    }

    /// Whether the transfer function is an HDR one
    pub fn is_transfer_hdr(&self) -> bool {
        self.color_transfer.is_some_and(ColorTransfer::is_hdr)
    }
}

/// Description of one encoded elementary stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Sample mime type, e.g. `video/hevc`
    pub sample_mime_type: Option<String>,
    /// RFC 6381 codecs string, e.g. `hvc1.2.4.L153.B0`
    pub codecs: Option<String>,
    /// Sample rate in Hz (audio)
    pub sample_rate: Option<u32>,
    /// Channel count (audio)
    pub channel_count: Option<u32>,
    /// Width in pixels (video)
    pub width: Option<u32>,
    /// Height in pixels (video)
    pub height: Option<u32>,
    /// Clockwise rotation to apply on display (video)
    pub rotation_degrees: Option<u32>,
    /// Largest sample the demuxer will hand over
    pub max_input_size: Option<u32>,
    /// Codec-specific data, in stream order
    #[serde(default)]
    pub initialization_data: Vec<Bytes>,
    /// Color metadata (video)
    pub color_info: Option<ColorInfo>,
}

impl StreamDescriptor {
    /// Descriptor for an audio stream
    pub fn audio(mime_type: &str, sample_rate: u32, channel_count: u32) -> Self {
        Self {
            sample_mime_type: Some(mime_type.to_string()),
            sample_rate: Some(sample_rate),
            channel_count: Some(channel_count),
            ..Default::default()
        }
    }

    /// Descriptor for a video stream
    pub fn video(mime_type: &str, width: u32, height: u32) -> Self {
        Self {
            sample_mime_type: Some(mime_type.to_string()),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Set the codecs string
    pub fn codecs(mut self, codecs: &str) -> Self {
        self.codecs = Some(codecs.to_string());
        self
    }

    /// Set rotation in degrees
    pub fn rotation_degrees(mut self, degrees: u32) -> Self {
        self.rotation_degrees = Some(degrees);
        self
    }

    /// Set the maximum input sample size
    pub fn max_input_size(mut self, size: u32) -> Self {
        self.max_input_size = Some(size);
        self
    }

    /// Append one codec-specific data blob
    pub fn initialization_data(mut self, data: impl Into<Bytes>) -> Self {
        self.initialization_data.push(data.into());
        self
    }

    /// Set color metadata
    pub fn color_info(mut self, color_info: ColorInfo) -> Self {
        self.color_info = Some(color_info);
        self
    }

    /// Mime type, if present
    pub fn mime_type(&self) -> Option<&str> {
        self.sample_mime_type.as_deref()
    }

    /// Whether the color metadata signals an HDR transfer function
    pub fn is_transfer_hdr(&self) -> bool {
        self.color_info
            .as_ref()
            .is_some_and(ColorInfo::is_transfer_hdr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime;

    #[test]
    fn test_hdr_transfer_detection() {
        assert!(ColorInfo::hdr10().is_transfer_hdr());
        assert!(ColorInfo::hlg().is_transfer_hdr());
        assert!(!ColorInfo::sdr_bt709().is_transfer_hdr());
        assert!(!ColorInfo::default().is_transfer_hdr());

        let linear = ColorInfo {
            color_transfer: Some(ColorTransfer::Linear),
            ..Default::default()
        };
        assert!(!linear.is_transfer_hdr());
    }

    #[test]
    fn test_descriptor_without_color_is_not_hdr() {
        let descriptor = StreamDescriptor::video(mime::VIDEO_H264, 1280, 720);
        assert!(!descriptor.is_transfer_hdr());

        let hdr = descriptor.color_info(ColorInfo::hdr10());
        assert!(hdr.is_transfer_hdr());
    }

    #[test]
    fn test_builder_keeps_initialization_data_order() {
        let descriptor = StreamDescriptor::audio(mime::AUDIO_AAC, 44_100, 2)
            .initialization_data(vec![0x12, 0x10])
            .initialization_data(vec![0x56, 0xE5, 0x00]);

        assert_eq!(descriptor.initialization_data.len(), 2);
        assert_eq!(descriptor.initialization_data[0].as_ref(), &[0x12, 0x10]);
        assert_eq!(descriptor.initialization_data[1].as_ref(), &[0x56, 0xE5, 0x00]);
        assert_eq!(descriptor.mime_type(), Some(mime::AUDIO_AAC));
    }

    #[test]
    fn test_platform_constants() {
        assert_eq!(ColorTransfer::Sdr.platform_value(), 3);
        assert_eq!(ColorTransfer::St2084.platform_value(), 6);
        assert_eq!(ColorTransfer::Hlg.platform_value(), 7);
        assert_eq!(ColorSpace::Bt2020.platform_value(), 6);
        assert_eq!(ColorRange::Limited.platform_value(), 2);
    }

    #[test]
    fn test_descriptor_from_json() {
        let json = r#"{
            "sample_mime_type": "video/hevc",
            "codecs": null,
            "sample_rate": null,
            "channel_count": null,
            "width": 3840,
            "height": 2160,
            "rotation_degrees": 90,
            "max_input_size": null,
            "initialization_data": [],
            "color_info": {
                "color_space": "Bt2020",
                "color_range": "Limited",
                "color_transfer": "Hlg",
                "hdr_static_info": null
            }
        }"#;

        let descriptor: StreamDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.width, Some(3840));
        assert_eq!(descriptor.rotation_degrees, Some(90));
        assert!(descriptor.is_transfer_hdr());
    }
}
