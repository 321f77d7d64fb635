//! Platform decode configuration
//!
//! [`DecodeConfiguration`] is the key/value form a platform decoder is
//! configured with. Keys are kept sorted so two configurations built from the
//! same inputs compare and serialize identically.

use crate::descriptor::ColorInfo;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known configuration keys
pub mod keys {
    /// Sample mime type
    pub const MIME: &str = "mime";
    /// Audio sample rate in Hz
    pub const SAMPLE_RATE: &str = "sample-rate";
    /// Audio channel count
    pub const CHANNEL_COUNT: &str = "channel-count";
    /// Video width
    pub const WIDTH: &str = "width";
    /// Video height
    pub const HEIGHT: &str = "height";
    /// Rotation hint in degrees
    pub const ROTATION: &str = "rotation-degrees";
    /// Maximum input buffer size
    pub const MAX_INPUT_SIZE: &str = "max-input-size";
    /// Color standard
    pub const COLOR_STANDARD: &str = "color-standard";
    /// Color range
    pub const COLOR_RANGE: &str = "color-range";
    /// Color transfer
    pub const COLOR_TRANSFER: &str = "color-transfer";
    /// HDR static metadata blob
    pub const HDR_STATIC_INFO: &str = "hdr-static-info";
    /// Whether the decoder may drop frames when its output is full
    pub const ALLOW_FRAME_DROP: &str = "allow-frame-drop";
    /// Requested output transfer function
    pub const COLOR_TRANSFER_REQUEST: &str = "color-transfer-request";
    /// Codec profile
    pub const PROFILE: &str = "profile";

    /// Key for the codec-specific data blob at `index`
    pub fn csd(index: usize) -> String {
        format!("csd-{}", index)
    }
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatValue {
    /// Integer value
    Integer(u32),
    /// String value
    String(String),
    /// Byte buffer value
    Bytes(Bytes),
}

/// Decode configuration in platform key/value form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfiguration {
    entries: BTreeMap<String, FormatValue>,
}

impl DecodeConfiguration {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration seeded with mime type, sample rate and channel count
    pub fn create_audio(mime_type: &str, sample_rate: u32, channel_count: u32) -> Self {
        let mut configuration = Self::new();
        configuration.set_string(keys::MIME, mime_type);
        configuration.set_integer(keys::SAMPLE_RATE, sample_rate);
        configuration.set_integer(keys::CHANNEL_COUNT, channel_count);
        configuration
    }

    /// Configuration seeded with mime type, width and height
    pub fn create_video(mime_type: &str, width: u32, height: u32) -> Self {
        let mut configuration = Self::new();
        configuration.set_string(keys::MIME, mime_type);
        configuration.set_integer(keys::WIDTH, width);
        configuration.set_integer(keys::HEIGHT, height);
        configuration
    }

    /// Set an integer value
    pub fn set_integer(&mut self, key: &str, value: u32) {
        self.entries
            .insert(key.to_string(), FormatValue::Integer(value));
    }

    /// Set an integer value only when one is given
    pub fn maybe_set_integer(&mut self, key: &str, value: Option<u32>) {
        if let Some(value) = value {
            self.set_integer(key, value);
        }
    }

    /// Set a string value
    pub fn set_string(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), FormatValue::String(value.to_string()));
    }

    /// Set a byte buffer value
    pub fn set_bytes(&mut self, key: &str, value: Bytes) {
        self.entries.insert(key.to_string(), FormatValue::Bytes(value));
    }

    /// Store codec-specific data as `csd-0`, `csd-1`, ... in the given order
    pub fn set_csd_buffers(&mut self, buffers: &[Bytes]) {
        for (index, buffer) in buffers.iter().enumerate() {
            self.set_bytes(&keys::csd(index), buffer.clone());
        }
    }

    /// Translate color metadata, writing only the attributes that are present
    pub fn maybe_set_color_info(&mut self, color_info: Option<&ColorInfo>) {
        let Some(color_info) = color_info else {
            return;
        };
        self.maybe_set_integer(
            keys::COLOR_STANDARD,
            color_info.color_space.map(|s| s.platform_value()),
        );
        self.maybe_set_integer(
            keys::COLOR_RANGE,
            color_info.color_range.map(|r| r.platform_value()),
        );
        self.maybe_set_integer(
            keys::COLOR_TRANSFER,
            color_info.color_transfer.map(|t| t.platform_value()),
        );
        if let Some(info) = &color_info.hdr_static_info {
            self.set_bytes(keys::HDR_STATIC_INFO, info.clone());
        }
    }

    /// Integer value for `key`
    pub fn get_integer(&self, key: &str) -> Option<u32> {
        match self.entries.get(key) {
            Some(FormatValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// String value for `key`
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(FormatValue::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Byte buffer value for `key`
    pub fn get_bytes(&self, key: &str) -> Option<&Bytes> {
        match self.entries.get(key) {
            Some(FormatValue::Bytes(value)) => Some(value),
            _ => None,
        }
    }

    /// Raw value for `key`
    pub fn get(&self, key: &str) -> Option<&FormatValue> {
        self.entries.get(key)
    }

    /// Whether `key` is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<FormatValue> {
        self.entries.remove(key)
    }

    /// Mime type of the configuration
    pub fn mime_type(&self) -> Option<&str> {
        self.get_string(keys::MIME)
    }

    /// Codec-specific data buffers in index order, stopping at the first gap
    pub fn csd_buffers(&self) -> Vec<Bytes> {
        (0..)
            .map_while(|index| self.get_bytes(&keys::csd(index)).cloned())
            .collect()
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
