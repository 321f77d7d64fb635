//! Device profile and known-defect table
//!
//! The [`DeviceProfile`] is derived once from the platform build identifiers
//! and shared read-only by every resolution call. Devices whose decoders are
//! known to mishandle HDR to SDR tone-mapping are listed in a [`QuirkTable`];
//! the platform exposes no queryable signal for that defect.

use serde::{Deserialize, Serialize};

/// Minimum OS API level for suppressing decoder frame drops
pub const FRAME_DROP_SUPPRESSION_MIN_API: u32 = 29;
/// Minimum OS API level for decoding HDR content
pub const HDR_DECODING_MIN_API: u32 = 29;
/// Minimum OS API level for in-decoder HDR to SDR tone-mapping
pub const TONE_MAPPING_MIN_API: u32 = 31;

/// Platform build identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// OS API level the process runs on
    pub api_level: u32,
    /// API level the host application declares as its target
    pub target_api_level: u32,
    /// Device manufacturer, e.g. `Google`
    pub manufacturer: String,
    /// Build identifier, e.g. `TP1A.220624.014`
    pub build_id: String,
}

impl Default for PlatformInfo {
    fn default() -> Self {
        Self {
            api_level: TONE_MAPPING_MIN_API,
            target_api_level: TONE_MAPPING_MIN_API,
            manufacturer: "unknown".to_string(),
            build_id: "unknown".to_string(),
        }
    }
}

/// One known-defective device signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuirk {
    /// Exact manufacturer string
    pub manufacturer: String,
    /// Build identifier prefix
    pub build_id_prefix: String,
    /// Free-form description of the affected device
    #[serde(default)]
    pub description: Option<String>,
}

impl DeviceQuirk {
    /// Create a quirk entry
    pub fn new(manufacturer: &str, build_id_prefix: &str) -> Self {
        Self {
            manufacturer: manufacturer.to_string(),
            build_id_prefix: build_id_prefix.to_string(),
            description: None,
        }
    }

    /// Attach a description
    pub fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Whether the platform matches this signature
    pub fn matches(&self, platform: &PlatformInfo) -> bool {
        platform.manufacturer == self.manufacturer
            && platform.build_id.starts_with(&self.build_id_prefix)
    }
}

/// Ordered denylist of devices that cannot tone-map HDR while decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirkTable {
    entries: Vec<DeviceQuirk>,
}

impl QuirkTable {
    /// Empty table
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Devices known to mis-handle tone-mapping
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                DeviceQuirk::new("Google", "TP1A").described("Pixel 6"),
                DeviceQuirk::new("Google", "rwd9.220429.053").described("Pixel Watch"),
            ],
        }
    }

    /// Append an entry
    pub fn with_entry(mut self, quirk: DeviceQuirk) -> Self {
        self.entries.push(quirk);
        self
    }

    /// Append entries supplied by the deployment
    pub fn extend<I: IntoIterator<Item = DeviceQuirk>>(&mut self, quirks: I) {
        self.entries.extend(quirks);
    }

    /// Entries in match order
    pub fn entries(&self) -> &[DeviceQuirk] {
        &self.entries
    }

    /// First entry matching the platform
    pub fn find_match(&self, platform: &PlatformInfo) -> Option<&DeviceQuirk> {
        self.entries.iter().find(|quirk| quirk.matches(platform))
    }

    /// Whether any entry matches the platform
    pub fn matches(&self, platform: &PlatformInfo) -> bool {
        self.find_match(platform).is_some()
    }
}

impl Default for QuirkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Read-only, process-wide view of the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    platform: PlatformInfo,
    supports_frame_drop_suppression: bool,
    tone_mapping_quirks: QuirkTable,
}

impl DeviceProfile {
    /// Derive a profile using the built-in quirk table
    pub fn new(platform: PlatformInfo) -> Self {
        Self::with_quirks(platform, QuirkTable::builtin())
    }

    /// Derive a profile with a deployment-supplied quirk table
    pub fn with_quirks(platform: PlatformInfo, tone_mapping_quirks: QuirkTable) -> Self {
        let supports_frame_drop_suppression = platform.api_level
            >= FRAME_DROP_SUPPRESSION_MIN_API
            && platform.target_api_level >= FRAME_DROP_SUPPRESSION_MIN_API;
        Self {
            platform,
            supports_frame_drop_suppression,
            tone_mapping_quirks,
        }
    }

    /// Platform identifiers the profile was derived from
    pub fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    /// OS API level
    pub fn api_level(&self) -> u32 {
        self.platform.api_level
    }

    /// Whether decoders can be told not to drop frames on a full output queue
    pub fn supports_frame_drop_suppression(&self) -> bool {
        self.supports_frame_drop_suppression
    }

    /// Whether the device is a known tone-mapping-defective model
    pub fn needs_no_tone_mapping_workaround(&self) -> bool {
        self.tone_mapping_quirks.matches(&self.platform)
    }

    /// Quirk table consulted for tone-mapping
    pub fn tone_mapping_quirks(&self) -> &QuirkTable {
        &self.tone_mapping_quirks
    }

    /// Whether the platform can decode HDR content
    pub fn supports_hdr_decoding(&self) -> bool {
        self.api_level() >= HDR_DECODING_MIN_API
    }

    /// Whether HDR to SDR tone-mapping may be requested from the decoder
    pub fn supports_tone_mapping(&self) -> bool {
        self.api_level() >= TONE_MAPPING_MIN_API && !self.needs_no_tone_mapping_workaround()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(api_level: u32, target_api_level: u32, manufacturer: &str, build_id: &str) -> PlatformInfo {
        PlatformInfo {
            api_level,
            target_api_level,
            manufacturer: manufacturer.to_string(),
            build_id: build_id.to_string(),
        }
    }

    #[test]
    fn test_frame_drop_suppression_needs_both_levels() {
        assert!(DeviceProfile::new(platform(29, 29, "Acme", "A1")).supports_frame_drop_suppression());
        assert!(DeviceProfile::new(platform(33, 30, "Acme", "A1")).supports_frame_drop_suppression());
        assert!(!DeviceProfile::new(platform(28, 33, "Acme", "A1")).supports_frame_drop_suppression());
        assert!(!DeviceProfile::new(platform(33, 28, "Acme", "A1")).supports_frame_drop_suppression());
    }

    #[test]
    fn test_builtin_quirks_match_exact_signatures() {
        let pixel_6 = DeviceProfile::new(platform(32, 32, "Google", "TP1A.220624.014"));
        assert!(pixel_6.needs_no_tone_mapping_workaround());

        let watch = DeviceProfile::new(platform(30, 30, "Google", "rwd9.220429.053.A1"));
        assert!(watch.needs_no_tone_mapping_workaround());
    }

    #[test]
    fn test_builtin_quirks_reject_near_misses() {
        let cases = [
            ("Google", "TP1B.220624.014"),
            ("Google", "tp1a.220624.014"),
            ("Google", "TP1"),
            ("Google", "XTP1A"),
            ("Google", "rwd9.220429.05"),
            ("Google", "rwd9.220429.054"),
            ("google", "TP1A.220624.014"),
            ("Google Inc", "TP1A.220624.014"),
            ("Samsung", "TP1A.220624.014"),
        ];
        for (manufacturer, build_id) in cases {
            let profile = DeviceProfile::new(platform(32, 32, manufacturer, build_id));
            assert!(
                !profile.needs_no_tone_mapping_workaround(),
                "{} / {} should not match",
                manufacturer,
                build_id
            );
        }
    }

    #[test]
    fn test_deployment_supplied_quirks() {
        let table = QuirkTable::empty().with_entry(DeviceQuirk::new("Acme", "AC7"));
        let profile = DeviceProfile::with_quirks(platform(33, 33, "Acme", "AC7.1"), table);
        assert!(profile.needs_no_tone_mapping_workaround());
        assert!(!profile.supports_tone_mapping());

        let pixel = DeviceProfile::with_quirks(
            platform(33, 33, "Google", "TP1A.1"),
            QuirkTable::empty(),
        );
        assert!(!pixel.needs_no_tone_mapping_workaround());
    }

    #[test]
    fn test_find_match_returns_first_entry() {
        let table = QuirkTable::builtin()
            .with_entry(DeviceQuirk::new("Google", "TP").described("broader"));
        let hit = table
            .find_match(&platform(32, 32, "Google", "TP1A.1"))
            .unwrap();
        assert_eq!(hit.description.as_deref(), Some("Pixel 6"));
    }

    #[test]
    fn test_capability_helpers() {
        let old = DeviceProfile::new(platform(28, 28, "Acme", "A1"));
        assert!(!old.supports_hdr_decoding());
        assert!(!old.supports_tone_mapping());

        let current = DeviceProfile::new(platform(31, 31, "Acme", "A1"));
        assert!(current.supports_hdr_decoding());
        assert!(current.supports_tone_mapping());
    }
}
