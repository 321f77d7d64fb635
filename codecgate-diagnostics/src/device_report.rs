//! Snapshot of device profile decisions for bug reports

use codecgate_core::{CodecGateError, CodecGateResult};
use codecgate_media::{DeviceProfile, DeviceQuirk, PlatformInfo};
use serde::{Deserialize, Serialize};

/// Derived decisions of a [`DeviceProfile`] in serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceReport {
    /// Platform identifiers
    pub platform: PlatformInfo,
    /// Decoders are configured to keep frames when the output queue is full
    pub supports_frame_drop_suppression: bool,
    /// HDR streams pass the platform gate
    pub hdr_decoding_allowed: bool,
    /// HDR to SDR tone-mapping requests pass the platform gate
    pub tone_mapping_allowed: bool,
    /// Quirk entry the device matched, if any
    pub matched_quirk: Option<DeviceQuirk>,
    /// Number of entries in the quirk table consulted
    pub quirk_table_size: usize,
}

impl DeviceReport {
    /// Capture the current decisions of `profile`
    pub fn from_profile(profile: &DeviceProfile) -> Self {
        let quirks = profile.tone_mapping_quirks();
        Self {
            platform: profile.platform().clone(),
            supports_frame_drop_suppression: profile.supports_frame_drop_suppression(),
            hdr_decoding_allowed: profile.supports_hdr_decoding(),
            tone_mapping_allowed: profile.supports_tone_mapping(),
            matched_quirk: quirks.find_match(profile.platform()).cloned(),
            quirk_table_size: quirks.entries().len(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> CodecGateResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecGateError::Configuration {
            reason: format!("Failed to serialize device report: {}", e),
        })
    }

    /// One-line summary suitable for a log field
    pub fn summary(&self) -> String {
        format!(
            "{} {} api={} target={} frame_drop_suppression={} hdr={} tone_mapping={}",
            self.platform.manufacturer,
            self.platform.build_id,
            self.platform.api_level,
            self.platform.target_api_level,
            self.supports_frame_drop_suppression,
            self.hdr_decoding_allowed,
            self.tone_mapping_allowed,
        )
    }
}

impl From<&DeviceProfile> for DeviceReport {
    fn from(profile: &DeviceProfile) -> Self {
        Self::from_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(api_level: u32, manufacturer: &str, build_id: &str) -> PlatformInfo {
        PlatformInfo {
            api_level,
            target_api_level: api_level,
            manufacturer: manufacturer.to_string(),
            build_id: build_id.to_string(),
        }
    }

    #[test]
    fn test_report_for_defective_device() {
        let profile = DeviceProfile::new(platform(33, "Google", "TP1A.220905.004"));
        let report = DeviceReport::from_profile(&profile);

        assert!(report.supports_frame_drop_suppression);
        assert!(report.hdr_decoding_allowed);
        assert!(!report.tone_mapping_allowed);
        let quirk = report.matched_quirk.unwrap();
        assert_eq!(quirk.manufacturer, "Google");
        assert_eq!(quirk.build_id_prefix, "TP1A");
        assert_eq!(report.quirk_table_size, 2);
    }

    #[test]
    fn test_report_for_old_device() {
        let report: DeviceReport = (&DeviceProfile::new(platform(28, "Acme", "A1"))).into();
        assert!(!report.supports_frame_drop_suppression);
        assert!(!report.hdr_decoding_allowed);
        assert!(!report.tone_mapping_allowed);
        assert!(report.matched_quirk.is_none());
        assert!(report.summary().contains("api=28"));
    }

    #[test]
    fn test_report_json() {
        let report = DeviceReport::from_profile(&DeviceProfile::new(platform(31, "Acme", "A1")));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"tone_mapping_allowed\": true"));

        let parsed: DeviceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
