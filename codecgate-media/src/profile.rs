//! Codec profile and level lookup
//!
//! The resolver only sets a profile on the configuration when the lookup
//! finds one; a missing or unparseable codecs string is not an error.

use codecgate_core::{ColorInfo, ColorTransfer, StreamDescriptor};

/// Codec profile and level as platform constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileLevel {
    /// Platform profile constant
    pub profile: u32,
    /// Platform level constant
    pub level: u32,
}

/// Derives profile and level for a descriptor
pub trait ProfileLevelLookup: Send + Sync + std::fmt::Debug {
    /// Profile and level, if the descriptor carries that information
    fn profile_and_level(&self, descriptor: &StreamDescriptor) -> Option<ProfileLevel>;
}

/// AVC profile constants
pub mod avc {
    /// Baseline profile
    pub const PROFILE_BASELINE: u32 = 0x01;
    /// Main profile
    pub const PROFILE_MAIN: u32 = 0x02;
    /// Extended profile
    pub const PROFILE_EXTENDED: u32 = 0x04;
    /// High profile
    pub const PROFILE_HIGH: u32 = 0x08;
    /// High 10 profile
    pub const PROFILE_HIGH10: u32 = 0x10;
    /// High 4:2:2 profile
    pub const PROFILE_HIGH422: u32 = 0x20;
    /// High 4:4:4 profile
    pub const PROFILE_HIGH444: u32 = 0x40;
}

/// HEVC profile constants
pub mod hevc {
    /// Main profile
    pub const PROFILE_MAIN: u32 = 0x01;
    /// Main 10 profile
    pub const PROFILE_MAIN10: u32 = 0x02;
    /// Main 10 with HDR10 static metadata
    pub const PROFILE_MAIN10_HDR10: u32 = 0x1000;
}

/// VP9 profile constants
pub mod vp9 {
    /// Profile 0, 8-bit 4:2:0
    pub const PROFILE_0: u32 = 0x01;
    /// Profile 1, 8-bit 4:2:2 / 4:4:4
    pub const PROFILE_1: u32 = 0x02;
    /// Profile 2, 10/12-bit 4:2:0
    pub const PROFILE_2: u32 = 0x04;
    /// Profile 3, 10/12-bit 4:2:2 / 4:4:4
    pub const PROFILE_3: u32 = 0x08;
}

/// AV1 profile constants
pub mod av1 {
    /// Main profile, 8-bit
    pub const PROFILE_MAIN8: u32 = 0x1;
    /// Main profile, 10-bit
    pub const PROFILE_MAIN10: u32 = 0x2;
    /// Main profile, 10-bit with HDR10 static metadata
    pub const PROFILE_MAIN10_HDR10: u32 = 0x1000;
}

/// Parses RFC 6381 codecs strings for AVC, HEVC, VP9 and AV1
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecStringLookup;

impl ProfileLevelLookup for CodecStringLookup {
    fn profile_and_level(&self, descriptor: &StreamDescriptor) -> Option<ProfileLevel> {
        let codecs = descriptor.codecs.as_deref()?;
        let parts: Vec<&str> = codecs.split('.').collect();
        match parts.first().copied()? {
            "avc1" | "avc3" => parse_avc(&parts),
            "hev1" | "hvc1" => {
                let transfer = descriptor
                    .color_info
                    .as_ref()
                    .and_then(|info| info.color_transfer);
                parse_hevc(&parts, transfer)
            }
            "vp09" => parse_vp9(&parts),
            "av01" => parse_av1(&parts, descriptor.color_info.as_ref()),
            _ => None,
        }
    }
}

fn parse_avc(parts: &[&str]) -> Option<ProfileLevel> {
    let (profile_idc, level_idc) = match parts.len() {
        // avc1.PPCCLL
        2 if parts[1].len() == 6 && parts[1].is_ascii() => (
            u32::from_str_radix(&parts[1][0..2], 16).ok()?,
            u32::from_str_radix(&parts[1][4..6], 16).ok()?,
        ),
        // Legacy avc1.PP.LL, decimal
        n if n >= 3 => (parts[1].parse().ok()?, parts[2].parse().ok()?),
        _ => return None,
    };

    let profile = match profile_idc {
        66 => avc::PROFILE_BASELINE,
        77 => avc::PROFILE_MAIN,
        88 => avc::PROFILE_EXTENDED,
        100 => avc::PROFILE_HIGH,
        110 => avc::PROFILE_HIGH10,
        122 => avc::PROFILE_HIGH422,
        244 => avc::PROFILE_HIGH444,
        _ => return None,
    };
    let level = match level_idc {
        10 => 0x01,
        11 => 0x04,
        12 => 0x08,
        13 => 0x10,
        20 => 0x20,
        21 => 0x40,
        22 => 0x80,
        30 => 0x100,
        31 => 0x200,
        32 => 0x400,
        40 => 0x800,
        41 => 0x1000,
        42 => 0x2000,
        50 => 0x4000,
        51 => 0x8000,
        52 => 0x10000,
        _ => return None,
    };
    Some(ProfileLevel { profile, level })
}

fn parse_hevc(parts: &[&str], transfer: Option<ColorTransfer>) -> Option<ProfileLevel> {
    if parts.len() < 4 {
        return None;
    }

    // Profile may be prefixed with the general_profile_space letter.
    let profile_idc: u32 = parts[1]
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .ok()?;
    let profile = match profile_idc {
        1 => hevc::PROFILE_MAIN,
        2 if transfer == Some(ColorTransfer::St2084) => hevc::PROFILE_MAIN10_HDR10,
        2 => hevc::PROFILE_MAIN10,
        _ => return None,
    };

    let level_code = parts[3];
    if level_code.len() < 2 || !level_code.is_ascii() {
        return None;
    }
    let (tier, level_idc) = level_code.split_at(1);
    let high_tier = match tier {
        "L" => false,
        "H" => true,
        _ => return None,
    };
    let main_tier_level: u32 = match level_idc.parse::<u32>().ok()? {
        30 => 0x1,
        60 => 0x4,
        63 => 0x10,
        90 => 0x40,
        93 => 0x100,
        120 => 0x400,
        123 => 0x1000,
        150 => 0x4000,
        153 => 0x10000,
        156 => 0x40000,
        180 => 0x100000,
        183 => 0x400000,
        186 => 0x1000000,
        _ => return None,
    };
    // Each high tier constant sits one bit above its main tier counterpart.
    let level = if high_tier {
        main_tier_level << 1
    } else {
        main_tier_level
    };
    Some(ProfileLevel { profile, level })
}

fn parse_vp9(parts: &[&str]) -> Option<ProfileLevel> {
    // vp09.PP.LL.DD
    if parts.len() < 3 {
        return None;
    }
    let profile = match parts[1].parse::<u32>().ok()? {
        0 => vp9::PROFILE_0,
        1 => vp9::PROFILE_1,
        2 => vp9::PROFILE_2,
        3 => vp9::PROFILE_3,
        _ => return None,
    };
    let level = match parts[2].parse::<u32>().ok()? {
        10 => 0x1,
        11 => 0x2,
        20 => 0x4,
        21 => 0x8,
        30 => 0x10,
        31 => 0x20,
        40 => 0x40,
        41 => 0x80,
        50 => 0x100,
        51 => 0x200,
        52 => 0x400,
        60 => 0x800,
        61 => 0x1000,
        62 => 0x2000,
        _ => return None,
    };
    Some(ProfileLevel { profile, level })
}

fn parse_av1(parts: &[&str], color_info: Option<&ColorInfo>) -> Option<ProfileLevel> {
    // av01.P.LLT.DD
    if parts.len() < 4 {
        return None;
    }
    // Only the Main profile is mapped.
    if parts[1].parse::<u32>().ok()? != 0 {
        return None;
    }
    let level_code = parts[2];
    if level_code.len() < 2 || !level_code.is_ascii() {
        return None;
    }
    let level_idc: u32 = level_code[0..2].parse().ok()?;
    if level_idc > 23 {
        return None;
    }

    let is_hdr = color_info
        .is_some_and(|info| info.is_transfer_hdr() || info.hdr_static_info.is_some());
    let profile = match parts[3].parse::<u32>().ok()? {
        8 => av1::PROFILE_MAIN8,
        10 if is_hdr => av1::PROFILE_MAIN10_HDR10,
        10 => av1::PROFILE_MAIN10,
        _ => return None,
    };
    // Level constants run 2.0, 2.1, ... 7.3 as consecutive bits.
    Some(ProfileLevel {
        profile,
        level: 1 << level_idc,
    })
}
