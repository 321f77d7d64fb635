//! Media type identifiers and helpers

/// H.264 / AVC video
pub const VIDEO_H264: &str = "video/avc";
/// H.265 / HEVC video
pub const VIDEO_H265: &str = "video/hevc";
/// VP8 video
pub const VIDEO_VP8: &str = "video/x-vnd.on2.vp8";
/// VP9 video
pub const VIDEO_VP9: &str = "video/x-vnd.on2.vp9";
/// AV1 video
pub const VIDEO_AV1: &str = "video/av01";
/// Dolby Vision video
pub const VIDEO_DOLBY_VISION: &str = "video/dolby-vision";

/// AAC audio
pub const AUDIO_AAC: &str = "audio/mp4a-latm";
/// Opus audio
pub const AUDIO_OPUS: &str = "audio/opus";
/// Vorbis audio
pub const AUDIO_VORBIS: &str = "audio/vorbis";
/// FLAC audio
pub const AUDIO_FLAC: &str = "audio/flac";
/// Raw PCM audio
pub const AUDIO_RAW: &str = "audio/raw";

/// Top-level kind of a media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    /// `audio/*`
    Audio,
    /// `video/*`
    Video,
    /// Anything else (text, application, image)
    Other,
}

/// Classify a mime type by its top-level type.
pub fn track_kind(mime_type: &str) -> TrackKind {
    match top_level_type(mime_type) {
        Some(t) if t.eq_ignore_ascii_case("audio") => TrackKind::Audio,
        Some(t) if t.eq_ignore_ascii_case("video") => TrackKind::Video,
        _ => TrackKind::Other,
    }
}

/// Whether the mime type is `video/*`
pub fn is_video(mime_type: &str) -> bool {
    track_kind(mime_type) == TrackKind::Video
}

/// Whether the mime type is `audio/*`
pub fn is_audio(mime_type: &str) -> bool {
    track_kind(mime_type) == TrackKind::Audio
}

fn top_level_type(mime_type: &str) -> Option<&str> {
    let (top, _) = mime_type.split_once('/')?;
    (!top.is_empty()).then_some(top)
}
