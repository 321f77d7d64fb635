//! Decoder resolution demo
//!
//! Resolves the same HDR10 stream on a few simulated devices and prints
//! what each one decides.

use codecgate::{
    mime, CodecGate, ColorInfo, DebugLogger, GlobalConfig, PlatformInfo, StreamDescriptor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    DebugLogger::init_logging("info,codecgate=debug")?;

    let devices = [
        (28, "Acme", "AX1.180101.001"),
        (30, "Acme", "AX1.200101.001"),
        (32, "Google", "TP1A.220624.014"),
        (33, "Acme", "AX1.230101.001"),
    ];

    let descriptor = StreamDescriptor::video(mime::VIDEO_H265, 3840, 2160)
        .codecs("hvc1.2.4.L153.B0")
        .color_info(ColorInfo::hdr10());

    for (api_level, manufacturer, build_id) in devices {
        let gate = CodecGate::init_with(GlobalConfig {
            platform: PlatformInfo {
                api_level,
                target_api_level: api_level,
                manufacturer: manufacturer.to_string(),
                build_id: build_id.to_string(),
            },
            ..Default::default()
        })?;

        println!("\n📱 {}", gate.device_report().summary());
        for tone_mapping in [false, true] {
            match gate.resolve_video_decoder(&descriptor, None, tone_mapping) {
                Ok(handle) => println!(
                    "  ✅ tone_mapping={} -> {} ({} keys)",
                    tone_mapping,
                    handle.codec_name(),
                    handle.configuration().len()
                ),
                Err(e) => println!("  ❌ tone_mapping={} -> {}", tone_mapping, e),
            }
        }
    }

    let gate = CodecGate::init()?;
    let handle =
        gate.resolve_audio_decoder(&StreamDescriptor::audio(mime::AUDIO_OPUS, 48_000, 2))?;
    println!("\n🎵 Audio decoder: {}", handle.codec_name());
    handle.release()?;

    Ok(())
}
