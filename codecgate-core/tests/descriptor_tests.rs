//! Integration tests for descriptors, decode configurations and errors

use codecgate_core::*;

#[test]
fn test_video_descriptor_to_configuration() {
    let descriptor = StreamDescriptor::video(mime::VIDEO_VP9, 1920, 1080)
        .initialization_data(vec![1u8, 2, 3])
        .initialization_data(vec![4u8])
        .initialization_data(vec![5u8, 6])
        .color_info(ColorInfo::hlg());

    let mut configuration = DecodeConfiguration::create_video(
        descriptor.mime_type().unwrap(),
        descriptor.width.unwrap(),
        descriptor.height.unwrap(),
    );
    configuration.set_csd_buffers(&descriptor.initialization_data);
    configuration.maybe_set_color_info(descriptor.color_info.as_ref());

    assert_eq!(configuration.mime_type(), Some("video/x-vnd.on2.vp9"));
    assert_eq!(configuration.csd_buffers().len(), 3);
    assert_eq!(configuration.get_bytes(&keys::csd(2)).map(|b| b.len()), Some(2));
    assert_eq!(
        configuration.get_integer(keys::COLOR_TRANSFER),
        Some(ColorTransfer::Hlg.platform_value())
    );
    assert!(!configuration.contains_key(keys::HDR_STATIC_INFO));
    assert!(descriptor.is_transfer_hdr());
}

#[test]
fn test_partial_color_info_writes_only_present_fields() {
    let color_info = ColorInfo {
        color_transfer: Some(ColorTransfer::St2084),
        ..Default::default()
    };
    let mut configuration = DecodeConfiguration::create_video(mime::VIDEO_H265, 1920, 1080);
    configuration.maybe_set_color_info(Some(&color_info));

    assert_eq!(configuration.get_integer(keys::COLOR_TRANSFER), Some(6));
    assert!(!configuration.contains_key(keys::COLOR_STANDARD));
    assert!(!configuration.contains_key(keys::COLOR_RANGE));
    assert_eq!(configuration.len(), 4);
}

#[test]
fn test_descriptor_json_from_external_source() {
    let json = r#"{
        "sample_mime_type": "video/hevc",
        "codecs": "hvc1.2.4.L153.B0",
        "width": 3840,
        "height": 2160,
        "color_info": {
            "color_space": "Bt2020",
            "color_range": "Limited",
            "color_transfer": "St2084"
        }
    }"#;
    let descriptor: StreamDescriptor = serde_json::from_str(json).unwrap();

    assert_eq!(descriptor.mime_type(), Some(mime::VIDEO_H265));
    assert_eq!(descriptor.rotation_degrees, None);
    assert!(descriptor.initialization_data.is_empty());
    assert!(descriptor.is_transfer_hdr());
    assert_eq!(mime::track_kind(mime::VIDEO_H265), TrackKind::Video);
}

#[test]
fn test_failure_context_and_messages() {
    let audio = StreamDescriptor::audio(mime::AUDIO_FLAC, 96_000, 2);
    let error: CodecGateError =
        ResolutionFailure::new(FailureCode::DecodingFormatUnsupported, &audio).into();

    assert_eq!(
        error.to_string(),
        "Audio decoder failure (DECODING_FORMAT_UNSUPPORTED): The requested decoding format is not supported."
    );
    assert_eq!(error.category(), ErrorCategory::Format);
    assert!(!error.is_recoverable());

    let failure = error.as_resolution_failure().unwrap();
    assert!(!failure.is_video);
    assert!(failure.is_decoder);
    assert_eq!(*failure.descriptor, audio);
}

#[test]
fn test_only_tone_mapping_failures_are_recoverable() {
    let video = StreamDescriptor::video(mime::VIDEO_H265, 1920, 1080);
    for (code, recoverable) in [
        (FailureCode::DecodingFormatUnsupported, false),
        (FailureCode::HdrDecodingUnsupported, false),
        (FailureCode::ToneMappingUnsupported, true),
        (FailureCode::DecoderInitFailed, false),
    ] {
        let error = CodecGateError::from(ResolutionFailure::new(code, &video));
        assert_eq!(error.is_recoverable(), recoverable, "{}", code);
        assert_eq!(error.failure_code(), Some(code));
        assert_eq!(error.error_code(), code.error_code());
    }

    let contract = CodecGateError::from(ContractViolation::MissingField {
        field: "sample_mime_type",
    });
    assert!(!contract.is_recoverable());
    assert_eq!(contract.failure_code(), None);
}
