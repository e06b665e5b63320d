use super::*;

const LIMIT: usize = 1024;

#[test]
fn issues_a_receipt_without_keeping_the_image() {
    let upload = GradingUpload {
        email: Some("  creator@example.com "),
        preset: Some("Portra Glow"),
        filename: Some("shot.jpg"),
        image: b"jpeg-bytes",
    };
    let receipt = accept_upload(&upload, LIMIT).expect("receipt");
    assert_eq!(receipt.email, "creator@example.com");
    assert_eq!(receipt.preset.as_deref(), Some("Portra Glow"));
    assert_eq!(receipt.filename, "shot.jpg");
    assert_eq!(receipt.size_bytes, 10);
    assert_eq!(receipt.status, "received");
}

#[test]
fn email_and_image_are_both_required() {
    let no_email = GradingUpload {
        email: Some("   "),
        image: b"bytes",
        ..Default::default()
    };
    let err = accept_upload(&no_email, LIMIT).expect_err("missing email");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, MISSING_FIELDS_MESSAGE);

    let no_image = GradingUpload {
        email: Some("creator@example.com"),
        ..Default::default()
    };
    let err = accept_upload(&no_image, LIMIT).expect_err("missing image");
    assert_eq!(err.message, MISSING_FIELDS_MESSAGE);
}

#[test]
fn blank_preset_is_omitted_and_filename_defaults() {
    let upload = GradingUpload {
        email: Some("creator@example.com"),
        preset: Some(" "),
        filename: None,
        image: b"bytes",
    };
    let receipt = accept_upload(&upload, LIMIT).expect("receipt");
    assert!(receipt.preset.is_none());
    assert_eq!(receipt.filename, "upload");
}

#[test]
fn oversized_images_are_refused() {
    let image = vec![0u8; LIMIT + 1];
    let upload = GradingUpload {
        email: Some("creator@example.com"),
        image: &image,
        ..Default::default()
    };
    let err = accept_upload(&upload, LIMIT).expect_err("too large");
    assert_eq!(err.code, ErrorCode::PayloadTooLarge);
}

#[test]
fn filenames_with_paths_are_refused() {
    let upload = GradingUpload {
        email: Some("creator@example.com"),
        filename: Some("../etc/passwd"),
        image: b"bytes",
        ..Default::default()
    };
    let err = accept_upload(&upload, LIMIT).expect_err("path separator");
    assert_eq!(err.code, ErrorCode::Validation);

    let long_name = "a".repeat(MAX_FILENAME_BYTES + 1);
    let upload = GradingUpload {
        email: Some("creator@example.com"),
        filename: Some(&long_name),
        image: b"bytes",
        ..Default::default()
    };
    assert!(accept_upload(&upload, LIMIT).is_err());
}
