use chrono::Utc;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::GradingReceipt,
};
use uuid::Uuid;

pub const MAX_FILENAME_BYTES: usize = 180;
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in the email and upload an image.";

/// An image sent in for grading, as collected by the upload form.
#[derive(Debug, Clone, Default)]
pub struct GradingUpload<'a> {
    pub email: Option<&'a str>,
    pub preset: Option<&'a str>,
    pub filename: Option<&'a str>,
    pub image: &'a [u8],
}

/// Checks an upload and issues a receipt for it.
///
/// Intake only: the image is neither kept nor forwarded anywhere, and the
/// receipt says so with `status = "received"`.
pub fn accept_upload(
    upload: &GradingUpload<'_>,
    max_bytes: usize,
) -> Result<GradingReceipt, ApiError> {
    let email = upload.email.map(str::trim).filter(|email| !email.is_empty());
    let (Some(email), false) = (email, upload.image.is_empty()) else {
        return Err(ApiError::validation(MISSING_FIELDS_MESSAGE));
    };

    if upload.image.len() > max_bytes {
        return Err(ApiError::new(
            ErrorCode::PayloadTooLarge,
            format!("image exceeds {max_bytes} bytes"),
        ));
    }

    let filename = upload
        .filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("upload");
    if filename.len() > MAX_FILENAME_BYTES {
        return Err(ApiError::validation("filename is too long"));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::validation(
            "filename must not contain path separators",
        ));
    }

    Ok(GradingReceipt {
        submission_id: Uuid::new_v4(),
        email: email.to_string(),
        preset: upload
            .preset
            .map(str::trim)
            .filter(|preset| !preset.is_empty())
            .map(str::to_string),
        filename: filename.to_string(),
        size_bytes: upload.image.len(),
        status: "received".to_string(),
        received_at: Utc::now(),
    })
}

#[cfg(test)]
#[path = "tests/grading_tests.rs"]
mod tests;
