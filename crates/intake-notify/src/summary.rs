//! Plain-text submission summary.

use intake_core::models::{Submission, UploadedFile};

/// Format the human-readable summary sent over both channels.
///
/// Field order is fixed; absent optional fields render as `-` so the reader
/// always sees the same shape.
pub fn format_summary(submission: &Submission, files: &[UploadedFile]) -> String {
    fn or_dash(value: Option<&str>) -> &str {
        value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
    }

    let quantity = submission
        .quantity
        .map(|q| q.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut text = format!(
        "New request submitted:\n\
         Full Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Department: {}\n\
         Event Name: {}\n\
         Quantity: {}\n\
         Project Type: {}\n\
         Project Description: {}\n\
         Uploaded Files:",
        submission.full_name,
        submission.email,
        or_dash(submission.phone.as_deref()),
        submission.department,
        or_dash(submission.event_name.as_deref()),
        quantity,
        submission.project_type,
        or_dash(submission.project_description.as_deref()),
    );
    for file in files {
        text.push_str(&format!("\n- {}: {}", file.name, file.url));
    }
    text
}
