use crate::{error::AppError, routes::SubmitForm, store::SubmissionRecord};

/// Trim and presence-check the raw form before the store ever sees it.
///
/// Missing fields arrive as empty strings, so absence and whitespace-only
/// input fail the same way.
pub fn normalize_submission(form: SubmitForm) -> Result<SubmissionRecord, AppError> {
    let record = SubmissionRecord {
        person1: form.name1.trim().to_string(),
        person2: form.name2.trim().to_string(),
        mode: form.mode.trim().to_string(),
    };

    if record.person1.is_empty() {
        return Err(AppError::MissingField("name1"));
    }
    if record.person2.is_empty() {
        return Err(AppError::MissingField("name2"));
    }
    if record.mode.is_empty() {
        return Err(AppError::MissingField("mode"));
    }

    Ok(record)
}
