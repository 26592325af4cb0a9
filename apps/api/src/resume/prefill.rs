use crate::resume::models::{ExtractionResult, ResumeData};

/// Merges an extraction into the current resume to build the editable draft.
///
/// Non-empty extracted profile fields overwrite the stored ones. Experience and
/// education are replaced wholesale when the extraction found any entries.
/// Title, summary, location, phone and skills are never touched. The draft is
/// returned for review and is not persisted.
pub fn prefill_resume(mut base: ResumeData, extraction: &ExtractionResult) -> ResumeData {
    let profile = &mut base.profile;

    if !extraction.name.is_empty() {
        profile.name = extraction.name.clone();
    }
    if !extraction.email.is_empty() {
        profile.email = extraction.email.clone();
    }
    overwrite_link(&mut profile.linkedin, &extraction.linkedin);
    overwrite_link(&mut profile.github, &extraction.github);
    overwrite_link(&mut profile.website, &extraction.website);

    if !extraction.experience.is_empty() {
        base.experience = extraction.experience.clone();
    }
    if !extraction.education.is_empty() {
        base.education = extraction.education.clone();
    }

    base
}

fn overwrite_link(slot: &mut Option<String>, extracted: &str) {
    if !extracted.is_empty() {
        *slot = Some(extracted.to_string());
    }
}
