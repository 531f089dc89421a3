//! Per-language content for emails, edited as a batch alongside the email.

mod db;
mod domain;
mod formset;

pub use db::{
    count_email_translations, create_translation, create_translation_table, delete_translation,
    get_translations_for_email, update_translation,
};
pub use domain::{EmailTranslation, Language, TRANSLATION_CONTENT_MAX_LENGTH, TranslationId};
pub use formset::{
    EXTRA_SLOTS, TranslationChanges, TranslationSlot, ValidTranslation, initial_slots, slot_field,
    slots_from_form, translation_formset_view, validate_slots,
};
