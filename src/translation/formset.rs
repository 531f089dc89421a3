//! The batch of translation slots edited alongside an email.
//!
//! Slots are submitted as three parallel repeated form keys (`translation_id`,
//! `language` and `content`), one entry per slot in page order. Existing
//! translations also get a `delete` checkbox whose value is the translation ID,
//! since unticked boxes are not submitted. Errors are keyed
//! `translation-{index}-{field}` so they can be shown next to the slot.

use maud::{Markup, html};

use crate::{
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, field_error},
    translation::{EmailTranslation, Language, TRANSLATION_CONTENT_MAX_LENGTH, TranslationId},
    validation::{FieldError, FieldErrors, validate_text},
};

/// The number of blank slots offered for adding new translations.
pub const EXTRA_SLOTS: usize = 3;

/// The raw values of one translation slot as submitted by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSlot {
    /// Empty for a slot that would add a new translation.
    pub id: String,
    pub language: String,
    pub content: String,
    /// Whether the user ticked the slot's delete box.
    pub delete: bool,
}

impl TranslationSlot {
    /// An empty slot for adding a translation.
    pub fn blank() -> Self {
        Self {
            id: String::new(),
            language: Language::default().code().to_owned(),
            content: String::new(),
            delete: false,
        }
    }

    /// A slot pre-filled with an existing translation.
    pub fn from_translation(translation: &EmailTranslation) -> Self {
        Self {
            id: translation.id.to_string(),
            language: translation.language.code().to_owned(),
            content: translation.content.clone(),
            delete: false,
        }
    }

    fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }
}

/// The slots shown on a fresh form: one per existing translation followed by
/// [EXTRA_SLOTS] blank ones.
pub fn initial_slots(existing: &[EmailTranslation]) -> Vec<TranslationSlot> {
    existing
        .iter()
        .map(TranslationSlot::from_translation)
        .chain(std::iter::repeat_with(TranslationSlot::blank).take(EXTRA_SLOTS))
        .collect()
}

/// Zip the parallel form keys back into slots.
///
/// The slot count is the length of the longest list. Missing entries are treated
/// as blank. A slot is flagged for deletion when its ID is among `deleted_ids`.
pub fn slots_from_form(
    ids: &[String],
    languages: &[String],
    contents: &[String],
    deleted_ids: &[String],
) -> Vec<TranslationSlot> {
    let slot_count = ids.len().max(languages.len()).max(contents.len());
    let get = |values: &[String], index: usize| values.get(index).cloned().unwrap_or_default();

    (0..slot_count)
        .map(|index| {
            let id = get(ids, index);
            let delete = !id.trim().is_empty()
                && deleted_ids
                    .iter()
                    .any(|deleted_id| deleted_id.trim() == id.trim());

            TranslationSlot {
                id,
                language: get(languages, index),
                content: get(contents, index),
                delete,
            }
        })
        .collect()
}

/// A translation slot that passed validation and should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTranslation {
    /// `None` for a new translation.
    pub id: Option<TranslationId>,
    pub language: Language,
    pub content: String,
}

/// The writes a valid formset asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationChanges {
    /// Translations to add or update.
    pub saved: Vec<ValidTranslation>,
    /// Existing translations to remove.
    pub deleted: Vec<TranslationId>,
}

/// The error key for `field` of the slot at `index`.
pub fn slot_field(index: usize, field: &str) -> String {
    format!("translation-{index}-{field}")
}

/// Validate the submitted slots.
///
/// `existing_ids` are the translations of the email being edited; a slot
/// carrying any other ID is rejected. New slots with blank content are
/// skipped, and slots flagged for deletion only need a valid ID. Errors are
/// added to `errors` and the valid changes are returned.
pub fn validate_slots(
    slots: &[TranslationSlot],
    existing_ids: &[TranslationId],
    errors: &mut FieldErrors,
) -> TranslationChanges {
    let mut changes = TranslationChanges::default();

    for (index, slot) in slots.iter().enumerate() {
        if slot.is_new() && slot.content.trim().is_empty() {
            continue;
        }

        if slot.delete && !slot.is_new() {
            if let Some(id) =
                errors.check(slot_field(index, "id"), parse_existing_id(&slot.id, existing_ids))
            {
                changes.deleted.push(id);
            }
            continue;
        }

        let id = if slot.is_new() {
            Some(None)
        } else {
            errors
                .check(slot_field(index, "id"), parse_existing_id(&slot.id, existing_ids))
                .map(Some)
        };
        let language = errors.check(
            slot_field(index, "language"),
            Language::from_code(&slot.language),
        );
        let content = errors.check(
            slot_field(index, "content"),
            validate_text(&slot.content, TRANSLATION_CONTENT_MAX_LENGTH, true),
        );

        if let (Some(id), Some(language), Some(content)) = (id, language, content) {
            changes.saved.push(ValidTranslation {
                id,
                language,
                content,
            });
        }
    }

    changes
}

fn parse_existing_id(
    raw_id: &str,
    existing_ids: &[TranslationId],
) -> Result<TranslationId, FieldError> {
    let raw_id = raw_id.trim();

    raw_id
        .parse::<TranslationId>()
        .ok()
        .filter(|id| existing_ids.contains(id))
        .ok_or_else(|| FieldError::InvalidChoice(raw_id.to_owned()))
}

/// Render the slots as fieldsets with their errors.
pub fn translation_formset_view(slots: &[TranslationSlot], errors: &FieldErrors) -> Markup {
    html! {
        div id="translations" class="space-y-4"
        {
            h2 class="text-lg font-semibold" { "Translations" }

            @for (index, slot) in slots.iter().enumerate() {
                (translation_slot_view(index, slot, errors))
            }
        }
    }
}

fn translation_slot_view(index: usize, slot: &TranslationSlot, errors: &FieldErrors) -> Markup {
    let language_id = slot_field(index, "language");
    let content_id = slot_field(index, "content");

    html! {
        fieldset
            class="space-y-2 p-4 rounded border border-gray-200 dark:border-gray-700"
            data-slot=(index)
        {
            input type="hidden" name="translation_id" value=(slot.id);
            (field_error(&errors.message(&slot_field(index, "id"))))

            @if !slot.is_new() {
                @let delete_id = slot_field(index, "delete");

                div class="flex items-center gap-x-3"
                {
                    input
                        type="checkbox"
                        id=(delete_id)
                        name="delete"
                        value=(slot.id)
                        checked[slot.delete]
                        class="rounded-xs";

                    label for=(delete_id) class=(FORM_LABEL_STYLE) { "Delete" }
                }
            }

            div
            {
                label for=(language_id) class=(FORM_LABEL_STYLE) { "Language" }

                select id=(language_id) name="language" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for language in Language::ALL {
                        option
                            value=(language.code())
                            selected[slot.language == language.code()]
                        {
                            (language.name())
                        }
                    }
                }

                (field_error(&errors.message(&language_id)))
            }

            div
            {
                label for=(content_id) class=(FORM_LABEL_STYLE) { "Content" }

                textarea
                    id=(content_id)
                    name="content"
                    rows="4"
                    maxlength=(TRANSLATION_CONTENT_MAX_LENGTH)
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (slot.content)
                }

                (field_error(&errors.message(&content_id)))
            }
        }
    }
}
