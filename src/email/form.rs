//! Validation and rendering for the create and update email forms.

use maud::{Markup, html};

use crate::{
    category::{Category, CategoryId},
    email::{EMAIL_NAME_MAX_LENGTH, EmailFormData, EmailName, NewEmail},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_HELP_TEXT_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, field_error, text_input,
    },
    navigation::NavBar,
    translation::{
        TranslationChanges, TranslationId, TranslationSlot, slots_from_form,
        translation_formset_view, validate_slots,
    },
    validation::{FieldError, FieldErrors},
};

const CATEGORY_HELP_TEXT: &str = "Choose a category! Can't see a relevant category? \
    Click 'New category' in the menu to add one.";

impl EmailFormData {
    /// The translation slots held in the parallel form lists.
    pub fn slots(&self) -> Vec<TranslationSlot> {
        slots_from_form(
            &self.translation_id,
            &self.language,
            &self.content,
            &self.delete,
        )
    }
}

/// Validate a submitted email form.
///
/// `categories` are the categories that can be selected and
/// `existing_translation_ids` the translations of the email being edited
/// (empty when creating). Nothing is written here, so the caller can save the
/// email and translations together once everything is valid.
///
/// # Errors
///
/// Returns every field error found, keyed by field name.
pub fn validate_email_form(
    form: &EmailFormData,
    slots: &[TranslationSlot],
    categories: &[Category],
    existing_translation_ids: &[TranslationId],
) -> Result<(NewEmail, TranslationChanges), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name_eng = errors.check("name_eng", EmailName::new(&form.name_eng));
    let name_esp = errors.check("name_esp", EmailName::new(&form.name_esp));
    let category_id = errors.check("category_id", parse_category(&form.category_id, categories));
    let translations = validate_slots(slots, existing_translation_ids, &mut errors);

    match (name_eng, name_esp, category_id) {
        (Some(name_eng), Some(name_esp), Some(category_id)) if errors.is_empty() => Ok((
            NewEmail {
                name_eng,
                name_esp,
                category_id,
            },
            translations,
        )),
        _ => Err(errors),
    }
}

fn parse_category(
    raw_category_id: &str,
    categories: &[Category],
) -> Result<Option<CategoryId>, FieldError> {
    let raw_category_id = raw_category_id.trim();

    if raw_category_id.is_empty() {
        return Ok(None);
    }

    raw_category_id
        .parse::<CategoryId>()
        .ok()
        .filter(|id| categories.iter().any(|category| category.id == *id))
        .map(Some)
        .ok_or_else(|| FieldError::InvalidChoice(raw_category_id.to_owned()))
}

/// The values and errors needed to draw the email form.
pub struct EmailFormView<'a> {
    /// Where the form posts to. Also used for `hx-post`.
    pub action: &'a str,
    pub submit_text: &'a str,
    pub name_eng: &'a str,
    pub name_esp: &'a str,
    pub category_id: &'a str,
    pub categories: &'a [Category],
    pub slots: &'a [TranslationSlot],
    pub errors: &'a FieldErrors,
}

impl EmailFormView<'_> {
    pub fn into_html(self) -> Markup {
        html! {
            form
                id="email-form"
                method="post"
                action=(self.action)
                hx-post=(self.action)
                hx-target="this"
                hx-swap="outerHTML"
                class="w-full space-y-4 md:space-y-6"
            {
                (text_input(
                    "name_eng",
                    "Email name in English",
                    self.name_eng,
                    EMAIL_NAME_MAX_LENGTH,
                    &self.errors.message("name_eng"),
                ))

                (text_input(
                    "name_esp",
                    "Email name in Spanish",
                    self.name_esp,
                    EMAIL_NAME_MAX_LENGTH,
                    &self.errors.message("name_esp"),
                ))

                div
                {
                    label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                    select id="category_id" name="category_id" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[self.category_id.is_empty()] { "---------" }

                        @for category in self.categories {
                            @let value = category.id.to_string();
                            option value=(value) selected[self.category_id == value]
                            {
                                (category.name)
                            }
                        }
                    }

                    p class=(FORM_HELP_TEXT_STYLE) { (CATEGORY_HELP_TEXT) }
                    (field_error(&self.errors.message("category_id")))
                }

                (translation_formset_view(self.slots, self.errors))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (self.submit_text) }
            }
        }
    }
}

/// Wrap an email form in a full page with the navigation bar.
pub fn email_form_page(title: &str, active_endpoint: &str, form: Markup) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { (title) }
            (form)
        }
    };

    base(title, &content)
}

#[cfg(test)]
mod validate_email_form_tests {
    use crate::{
        category::{Category, CategoryName},
        email::{EmailFormData, EmailName},
        translation::Language,
        validation::FieldError,
    };

    use super::validate_email_form;

    fn categories() -> Vec<Category> {
        vec![Category {
            id: 1,
            name: CategoryName::new_unchecked("Company Introductions"),
        }]
    }

    fn form(category_id: &str) -> EmailFormData {
        EmailFormData {
            name_eng: "Welcome".to_owned(),
            name_esp: "Bienvenido".to_owned(),
            category_id: category_id.to_owned(),
            translation_id: vec![String::new(); 3],
            language: vec!["ES".to_owned(), "EN".to_owned(), "EN".to_owned()],
            content: vec!["Bienvenido".to_owned(), String::new(), String::new()],
            delete: Vec::new(),
        }
    }

    #[test]
    fn valid_form_produces_email_and_translations() {
        let form = form("1");

        let (email, translations) =
            validate_email_form(&form, &form.slots(), &categories(), &[]).unwrap();

        assert_eq!(email.name_eng, EmailName::new_unchecked("Welcome"));
        assert_eq!(email.category_id, Some(1));
        assert_eq!(translations.saved.len(), 1);
        assert_eq!(translations.saved[0].language, Language::Spanish);
        assert!(translations.deleted.is_empty());
    }

    #[test]
    fn blank_category_is_absent() {
        let form = form("");

        let (email, _) = validate_email_form(&form, &form.slots(), &categories(), &[]).unwrap();

        assert_eq!(email.category_id, None);
    }

    #[test]
    fn unknown_category_is_invalid_choice() {
        let form = form("7");

        let errors = validate_email_form(&form, &form.slots(), &categories(), &[]).unwrap_err();

        assert_eq!(
            errors.get("category_id"),
            Some(&FieldError::InvalidChoice("7".to_owned()))
        );
    }

    #[test]
    fn non_numeric_category_is_invalid_choice() {
        let form = form("abc");

        let errors = validate_email_form(&form, &form.slots(), &categories(), &[]).unwrap_err();

        assert_eq!(
            errors.get("category_id"),
            Some(&FieldError::InvalidChoice("abc".to_owned()))
        );
    }

    #[test]
    fn reports_every_invalid_field() {
        let mut form = form("");
        form.name_eng = String::new();
        form.name_esp = "a".repeat(101);
        form.language[0] = "XX".to_owned();

        let errors = validate_email_form(&form, &form.slots(), &categories(), &[]).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name_eng"), Some(&FieldError::Required));
        assert_eq!(
            errors.get("name_esp"),
            Some(&FieldError::TooLong {
                max: 100,
                actual: 101
            })
        );
        assert_eq!(
            errors.get("translation-0-language"),
            Some(&FieldError::InvalidChoice("XX".to_owned()))
        );
    }

    #[test]
    fn invalid_translation_fails_whole_form() {
        let mut form = form("1");
        form.content[1] = "x".repeat(2001);

        let result = validate_email_form(&form, &form.slots(), &categories(), &[]);

        assert!(result.is_err());
    }
}

#[cfg(test)]
mod email_form_view_tests {
    use scraper::{Html, Selector};

    use crate::{
        category::{Category, CategoryName},
        endpoints,
        test_utils::{assert_form_input_with_value, assert_hx_endpoint, must_get_form},
        translation::initial_slots,
        validation::{FieldError, FieldErrors},
    };

    use super::EmailFormView;

    #[test]
    fn renders_values_selected_category_and_errors() {
        let categories = vec![
            Category {
                id: 1,
                name: CategoryName::new_unchecked("Sales"),
            },
            Category {
                id: 2,
                name: CategoryName::new_unchecked("Support"),
            },
        ];
        let slots = initial_slots(&[]);
        let mut errors = FieldErrors::new();
        errors.insert("name_esp", FieldError::Required);

        let markup = EmailFormView {
            action: endpoints::NEW_EMAIL_VIEW,
            submit_text: "Create email",
            name_eng: "Welcome",
            name_esp: "",
            category_id: "2",
            categories: &categories,
            slots: &slots,
            errors: &errors,
        }
        .into_html();
        let html = Html::parse_fragment(&markup.into_string());

        let form = must_get_form(&html);
        assert_eq!(form.value().attr("method"), Some("post"));
        assert_eq!(form.value().attr("action"), Some(endpoints::NEW_EMAIL_VIEW));
        assert_hx_endpoint(&form, endpoints::NEW_EMAIL_VIEW, "hx-post");
        assert_form_input_with_value(&form, "name_eng", "text", "Welcome");

        let selected = form
            .select(&Selector::parse("select[name=category_id] option[selected]").unwrap())
            .next()
            .expect("No selected category");
        assert_eq!(selected.value().attr("value"), Some("2"));

        let text = form.text().collect::<String>();
        assert!(text.contains("This field is required."));
    }
}
