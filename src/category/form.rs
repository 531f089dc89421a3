//! The form shared by the create and update category pages.

use maud::{Markup, html};

use crate::{
    category::CATEGORY_NAME_MAX_LENGTH,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, text_input},
    navigation::NavBar,
};

/// Render the category form posting to `action`.
pub fn category_form_view(action: &str, submit_text: &str, name: &str, error: &str) -> Markup {
    html! {
        form
            id="category-form"
            method="post"
            action=(action)
            hx-post=(action)
            hx-target="this"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (text_input("name", "Category name", name, CATEGORY_NAME_MAX_LENGTH, error))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
        }
    }
}

/// Wrap a category form in a full page with the navigation bar.
pub fn category_form_page(title: &str, active_endpoint: &str, form: Markup) -> Markup {
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
