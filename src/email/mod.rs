//! Email templates: their storage, forms and pages.

mod create;
mod db;
mod detail;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{CreateEmailState, create_email_endpoint, get_new_email_page};
pub use db::{
    count_emails, create_email, create_email_table, get_all_emails, get_email,
    get_emails_in_category, update_email,
};
pub use detail::{EmailPageState, get_email_page};
pub use domain::{EMAIL_NAME_MAX_LENGTH, Email, EmailFormData, EmailId, EmailName, NewEmail};
pub use edit::{EditEmailState, get_edit_email_page, update_email_endpoint};
pub use list::{EmailsPageState, get_emails_page};
