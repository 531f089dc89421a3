//! Categories group email templates under a shared name.

mod create;
mod db;
mod detail;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{CreateCategoryState, create_category_endpoint, get_new_category_page};
pub use db::{
    count_categories, create_category, create_category_table, get_all_categories, get_category,
    update_category,
};
pub use detail::{CategoryPageState, get_category_page};
pub use domain::{CATEGORY_NAME_MAX_LENGTH, Category, CategoryFormData, CategoryId, CategoryName};
pub use edit::{EditCategoryState, get_edit_category_page, update_category_endpoint};
pub use list::{CategoriesPageState, get_categories_page};
