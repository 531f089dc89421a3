//! The named capabilities that gate pages.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A named capability checked before a handler executes.
///
/// View and change rights are independent: holding [Permission::ChangeEmail]
/// does not imply [Permission::ViewEmail] or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Permission {
    /// Create emails and their translations.
    AddEmail,
    /// Edit emails and their translations.
    ChangeEmail,
    /// View the detail page of an email.
    ViewEmail,
    /// Create categories.
    AddCategory,
    /// Edit categories.
    ChangeCategory,
    /// View the detail page of a category.
    ViewCategory,
}

impl Permission {
    /// Every permission, in display order.
    pub const ALL: [Permission; 6] = [
        Permission::AddEmail,
        Permission::ChangeEmail,
        Permission::ViewEmail,
        Permission::AddCategory,
        Permission::ChangeCategory,
        Permission::ViewCategory,
    ];

    /// The name used in the database and on the command line, e.g. "view-email".
    pub fn name(&self) -> &'static str {
        match self {
            Permission::AddEmail => "add-email",
            Permission::ChangeEmail => "change-email",
            Permission::ViewEmail => "view-email",
            Permission::AddCategory => "add-category",
            Permission::ChangeCategory => "change-category",
            Permission::ViewCategory => "view-category",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.name() == s)
            .ok_or_else(|| Error::UnknownPermission(s.to_owned()))
    }
}

impl TryFrom<String> for Permission {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.name().to_owned()
    }
}
