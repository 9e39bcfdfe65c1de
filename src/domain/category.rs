use serde::{Deserialize, Serialize};

/// A node of the catalog hierarchy. Main categories, categories and
/// sub-categories share this shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Level of the catalog hierarchy to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryLevel {
    Main,
    Category,
    Sub,
}

impl CategoryLevel {
    /// Path of the listing endpoint on the storefront API.
    pub fn endpoint(self) -> &'static str {
        match self {
            CategoryLevel::Main => "/user/main-categories",
            CategoryLevel::Category => "/user/categories",
            CategoryLevel::Sub => "/user/sub-categories",
        }
    }
}
