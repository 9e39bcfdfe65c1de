//! The nested catalog tree served by `/admin/hierarchy-v2`.
//!
//! The admin screen drills through it one level at a time: main categories,
//! then the categories of one main category, then the sub-categories of one
//! category.

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, MainCategoryId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HierarchySubCategory {
    pub id: i64,
    pub name: String,
    /// Row id of the placement inside the tree, distinct from `id`.
    #[serde(default)]
    pub hierarchy_id: i64,
    #[serde(default)]
    pub status: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HierarchyCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<HierarchySubCategory>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HierarchyMainCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<HierarchyCategory>,
}

impl From<&HierarchyMainCategory> for Category {
    fn from(main: &HierarchyMainCategory) -> Self {
        Category {
            id: main.id,
            name: main.name.clone(),
        }
    }
}

impl From<&HierarchyCategory> for Category {
    fn from(category: &HierarchyCategory) -> Self {
        Category {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

/// Which branch of the tree is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HierarchySelection {
    pub main_category: Option<MainCategoryId>,
    /// Ignored unless a main category is selected too.
    pub category: Option<CategoryId>,
}

/// The rows one drill-down level shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HierarchyLevel {
    MainCategories(Vec<Category>),
    Categories {
        /// `None` when the selected main category does not exist.
        main: Option<Category>,
        rows: Vec<Category>,
    },
    SubCategories {
        main: Option<Category>,
        category: Option<Category>,
        rows: Vec<HierarchySubCategory>,
    },
}

impl HierarchySelection {
    /// Resolves the selection against the tree. Unknown ids open an empty
    /// level rather than failing.
    pub fn resolve(self, tree: &[HierarchyMainCategory]) -> HierarchyLevel {
        let Some(main_id) = self.main_category else {
            return HierarchyLevel::MainCategories(tree.iter().map(Category::from).collect());
        };
        let main = tree.iter().find(|main| main.id == main_id.get());

        let Some(category_id) = self.category else {
            return HierarchyLevel::Categories {
                main: main.map(Category::from),
                rows: main
                    .map(|main| main.categories.iter().map(Category::from).collect())
                    .unwrap_or_default(),
            };
        };
        let category = main.and_then(|main| {
            main.categories
                .iter()
                .find(|category| category.id == category_id.get())
        });

        HierarchyLevel::SubCategories {
            main: main.map(Category::from),
            category: category.map(Category::from),
            rows: category
                .map(|category| category.sub_categories.clone())
                .unwrap_or_default(),
        }
    }
}
