//! DTOs describing the admin tables and the data their template needs.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::category::CategoryLevel;
use crate::table::{SearchMode, TableView};

/// One admin list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Products,
    Orders,
    Users,
    Contents,
    PromoCodes,
    Categories,
    MainCategories,
    SubCategories,
    /// Drill-down through the nested catalog tree.
    Hierarchy,
}

/// Query key selecting a main category on the hierarchy screen.
pub const HIERARCHY_MAIN_KEY: &str = "main-category";
/// Query key selecting a category inside the selected main category.
pub const HIERARCHY_CATEGORY_KEY: &str = "category";
/// Query key of the last sub-category picked; carried along, never read.
pub const HIERARCHY_SUB_KEY: &str = "sub-category";

/// How a filter value is validated and rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterRule {
    /// `YYYY-MM-DD` calendar day.
    Date,
    /// Order shipping status code, or empty for all.
    OrderStatus,
    /// Order sort option code.
    OrderSort,
    /// User account status code, or empty for all.
    UserStatus,
    /// Positive category id picked from the given hierarchy level.
    Category(CategoryLevel),
}

/// A caller-defined query key a table accepts besides page, size and search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub rule: FilterRule,
}

const PRODUCT_FILTERS: &[FilterField] = &[
    FilterField {
        key: "MainCategoryId",
        label: "Main category",
        rule: FilterRule::Category(CategoryLevel::Main),
    },
    FilterField {
        key: "CategoryId",
        label: "Category",
        rule: FilterRule::Category(CategoryLevel::Category),
    },
    FilterField {
        key: "SubCategoryId",
        label: "Sub category",
        rule: FilterRule::Category(CategoryLevel::Sub),
    },
];

const ORDER_FILTERS: &[FilterField] = &[
    FilterField {
        key: "startDate",
        label: "Start date",
        rule: FilterRule::Date,
    },
    FilterField {
        key: "endDate",
        label: "End date",
        rule: FilterRule::Date,
    },
    FilterField {
        key: "statusFilter",
        label: "Shipping status",
        rule: FilterRule::OrderStatus,
    },
    FilterField {
        key: "sortOption",
        label: "Sort",
        rule: FilterRule::OrderSort,
    },
];

const USER_FILTERS: &[FilterField] = &[FilterField {
    key: "statusId",
    label: "Status",
    rule: FilterRule::UserStatus,
}];

impl TableKind {
    pub const ALL: [TableKind; 9] = [
        TableKind::Products,
        TableKind::Orders,
        TableKind::Users,
        TableKind::Contents,
        TableKind::PromoCodes,
        TableKind::MainCategories,
        TableKind::Categories,
        TableKind::SubCategories,
        TableKind::Hierarchy,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            TableKind::Products => "products",
            TableKind::Orders => "orders",
            TableKind::Users => "users",
            TableKind::Contents => "contents",
            TableKind::PromoCodes => "promocodes",
            TableKind::Categories => "categories",
            TableKind::MainCategories => "main-categories",
            TableKind::SubCategories => "sub-categories",
            TableKind::Hierarchy => "hierarchy-categories",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TableKind::Products => "Products",
            TableKind::Orders => "Orders",
            TableKind::Users => "Users",
            TableKind::Contents => "Contents",
            TableKind::PromoCodes => "Promocodes",
            TableKind::Categories => "Categories",
            TableKind::MainCategories => "Main Categories",
            TableKind::SubCategories => "Sub Categories",
            TableKind::Hierarchy => "Hierarchy Categories",
        }
    }

    pub fn path(self) -> String {
        format!("/app/{}", self.slug())
    }

    /// Products, orders and users delegate search to the API. Every other
    /// table matches rows in memory: the full set for unpaged listings, the
    /// loaded page for contents, whose endpoint has no search parameter.
    pub fn search_mode(self) -> SearchMode {
        match self {
            TableKind::Products | TableKind::Orders | TableKind::Users => SearchMode::Server,
            TableKind::Contents
            | TableKind::PromoCodes
            | TableKind::Categories
            | TableKind::MainCategories
            | TableKind::SubCategories
            | TableKind::Hierarchy => SearchMode::Client,
        }
    }

    pub fn filters(self) -> &'static [FilterField] {
        match self {
            TableKind::Products => PRODUCT_FILTERS,
            TableKind::Orders => ORDER_FILTERS,
            TableKind::Users => USER_FILTERS,
            _ => &[],
        }
    }

    pub fn filter(self, key: &str) -> Option<&'static FilterField> {
        self.filters().iter().find(|field| field.key == key)
    }
}

impl FromStr for TableKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == value)
            .ok_or(())
    }
}

impl Display for TableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Link to a table on the dashboard and in the navigation bar.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableLink {
    pub slug: &'static str,
    pub title: &'static str,
    pub href: String,
}

impl From<TableKind> for TableLink {
    fn from(kind: TableKind) -> Self {
        Self {
            slug: kind.slug(),
            title: kind.title(),
            href: kind.path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A filter control as rendered in the filter bar.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterFieldView {
    pub key: &'static str,
    pub label: &'static str,
    /// `date` or `select`.
    pub input: &'static str,
    pub value: String,
    pub options: Vec<FilterOption>,
}

/// Data required to render `table/index.html`.
#[derive(Debug, Clone, Serialize)]
pub struct TablePageData {
    pub slug: &'static str,
    /// Heading of the screen. The hierarchy screen names its open level.
    pub title: String,
    /// Open branch of a drill-down, e.g. `Women / Shoes`.
    pub breadcrumb: Option<String>,
    /// Link one drill-down level up.
    pub up_href: Option<String>,
    pub path: String,
    pub table: TableView,
    pub filters: Vec<FilterFieldView>,
    /// Banner shown when the data source failed.
    pub error: Option<String>,
}
