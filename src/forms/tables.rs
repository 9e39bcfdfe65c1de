//! Forms posted by the table search box and filter bar.

use serde::Deserialize;
use validator::Validate;

use crate::domain::category::CategoryLevel;
use crate::domain::order::{OrderSort, OrderStatus};
use crate::domain::types::{CategoryId, FilterDate, MainCategoryId, SubCategoryId};
use crate::domain::user::UserStatus;
use crate::dto::tables::{FilterField, FilterRule, TableKind};
use crate::forms::FormError;

/// Longest search text accepted from the search box.
pub const MAX_SEARCH_LEN: u64 = 200;

/// Search box submission. `return_query` carries the table state the form
/// was rendered with.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(length(max = MAX_SEARCH_LEN))]
    pub q: String,
    #[serde(default)]
    pub return_query: String,
}

/// Body of the forms that only need to know where they came from.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub return_query: String,
}

/// Filter bar submission. Keys depend on the table, so the body is kept as
/// ordered pairs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FiltersForm {
    pub return_query: String,
    pub values: Vec<(String, String)>,
}

impl FiltersForm {
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        let pairs: Vec<(String, String)> =
            serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))?;

        let mut form = FiltersForm::default();
        for (key, value) in pairs {
            if key == "return_query" {
                form.return_query = value;
            } else {
                form.values.push((key, value));
            }
        }
        Ok(form)
    }

    /// Validates every submitted key the table declares. Undeclared keys are
    /// dropped. `None` means the filter is cleared.
    pub fn validate_for(
        &self,
        kind: TableKind,
    ) -> Result<Vec<(&'static str, Option<String>)>, FormError> {
        let mut accepted: Vec<(&'static str, Option<String>)> = Vec::new();
        for (key, value) in &self.values {
            let Some(field) = kind.filter(key) else {
                log::warn!("Ignoring undeclared filter {key:?} for table {kind}");
                continue;
            };
            if accepted.iter().any(|(seen, _)| *seen == field.key) {
                continue;
            }
            accepted.push((field.key, normalize_filter(field, value)?));
        }
        Ok(accepted)
    }
}

/// Canonical URL value of a filter, or `None` when it selects "all".
pub fn normalize_filter(field: &FilterField, raw: &str) -> Result<Option<String>, FormError> {
    let value = raw.trim();
    let invalid = |source| FormError::InvalidField {
        field: field.label,
        source,
    };

    if value.is_empty() {
        return Ok(None);
    }

    let normalized = match field.rule {
        FilterRule::Date => value.parse::<FilterDate>().map_err(invalid)?.to_string(),
        FilterRule::OrderStatus if value == "all" => return Ok(None),
        FilterRule::OrderStatus => value.parse::<OrderStatus>().map_err(invalid)?.to_string(),
        FilterRule::OrderSort => value.parse::<OrderSort>().map_err(invalid)?.to_string(),
        FilterRule::UserStatus if value == "all" => return Ok(None),
        FilterRule::UserStatus => value
            .parse::<UserStatus>()
            .map_err(invalid)?
            .code()
            .to_string(),
        FilterRule::Category(CategoryLevel::Main) => {
            value.parse::<MainCategoryId>().map_err(invalid)?.to_string()
        }
        FilterRule::Category(CategoryLevel::Category) => {
            value.parse::<CategoryId>().map_err(invalid)?.to_string()
        }
        FilterRule::Category(CategoryLevel::Sub) => {
            value.parse::<SubCategoryId>().map_err(invalid)?.to_string()
        }
    };
    Ok(Some(normalized))
}

/// Both ends of a date range, when present, must be ordered.
pub fn check_date_range(start: Option<&str>, end: Option<&str>) -> Result<(), FormError> {
    let start = start.and_then(|value| value.parse::<FilterDate>().ok());
    let end = end.and_then(|value| value.parse::<FilterDate>().ok());
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(FormError::DateRange),
        _ => Ok(()),
    }
}
