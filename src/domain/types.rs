//! Strongly-typed value objects used by domain entities and list filters.
//!
//! Filter values arrive as raw query-string text. These wrappers validate them
//! once so that the repository layer can forward them as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided value is not a number.
    #[error("value must be a number")]
    NotANumber,
    /// Provided date is not in `YYYY-MM-DD` form.
    #[error("date must use the YYYY-MM-DD format")]
    InvalidDate,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let raw = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| TypeConstraintError::NotANumber)?;
                Self::new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(MainCategoryId, "Identifier of a top-level category.");
id_newtype!(CategoryId, "Identifier of a category.");
id_newtype!(SubCategoryId, "Identifier of a sub-category.");
id_newtype!(ClothingGenderId, "Identifier of a clothing gender facet.");
id_newtype!(PriceRangeId, "Identifier of a product price range.");
id_newtype!(ColorId, "Identifier of a product color.");
id_newtype!(ProductSortId, "Identifier of a product search ordering.");

/// Identifier assigned by the remote API. Some endpoints send numbers, others
/// strings; both are kept as text.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash, Default)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExternalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => Self(value),
            Raw::Signed(value) => Self(value.to_string()),
            Raw::Unsigned(value) => Self(value.to_string()),
        })
    }
}

/// Calendar date used by range filters, written as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilterDate(NaiveDate);

impl FilterDate {
    pub fn get(self) -> NaiveDate {
        self.0
    }
}

impl FromStr for FilterDate {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.len() != 10 {
            return Err(TypeConstraintError::InvalidDate);
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidDate)
    }
}

impl Display for FilterDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
