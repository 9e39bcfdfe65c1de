use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{ExternalId, TypeConstraintError};

/// Storefront customer account as listed in the admin users screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(default)]
    pub id: ExternalId,
    pub user_id: ExternalId,
    pub email: String,
    #[serde(default)]
    pub role: String,
    /// `active`, `removed` or another free-form state.
    pub status: String,
}

impl UserAccount {
    pub fn status_tone(&self) -> &'static str {
        match self.status.as_str() {
            "active" => "success",
            "removed" => "danger",
            _ => "secondary",
        }
    }
}

/// Account state accepted by the `statusId` query key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Inactive = 0,
    Active = 1,
    Suspended = 3,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Inactive => "Inactive",
            UserStatus::Active => "Active",
            UserStatus::Suspended => "Suspended",
        }
    }
}

impl FromStr for UserStatus {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "0" => Ok(UserStatus::Inactive),
            "1" => Ok(UserStatus::Active),
            "3" => Ok(UserStatus::Suspended),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown user status {other:?}"
            ))),
        }
    }
}
