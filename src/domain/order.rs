use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{ExternalId, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: ExternalId,
    pub user_email: String,
    /// ISO-8601 timestamp as sent by the API.
    pub order_date: String,
    pub total_amount: f64,
    pub status_name: String,
    #[serde(default)]
    pub items_count: i64,
}

/// Shipping status accepted by the `statusFilter` query key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending = 0,
    Shipped = 1,
    Delivered = 2,
    Cancelled = 3,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Badge tone for a status name as rendered in the orders table.
    pub fn tone_for(status_name: &str) -> &'static str {
        match status_name {
            "Pending" => "warning",
            "Shipped" => "info",
            "Delivered" => "success",
            "Cancelled" => "danger",
            _ => "secondary",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "0" => Ok(OrderStatus::Pending),
            "1" => Ok(OrderStatus::Shipped),
            "2" => Ok(OrderStatus::Delivered),
            "3" => Ok(OrderStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown order status {other:?}"
            ))),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Server-side ordering of the orders list (`sortOption`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OrderSort {
    #[default]
    DateDesc = 0,
    DateAsc = 1,
    AmountDesc = 2,
    AmountAsc = 3,
}

impl OrderSort {
    pub const ALL: [OrderSort; 4] = [
        OrderSort::DateDesc,
        OrderSort::DateAsc,
        OrderSort::AmountDesc,
        OrderSort::AmountAsc,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderSort::DateDesc => "Date ↓ (newest first)",
            OrderSort::DateAsc => "Date ↑ (oldest first)",
            OrderSort::AmountDesc => "Amount ↓ (highest first)",
            OrderSort::AmountAsc => "Amount ↑ (lowest first)",
        }
    }
}

impl FromStr for OrderSort {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "0" => Ok(OrderSort::DateDesc),
            "1" => Ok(OrderSort::DateAsc),
            "2" => Ok(OrderSort::AmountDesc),
            "3" => Ok(OrderSort::AmountAsc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort option {other:?}"
            ))),
        }
    }
}

impl Display for OrderSort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
