use serde::{Deserialize, Serialize};

use crate::domain::types::ExternalId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub promo_code_id: ExternalId,
    /// Percentage off.
    pub discount: f64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub times_used: i64,
    /// `true` while the code can be redeemed.
    #[serde(default)]
    pub status: bool,
}
