use serde::{Deserialize, Serialize};

use crate::domain::types::ExternalId;

/// Id/name pair the API embeds for related entities.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Promo {
    pub code: Option<String>,
    #[serde(default)]
    pub discount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Pricing {
    pub price: f64,
    #[serde(default)]
    pub promo: Option<Promo>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Variation {
    pub code: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ExternalId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub main_category: NamedRef,
    #[serde(default)]
    pub category: NamedRef,
    #[serde(default)]
    pub gender: NamedRef,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub variations: Vec<Variation>,
}
