use serde::{Deserialize, Serialize};

/// Static help page managed by the content editor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub name: String,
    #[serde(default)]
    pub title: String,
}
