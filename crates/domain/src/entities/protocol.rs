use serde::{Deserialize, Serialize};

/// A DEX protocol (deployment family) that owns pools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    pub id: String,
    pub name: String,
    pub url: String,
    pub logo_url: String,
}

impl Protocol {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        logo_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            logo_url: logo_url.into(),
        }
    }
}
