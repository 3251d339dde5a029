use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// One listed item to be downloaded
///
/// Built once per run by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Identifier captured from the detail address; unique within one listing
    pub id: String,
    /// Display label, not guaranteed unique
    pub name: String,
    /// Detail page, resolved against the listing page's origin
    pub detail_address: Url,
}

impl ItemDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, detail_address: Url) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            detail_address,
        }
    }
}

impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)
    }
}
