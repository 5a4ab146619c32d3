use serde::{Deserialize, Serialize};

/// A course as referenced from a student or a class.
///
/// Only the name is meaningful to the roster views; the identifier is kept so
/// that records round-trip to the backend without losing the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome", default)]
    pub name: String,
}

impl CourseRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}
