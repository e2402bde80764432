//! What happens to products when their category is deleted.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Foreign-key action applied when deleting a category that still owns
/// products.
///
/// There is no "set null" variant: a product's `category_id` is mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryDeletePolicy {
    /// Refuse to delete while any product references the category.
    #[default]
    Restrict,
    /// Delete the referencing products together with the category.
    Cascade,
}

impl CategoryDeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryDeletePolicy::Restrict => "restrict",
            CategoryDeletePolicy::Cascade => "cascade",
        }
    }
}

impl fmt::Display for CategoryDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restrict" => Ok(CategoryDeletePolicy::Restrict),
            "cascade" => Ok(CategoryDeletePolicy::Cascade),
            other => Err(format!("unknown category delete policy: {other}")),
        }
    }
}
