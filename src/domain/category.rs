//! Category facet for search results.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The structural role an indexed element plays on the page.
///
/// `All` doubles as the "no filter" facet when querying and as the bucket
/// for elements that fit none of the other roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Classes,
    Functions,
    Modules,
    Examples,
    #[default]
    All,
}

impl Category {
    /// Every facet, in the order a filter bar would show them.
    pub const ALL_FACETS: [Category; 5] = [
        Category::All,
        Category::Modules,
        Category::Classes,
        Category::Functions,
        Category::Examples,
    ];

    /// Lowercase facet name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Functions => "functions",
            Self::Modules => "modules",
            Self::Examples => "examples",
            Self::All => "all",
        }
    }

    /// Whether an entry of category `entry` passes this facet.
    pub fn admits(&self, entry: Category) -> bool {
        *self == Category::All || *self == entry
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classes" => Ok(Self::Classes),
            "functions" => Ok(Self::Functions),
            "modules" => Ok(Self::Modules),
            "examples" => Ok(Self::Examples),
            "all" | "" => Ok(Self::All),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
