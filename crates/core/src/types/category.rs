//! Product category enum.

use serde::{Deserialize, Serialize};

/// The fixed set of store categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Electronics,
        Self::Clothing,
        Self::Books,
        Self::Home,
        Self::Sports,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electronics => write!(f, "electronics"),
            Self::Clothing => write!(f, "clothing"),
            Self::Books => write!(f, "books"),
            Self::Home => write!(f, "home"),
            Self::Sports => write!(f, "sports"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" => Ok(Self::Electronics),
            "clothing" => Ok(Self::Clothing),
            "books" => Ok(Self::Books),
            "home" => Ok(Self::Home),
            "sports" => Ok(Self::Sports),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
