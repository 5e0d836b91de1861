use serde::{Deserialize, Serialize};

use crate::constants::CATEGORY_COUNT;
use crate::error::BalanceError;

/// One of the four life-balance dimensions. Closed set, fixed display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Relationships,
    Spiritual,
    Health,
}

impl Category {
    /// Display order. Determines slice placement and must be stable across renders.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Work,
        Category::Relationships,
        Category::Spiritual,
        Category::Health,
    ];

    /// Lowercase wire/CLI key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Relationships => "relationships",
            Self::Spiritual => "spiritual",
            Self::Health => "health",
        }
    }

    /// Position in display order.
    pub fn index(self) -> usize {
        match self {
            Self::Work => 0,
            Self::Relationships => 1,
            Self::Spiritual => 2,
            Self::Health => 3,
        }
    }

    /// Canonical descriptor for this category.
    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORIES[self.index()]
    }
}

impl std::str::FromStr for Category {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "relationships" => Ok(Self::Relationships),
            "spiritual" => Ok(Self::Spiritual),
            "health" => Ok(Self::Health),
            other => Err(BalanceError::UnknownCategory(other.to_string())),
        }
    }
}

/// Static display metadata for one category. Supplied to geometry and
/// rendering as configuration; constant for the process lifetime.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
}

/// Canonical descriptor table in display order.
pub const CATEGORIES: [CategoryInfo; CATEGORY_COUNT] = [
    CategoryInfo {
        category: Category::Work,
        label: "Work/Career",
        color: "#3B82F6",
    },
    CategoryInfo {
        category: Category::Relationships,
        label: "Relationships/Social",
        color: "#EC4899",
    },
    CategoryInfo {
        category: Category::Spiritual,
        label: "Spiritual",
        color: "#8B5CF6",
    },
    CategoryInfo {
        category: Category::Health,
        label: "Health",
        color: "#10B981",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_is_stable() {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(keys, ["work", "relationships", "spiritual", "health"]);
    }

    #[test]
    fn test_index_matches_display_order() {
        for (i, cat) in Category::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
    }

    #[test]
    fn test_descriptor_table_aligned_with_order() {
        for (info, cat) in CATEGORIES.iter().zip(Category::ALL) {
            assert_eq!(info.category, cat);
            assert!(info.color.starts_with('#'));
            assert!(!info.label.is_empty());
        }
    }

    #[test]
    fn test_from_str_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("career".parse::<Category>().is_err());
        assert!("Work".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Category::Relationships).unwrap();
        assert_eq!(json, "\"relationships\"");
        let back: Category = serde_json::from_str("\"health\"").unwrap();
        assert_eq!(back, Category::Health);
    }
}
