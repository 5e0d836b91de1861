use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::constants::{CATEGORY_COUNT, TOTAL};
use crate::error::BalanceError;

/// The four category percentages.
///
/// Nominally every value is an integer in [0,100] and the four sum to exactly
/// 100; [`rebalance`](crate::rebalance::rebalance) maintains that invariant.
/// The state is replaced wholesale on each interaction, never edited in place.
///
/// Wire shape is the flat lowercase map
/// `{"work":25,"relationships":25,"spiritual":25,"health":25}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Balance {
    pub work: i32,
    pub relationships: i32,
    pub spiritual: i32,
    pub health: i32,
}

impl Default for Balance {
    /// Uniform split: 25 per category.
    fn default() -> Self {
        Self::new(25, 25, 25, 25)
    }
}

impl Balance {
    pub fn new(work: i32, relationships: i32, spiritual: i32, health: i32) -> Self {
        Self {
            work,
            relationships,
            spiritual,
            health,
        }
    }

    pub fn get(&self, category: Category) -> i32 {
        match category {
            Category::Work => self.work,
            Category::Relationships => self.relationships,
            Category::Spiritual => self.spiritual,
            Category::Health => self.health,
        }
    }

    /// Copy with one category replaced.
    pub fn with(mut self, category: Category, value: i32) -> Self {
        match category {
            Category::Work => self.work = value,
            Category::Relationships => self.relationships = value,
            Category::Spiritual => self.spiritual = value,
            Category::Health => self.health = value,
        }
        self
    }

    /// Values in display order.
    pub fn values(&self) -> [i32; CATEGORY_COUNT] {
        [self.work, self.relationships, self.spiritual, self.health]
    }

    pub fn from_values(values: [i32; CATEGORY_COUNT]) -> Self {
        let [work, relationships, spiritual, health] = values;
        Self::new(work, relationships, spiritual, health)
    }

    pub fn total(&self) -> i32 {
        self.values().iter().sum()
    }

    /// Check the post-rebalance invariant: every value in [0,100], sum 100.
    ///
    /// Meant for externally supplied states; rebalancer output is valid by
    /// construction and is not re-checked.
    pub fn validate(&self) -> Result<(), BalanceError> {
        for cat in Category::ALL {
            let value = self.get(cat);
            if !(0..=TOTAL).contains(&value) {
                return Err(BalanceError::OutOfRange {
                    category: cat,
                    value,
                });
            }
        }
        let total = self.total();
        if total != TOTAL {
            return Err(BalanceError::BadTotal { total });
        }
        Ok(())
    }

    /// Parse a state from its JSON wire form. Non-integer values, unknown or
    /// missing keys are rejected here, before any rebalance runs.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
