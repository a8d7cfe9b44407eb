//! Category and catalog-entry models
//!
//! A `Category` is the lightweight value every transaction carries
//! around; a `YnabCategory` is a richer catalog entry fetched from the
//! remote ledger and used only during inference.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use crate::error::{ReconError, ReconResult};

/// Where a `Category` value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    /// Assigned directly to a transaction in YNAB
    YnabAssigned,
    /// Produced by this crate's inference pipeline
    BankInferred,
    /// The canonical "no category" sentinel
    Unknown,
}

/// A category as carried on a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub category_type: CategoryType,
}

impl Category {
    /// Construct a category, rejecting a blank id or name
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        category_type: CategoryType,
    ) -> ReconResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ReconError::invalid_argument("category name must not be blank"));
        }
        Ok(Self {
            id,
            name,
            category_type,
        })
    }

    /// The canonical sentinel for "no category assigned"
    pub fn unknown() -> Self {
        Self {
            id: CategoryId::new("unknown").expect("literal id is non-blank"),
            name: "Uncategorized".to_string(),
            category_type: CategoryType::Unknown,
        }
    }

    /// Build a bank-inferred category from a display name, deriving its
    /// id deterministically as `"inferred_" + lower(name with runs of
    /// whitespace collapsed to '_')`
    pub fn inferred(name: impl Into<String>) -> ReconResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ReconError::invalid_argument("category name must not be blank"));
        }
        let slug = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let id = CategoryId::new(format!("inferred_{slug}"))?;
        Ok(Self {
            id,
            name,
            category_type: CategoryType::BankInferred,
        })
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }

    /// Two categories are similar iff equal, or their names match
    /// case-insensitively
    pub fn is_similar_to(&self, other: &Category) -> bool {
        self == other || self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A category as it exists in the remote ledger's catalog, used only
/// during category inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YnabCategory {
    pub id: CategoryId,
    pub name: String,
    pub group_id: String,
    pub group_name: String,
    pub is_hidden: bool,
    pub is_deleted: bool,
}

impl YnabCategory {
    /// Available for inference iff not hidden and not deleted
    pub fn is_available(&self) -> bool {
        !self.is_hidden && !self.is_deleted
    }

    /// Lowercased keywords a transaction's text is checked against
    pub fn inference_keywords(&self) -> [String; 3] {
        let name = self.name.to_lowercase();
        let group = self.group_name.to_lowercase();
        let combined = format!("{group}: {name}");
        [name, group, combined]
    }

    /// Similarity score of `text` against this category, per spec.md §3
    pub fn similarity(&self, text: Option<&str>) -> f64 {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t.to_lowercase(),
            _ => return 0.0,
        };

        let name_lower = self.name.to_lowercase();
        if text.contains(&name_lower) {
            return 1.0;
        }

        let group_lower = self.group_name.to_lowercase();
        if text.contains(&group_lower) {
            return 0.7;
        }

        if name_lower
            .split_whitespace()
            .any(|word| word.len() >= 3 && text.contains(word))
        {
            return 0.5;
        }

        0.0
    }

    /// Convert to the lightweight `Category` carried by transactions
    pub fn to_category(&self) -> Category {
        Category {
            id: self.id.clone(),
            name: self.name.clone(),
            category_type: CategoryType::YnabAssigned,
        }
    }
}
