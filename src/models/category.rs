// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coupon categories. The set is fixed; the storefront never fetches it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six coupon categories, each with a stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CategoryRecord", into = "CategoryRecord")]
pub enum Category {
    Food,
    Fashion,
    Cinema,
    Spa,
    Tech,
    Sport,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Fashion,
        Category::Cinema,
        Category::Spa,
        Category::Tech,
        Category::Sport,
    ];

    pub fn id(self) -> u32 {
        match self {
            Category::Food => 1,
            Category::Fashion => 2,
            Category::Cinema => 3,
            Category::Spa => 4,
            Category::Tech => 5,
            Category::Sport => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Fashion => "Fashion",
            Category::Cinema => "Cinema",
            Category::Spa => "Spa",
            Category::Tech => "Tech",
            Category::Sport => "Sport",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

/// Wire shape of a category: `{ "id": 1, "name": "Food" }`.
#[derive(Debug, Serialize, Deserialize)]
struct CategoryRecord {
    id: u32,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = UnknownCategory;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        if let Some(category) = Category::from_id(record.id) {
            return Ok(category);
        }
        match record.name {
            Some(name) => name.parse(),
            None => Err(UnknownCategory(format!("id {}", record.id))),
        }
    }
}

impl From<Category> for CategoryRecord {
    fn from(category: Category) -> Self {
        Self {
            id: category.id(),
            name: Some(category.name().to_string()),
        }
    }
}
