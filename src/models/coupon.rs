// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coupon model as exchanged with the coupon API.

use super::{Category, Company};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Image shown for coupons without one of their own.
pub const PLACEHOLDER_IMAGE: &str = "/images/coupons/noImage.jpeg";

/// A discount coupon. Always belongs to exactly one company and one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Server-assigned id (0 before creation)
    #[serde(default)]
    pub id: u64,
    pub company: Company,
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Remaining stock
    pub amount: i32,
    pub price: f64,
    /// Image URL (may be empty)
    #[serde(default)]
    pub image: String,
}

impl Coupon {
    pub fn in_stock(&self) -> bool {
        self.amount >= 1
    }

    pub fn image_url(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }
}

/// Customer-side browsing filter: a price ceiling and an optional category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponFilter {
    pub max_price: f64,
    pub category: Option<Category>,
}

impl Default for CouponFilter {
    fn default() -> Self {
        Self {
            max_price: 100.0,
            category: None,
        }
    }
}

impl CouponFilter {
    pub fn matches(&self, coupon: &Coupon) -> bool {
        coupon.price <= self.max_price && self.category.map_or(true, |c| c == coupon.category)
    }

    /// Keep the coupons that pass the filter, in their original order.
    pub fn apply<'a>(&self, coupons: &'a [Coupon]) -> Vec<&'a Coupon> {
        coupons.iter().filter(|c| self.matches(c)).collect()
    }
}
