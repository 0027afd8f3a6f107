//! Customer model as exchanged with the coupon API.

use crate::cache::Keyed;
use crate::models::Coupon;
use serde::{Deserialize, Serialize};

/// A customer and the coupons they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Server-assigned id (0 before creation)
    #[serde(default)]
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Only ever sent to the server; never rendered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Purchased coupons (a set on the server; ids are unique)
    #[serde(default, deserialize_with = "deserialize_coupons")]
    pub coupons: Vec<Coupon>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn owns_coupon(&self, coupon_id: u64) -> bool {
        self.coupons.iter().any(|c| c.id == coupon_id)
    }
}

impl Keyed for Customer {
    fn key(&self) -> u64 {
        self.id
    }
}

/// Accepts `null` as well as a list, and drops duplicate coupon ids.
fn deserialize_coupons<'de, D>(deserializer: D) -> Result<Vec<Coupon>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let coupons: Option<Vec<Coupon>> = Option::deserialize(deserializer)?;
    let mut unique: Vec<Coupon> = Vec::new();
    for coupon in coupons.unwrap_or_default() {
        if !unique.iter().any(|c| c.id == coupon.id) {
            unique.push(coupon);
        }
    }
    Ok(unique)
}
