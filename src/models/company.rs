//! Company model as exchanged with the coupon API.

use crate::cache::Keyed;
use serde::{Deserialize, Serialize};

/// A company that issues coupons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Server-assigned id (0 before creation)
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Only ever sent to the server; never rendered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Keyed for Company {
    fn key(&self) -> u64 {
        self.id
    }
}
