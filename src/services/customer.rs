// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Customer-side calls: purchases and owned coupons.

use super::transport::Transport;
use crate::error::Result;
use crate::models::{Coupon, Customer};

#[derive(Clone)]
pub struct CustomerService {
    transport: Transport,
}

impl CustomerService {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Buy one unit of `coupon`. The server decides stock and ownership rules.
    pub async fn purchase_coupon(&self, coupon: &Coupon) -> Result<String> {
        let message = self
            .transport
            .post_json_for_text("/customer/purchcoup", coupon)
            .await?;
        tracing::info!(coupon_id = coupon.id, "Coupon purchased");
        Ok(message)
    }

    /// The signed-in customer, including owned coupons.
    pub async fn get_customer_details(&self) -> Result<Customer> {
        self.transport.get_json("/customer/custdetails").await
    }

    pub async fn get_customer_coupons(&self) -> Result<Vec<Coupon>> {
        self.transport.get_json("/customer/custcoupons").await
    }

    pub async fn get_one_coupon(&self, id: u64) -> Result<Coupon> {
        self.transport.get_json(&format!("/customer/coup/{}", id)).await
    }
}
