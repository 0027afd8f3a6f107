// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Company-side coupon management.

use super::transport::Transport;
use crate::error::Result;
use crate::models::{Company, Coupon};

/// Coupon calls available to a signed-in company.
#[derive(Clone)]
pub struct CompanyService {
    transport: Transport,
}

impl CompanyService {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Every coupon on offer, from every company. This is the public
    /// catalog endpoint, so customers browse through it too.
    pub async fn get_all_coupons(&self) -> Result<Vec<Coupon>> {
        self.transport.get_json("/customer/allcoup").await
    }

    /// Coupons owned by the signed-in company.
    pub async fn get_company_coupons(&self) -> Result<Vec<Coupon>> {
        self.transport.get_json("/company/allcompanycoup").await
    }

    pub async fn get_company_details(&self, id: u64) -> Result<Company> {
        self.transport
            .get_json(&format!("/company/compdetails/{}", id))
            .await
    }

    pub async fn get_one_coupon(&self, id: u64) -> Result<Coupon> {
        self.transport.get_json(&format!("/company/coup/{}", id)).await
    }

    pub async fn add_coupon(&self, coupon: &Coupon) -> Result<Coupon> {
        let created: Coupon = self.transport.post_json("/company/addcoup", coupon).await?;
        tracing::info!(coupon_id = created.id, company_id = created.company.id, "Coupon created");
        Ok(created)
    }

    pub async fn update_coupon(&self, coupon: &Coupon) -> Result<String> {
        let message = self.transport.put_json("/company/updatecoup", coupon).await?;
        tracing::info!(coupon_id = coupon.id, "Coupon updated");
        Ok(message)
    }

    pub async fn delete_coupon(&self, id: u64) -> Result<String> {
        let message = self
            .transport
            .delete(&format!("/company/dcoup/{}", id))
            .await?;
        tracing::info!(coupon_id = id, "Coupon deleted");
        Ok(message)
    }
}
