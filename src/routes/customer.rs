// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Customer pages, plus the coupon details and profile pages that companies
//! share with customers.

use axum::{
    extract::{Path, Query},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{Access, ClientType};
use crate::middleware::SessionContext;
use crate::models::{Category, CouponFilter};
use crate::views::{pages, Notice};
use crate::AppState;

const CUSTOMER: Access = Access::Only(ClientType::Customer);
const NOT_ADMIN: Access = Access::Except(ClientType::Administrator);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/coupons", get(coupons))
        .route("/coupon/{id}", get(coupon_details))
        .route("/coupon/{id}/purchase", post(purchase))
        .route("/dashboard", get(dashboard))
        .route("/profile", get(profile))
}

/// Catalog filter as typed into the form. Unparseable values fall back to
/// the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    max_price: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl CatalogQuery {
    fn filter(&self) -> CouponFilter {
        let defaults = CouponFilter::default();
        let max_price = self
            .max_price
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(defaults.max_price);
        let category = self
            .category
            .as_deref()
            .and_then(|v| v.parse::<Category>().ok());
        CouponFilter {
            max_price,
            category,
        }
    }
}

async fn coupons(ctx: SessionContext, Query(query): Query<CatalogQuery>) -> Response {
    let mount = match ctx.mount(CUSTOMER) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let all = mount.slot();
    let owned = mount.slot();
    let catalog = ctx.state.company_service(&ctx.session);
    let customer = ctx.state.customer_service(&ctx.session);

    let (all_result, owned_result) = tokio::join!(
        all.fill(catalog.get_all_coupons()),
        owned.fill(customer.get_customer_coupons()),
    );
    if let Err(e) = all_result.and(owned_result) {
        return ctx.fail(e).await;
    }

    let body = pages::coupon_catalog(&all.get(), &owned.get(), &query.filter());
    ctx.render("Coupons", body)
}

async fn coupon_details(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    let mount = match ctx.mount(NOT_ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let coupon = mount.slot();

    if ctx.resolver().is_customer() {
        let owned = mount.slot();
        let customer = ctx.state.customer_service(&ctx.session);
        let (coupon_result, owned_result) = tokio::join!(
            coupon.fill(customer.get_one_coupon(id)),
            owned.fill(customer.get_customer_coupons()),
        );
        if let Err(e) = coupon_result.and(owned_result) {
            return ctx.fail(e).await;
        }
        let body = pages::coupon_details(&coupon.get(), Some(&owned.get()));
        return ctx.render("Coupon", body);
    }

    let company = ctx.state.company_service(&ctx.session);
    if let Err(e) = coupon.fill(company.get_one_coupon(id)).await {
        return ctx.fail(e).await;
    }
    ctx.render("Coupon", pages::coupon_details(&coupon.get(), None))
}

/// Buy one coupon. The coupon is re-read first so the purchase carries the
/// server's current copy.
async fn purchase(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    if let Err(redirect) = ctx.mount(CUSTOMER) {
        return redirect;
    }
    let customer = ctx.state.customer_service(&ctx.session);
    let result = match customer.get_one_coupon(id).await {
        Ok(coupon) => customer.purchase_coupon(&coupon).await.map(|_| coupon),
        Err(e) => Err(e),
    };
    match result {
        Ok(coupon) => ctx.redirect_with(
            "/coupons",
            Notice::success(format!("Coupon: {} successfully purchased!", coupon.title)),
        ),
        Err(e) => ctx.fail(e).await,
    }
}

async fn dashboard(ctx: SessionContext) -> Response {
    let mount = match ctx.mount(CUSTOMER) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let owned = mount.slot();
    let customer = ctx.state.customer_service(&ctx.session);
    if let Err(e) = owned.fill(customer.get_customer_coupons()).await {
        return ctx.fail(e).await;
    }
    ctx.render("Dashboard", pages::dashboard(&owned.get()))
}

async fn profile(ctx: SessionContext) -> Response {
    let mount = match ctx.mount(NOT_ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };

    let claims = match ctx.resolver().claims() {
        Ok(claims) => claims,
        Err(e) => return ctx.fail(e.into()).await,
    };

    if claims.client_type == ClientType::Company {
        let company = mount.slot();
        let service = ctx.state.company_service(&ctx.session);
        if let Err(e) = company.fill(service.get_company_details(claims.id)).await {
            return ctx.fail(e).await;
        }
        return ctx.render("Profile", pages::company_profile(&company.get()));
    }

    let customer = mount.slot();
    let service = ctx.state.customer_service(&ctx.session);
    if let Err(e) = customer.fill(service.get_customer_details()).await {
        return ctx.fail(e).await;
    }
    ctx.render("Profile", pages::customer_profile(&customer.get()))
}
