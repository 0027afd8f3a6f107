// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Company pages: the company's own coupons.

use axum::{
    extract::Path,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use std::sync::Arc;

use crate::auth::{Access, ClientType};
use crate::error::Result;
use crate::middleware::SessionContext;
use crate::models::{Company, CouponForm, FieldErrors};
use crate::views::{pages, Notice};
use crate::AppState;

const COMPANY: Access = Access::Only(ClientType::Company);
const HOME: &str = "/our_coupons";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/our_coupons", get(our_coupons))
        .route("/coupon/add", get(add_coupon_page).post(add_coupon))
        .route("/coupon/edit/{id}", get(edit_coupon_page).post(edit_coupon))
        .route("/coupon/{id}/delete", post(delete_coupon))
}

/// The signed-in company, looked up by the id in its token.
async fn current_company(ctx: &SessionContext) -> Result<Company> {
    let claims = ctx.resolver().claims()?;
    ctx.state
        .company_service(&ctx.session)
        .get_company_details(claims.id)
        .await
}

async fn our_coupons(ctx: SessionContext) -> Response {
    let mount = match ctx.mount(COMPANY) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let list = mount.slot();
    let service = ctx.state.company_service(&ctx.session);
    if let Err(e) = list.fill(service.get_company_coupons()).await {
        return ctx.fail(e).await;
    }
    ctx.render("Our coupons", pages::our_coupons(&list.get()))
}

async fn add_coupon_page(ctx: SessionContext) -> Response {
    if let Err(redirect) = ctx.mount(COMPANY) {
        return redirect;
    }
    let body = pages::coupon_form(
        "/coupon/add",
        &CouponForm::default(),
        &FieldErrors::default(),
        false,
    );
    ctx.render("Add coupon", body)
}

async fn add_coupon(ctx: SessionContext, Form(form): Form<CouponForm>) -> Response {
    if let Err(redirect) = ctx.mount(COMPANY) {
        return redirect;
    }
    if let Err(errors) = form.check_fields() {
        return ctx.render(
            "Add coupon",
            pages::coupon_form("/coupon/add", &form, &errors, false),
        );
    }

    let company = match current_company(&ctx).await {
        Ok(company) => company,
        Err(e) => return ctx.fail(e).await,
    };
    let coupon = match form.to_coupon(0, company) {
        Ok(coupon) => coupon,
        Err(errors) => {
            return ctx.render(
                "Add coupon",
                pages::coupon_form("/coupon/add", &form, &errors, false),
            )
        }
    };

    match ctx.state.company_service(&ctx.session).add_coupon(&coupon).await {
        Ok(created) => ctx.redirect_with(
            HOME,
            Notice::success(format!("Coupon {} added successfully", created.title)),
        ),
        Err(e) => ctx.fail(e).await,
    }
}

async fn edit_coupon_page(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    let mount = match ctx.mount(COMPANY) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let coupon = mount.slot();
    let service = ctx.state.company_service(&ctx.session);
    if let Err(e) = coupon.fill(service.get_one_coupon(id)).await {
        return ctx.fail(e).await;
    }
    let form = coupon
        .get()
        .ready()
        .map(|c| CouponForm::from(&c))
        .unwrap_or_default();
    let body = pages::coupon_form(
        &format!("/coupon/edit/{}", id),
        &form,
        &FieldErrors::default(),
        true,
    );
    ctx.render("Edit coupon", body)
}

async fn edit_coupon(
    ctx: SessionContext,
    Path(id): Path<u64>,
    Form(form): Form<CouponForm>,
) -> Response {
    if let Err(redirect) = ctx.mount(COMPANY) {
        return redirect;
    }
    let action = format!("/coupon/edit/{}", id);
    if let Err(errors) = form.check_fields() {
        return ctx.render("Edit coupon", pages::coupon_form(&action, &form, &errors, true));
    }

    let company = match current_company(&ctx).await {
        Ok(company) => company,
        Err(e) => return ctx.fail(e).await,
    };
    let coupon = match form.to_coupon(id, company) {
        Ok(coupon) => coupon,
        Err(errors) => {
            return ctx.render("Edit coupon", pages::coupon_form(&action, &form, &errors, true))
        }
    };

    match ctx.state.company_service(&ctx.session).update_coupon(&coupon).await {
        Ok(message) => {
            let text = if message.trim().is_empty() {
                format!("Coupon {} updated", coupon.title)
            } else {
                message
            };
            ctx.redirect_with(HOME, Notice::success(text))
        }
        Err(e) => ctx.fail(e).await,
    }
}

async fn delete_coupon(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    if let Err(redirect) = ctx.mount(COMPANY) {
        return redirect;
    }
    match ctx.state.company_service(&ctx.session).delete_coupon(id).await {
        Ok(_) => ctx.redirect_with(HOME, Notice::success("Coupon deleted")),
        Err(e) => ctx.fail(e).await,
    }
}
