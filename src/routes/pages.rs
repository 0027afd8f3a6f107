// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public pages: root, about us and not-found.

use crate::auth::{Access, LOGIN_PATH};
use crate::middleware::SessionContext;
use crate::views::pages;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/about_us", get(about_us))
}

/// Signed-in visitors land on their home page, everyone else on the login.
async fn home(ctx: SessionContext) -> Response {
    let target = ctx
        .resolver()
        .client_type()
        .map(|t| t.home_path())
        .unwrap_or(LOGIN_PATH);
    ctx.redirect(target)
}

async fn about_us(ctx: SessionContext) -> Response {
    if let Err(redirect) = ctx.mount(Access::Public) {
        return redirect;
    }
    ctx.render("About us", pages::about_us())
}

pub async fn not_found(ctx: SessionContext) -> Response {
    let home = ctx
        .resolver()
        .client_type()
        .map(|t| t.home_path())
        .unwrap_or(LOGIN_PATH);
    ctx.render_with_status(StatusCode::NOT_FOUND, "Page not found", pages::not_found(home))
}
