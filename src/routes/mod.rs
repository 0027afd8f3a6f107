// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.
//!
//! Every page follows the same flow: rebuild the session from cookies, run
//! the role check once, fetch through the services, then render or redirect.
//! A failed fetch is handled uniformly by [`SessionContext::recover`].

pub mod admin;
pub mod auth;
pub mod company;
pub mod customer;
pub mod pages;

use crate::auth::{Access, Guard, RoleResolver};
use crate::error::AppError;
use crate::middleware::session::{clear_notice, peek_notice, put_notice, store_session};
use crate::middleware::SessionContext;
use crate::views::{html, Menu, Mount, Notice};
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Where the defensive logout sends the visitor.
pub const ROOT_PATH: &str = "/";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(pages::routes())
        .merge(auth::routes())
        .merge(admin::routes())
        .merge(company::routes())
        .merge(customer::routes())
        .fallback(pages::not_found)
        .layer(axum::middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

impl SessionContext {
    pub fn resolver(&self) -> RoleResolver<'_> {
        RoleResolver::new(&self.session)
    }

    /// Run the page's role check. Pages that pass get a fresh [`Mount`];
    /// everyone else gets the redirect response.
    pub fn mount(&self, access: Access) -> Result<Mount, Response> {
        match self.resolver().check(access) {
            Guard::Allow => Ok(Mount::new()),
            Guard::Redirect(target) => {
                tracing::debug!(?access, redirect = target, "Page guard redirect");
                let jar = store_session(self.jar.clone(), &self.session, &self.policy);
                Err((jar, Redirect::to(target)).into_response())
            }
        }
    }

    /// Render `body` inside the layout, showing (and consuming) any pending
    /// notice.
    pub fn render(self, title: &str, body: String) -> Response {
        self.render_with_status(StatusCode::OK, title, body)
    }

    pub fn render_with_status(self, status: StatusCode, title: &str, body: String) -> Response {
        let notice = peek_notice(&self.jar);
        let menu = Menu::for_resolver(&self.resolver());
        let page = html::layout(title, &menu, notice.as_ref(), &body);

        let jar = clear_notice(self.jar, &self.policy);
        let jar = store_session(jar, &self.session, &self.policy);
        (status, jar, Html(page)).into_response()
    }

    pub fn redirect(self, to: &str) -> Response {
        let jar = store_session(self.jar, &self.session, &self.policy);
        (jar, Redirect::to(to)).into_response()
    }

    /// Redirect and show `notice` on the page the visitor lands on.
    pub fn redirect_with(self, to: &str, notice: Notice) -> Response {
        let jar = put_notice(self.jar, &notice, &self.policy);
        let jar = store_session(jar, &self.session, &self.policy);
        (jar, Redirect::to(to)).into_response()
    }

    /// Handle a failed service call: unknown entities get the not-found page,
    /// everything else the defensive logout.
    pub async fn fail(self, err: AppError) -> Response {
        if let AppError::NotFound(what) = &err {
            tracing::debug!(what = %what, "Entity not found");
            return pages::not_found(self).await;
        }
        self.recover(err).await
    }

    /// Defensive logout after a failed fetch or mutation: tell the server
    /// (best effort), drop the session and its caches, show the error and go
    /// to the root.
    pub async fn recover(self, err: AppError) -> Response {
        tracing::warn!(error = %err, "Request to the coupon API failed, logging out");
        self.state.caches.discard(&self.session);
        if self.session.has_token() {
            // Failures are logged by the service; the session is cleared either way.
            let _ = self.state.auth_service(&self.session).logout().await;
        }
        self.session.clear_session();
        let notice = Notice::error(err.user_message());
        self.redirect_with(ROOT_PATH, notice)
    }
}
