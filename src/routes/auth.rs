// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, signup and logout.

use axum::{response::Response, routing::get, routing::post, Form, Router};
use std::sync::Arc;

use crate::auth::LOGIN_PATH;
use crate::error::AppError;
use crate::middleware::SessionContext;
use crate::models::{CustomerForm, FieldErrors, LoginForm};
use crate::views::{pages, Notice};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
}

/// Message for a failed login or signup. The server's own text is shown even
/// for 401s, since it explains what was wrong with the credentials.
fn rejection_message(err: &AppError) -> String {
    match err {
        AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        other => other.user_message(),
    }
}

/// Flagged sessions go straight home; an unreadable session was already
/// purged when the cookies were loaded.
async fn login_page(ctx: SessionContext) -> Response {
    if let Some(client_type) = ctx.resolver().client_type() {
        return ctx.redirect(client_type.home_path());
    }
    ctx.render("Login", pages::login(&LoginForm::default(), &FieldErrors::default()))
}

async fn login(ctx: SessionContext, Form(form): Form<LoginForm>) -> Response {
    let (email, password, client_type) = match form.credentials() {
        Ok(credentials) => credentials,
        Err(errors) => return ctx.render("Login", pages::login(&form, &errors)),
    };

    match ctx
        .state
        .auth_service(&ctx.session)
        .login(&email, &password, client_type)
        .await
    {
        Ok(claims) => {
            let home = claims.client_type.home_path();
            ctx.redirect_with(home, Notice::success(format!("Welcome back, {}!", claims.email)))
        }
        Err(e) => {
            tracing::info!(error = %e, %client_type, "Login rejected");
            let notice = Notice::error(rejection_message(&e));
            ctx.redirect_with(LOGIN_PATH, notice)
        }
    }
}

async fn signup_page(ctx: SessionContext) -> Response {
    ctx.render(
        "Sign up",
        pages::signup(&CustomerForm::default(), &FieldErrors::default()),
    )
}

async fn signup(ctx: SessionContext, Form(form): Form<CustomerForm>) -> Response {
    let customer = match form.to_customer(0, Vec::new()) {
        Ok(customer) => customer,
        Err(errors) => return ctx.render("Sign up", pages::signup(&form, &errors)),
    };

    match ctx.state.auth_service(&ctx.session).sign_up(&customer).await {
        Ok(_) => ctx.redirect_with(
            LOGIN_PATH,
            Notice::success("You have successfully registered!"),
        ),
        Err(e) => {
            tracing::info!(error = %e, "Signup rejected");
            ctx.redirect_with("/signup", Notice::error(rejection_message(&e)))
        }
    }
}

/// Explicit logout also drops the session's entity caches.
async fn logout(ctx: SessionContext) -> Response {
    ctx.state.caches.discard(&ctx.session);
    // The service clears the session even when the server call fails.
    let _ = ctx.state.auth_service(&ctx.session).logout().await;
    tracing::info!("Signed out");
    ctx.redirect_with(LOGIN_PATH, Notice::info("You have been logged out."))
}
