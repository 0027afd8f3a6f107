// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser cookies <-> [`Session`].
//!
//! Cookie layout:
//! - `storefront_token`: persisted bearer token (HttpOnly, Max-Age in days)
//! - `storefront_session`: logged-in flag, a browser-session cookie
//! - `storefront_lupd`: epoch milliseconds of the last API exchange
//! - `storefront_notice`: one-shot notification for the next rendered page

use crate::auth::decode_token;
use crate::config::Config;
use crate::session::Session;
use crate::views::Notice;
use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;
use std::sync::Arc;

pub const TOKEN_COOKIE: &str = "storefront_token";
pub const SESSION_COOKIE: &str = "storefront_session";
pub const LAST_UPDATE_COOKIE: &str = "storefront_lupd";
pub const NOTICE_COOKIE: &str = "storefront_notice";

/// Attributes shared by every cookie the storefront sets.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    secure: bool,
    token_days: i64,
}

impl CookiePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secure: config.secure_cookies(),
            token_days: config.token_cookie_days,
        }
    }

    fn build(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    fn persistent(&self, name: &'static str, value: String) -> Cookie<'static> {
        let mut cookie = self.build(name, value);
        cookie.set_max_age(time::Duration::days(self.token_days));
        cookie
    }

    /// Removal cookie with the same attributes the cookie was created with.
    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new());
        cookie.set_max_age(time::Duration::ZERO);
        cookie
    }
}

/// Rebuild the session from request cookies.
///
/// A flagged session whose token cannot be decoded is purged on the spot.
pub fn load_session(jar: &CookieJar) -> Session {
    let token = jar.get(TOKEN_COOKIE).map(|c| c.value().to_string());
    let flagged = jar.get(SESSION_COOKIE).is_some_and(|c| c.value() == "1");
    let last_update = jar
        .get(LAST_UPDATE_COOKIE)
        .and_then(|c| c.value().parse().ok());

    let session = Session::restore(token, flagged, last_update);
    if session.is_session_flagged() {
        let readable = session
            .token()
            .map(|t| decode_token(&t).is_ok())
            .unwrap_or(false);
        if !readable {
            tracing::warn!("Purging session with an unreadable token");
            session.clear_session();
        }
    }
    session
}

/// Write the session back. Cookies that should no longer exist are removed,
/// but only if the browser actually sent them.
pub fn store_session(mut jar: CookieJar, session: &Session, policy: &CookiePolicy) -> CookieJar {
    let drop_cookie = |jar: CookieJar, name: &'static str| {
        if jar.get(name).is_some() {
            jar.add(policy.removal(name))
        } else {
            jar
        }
    };

    jar = match session.token() {
        Some(token) => {
            let unchanged = jar.get(TOKEN_COOKIE).is_some_and(|c| c.value() == token);
            if unchanged {
                jar
            } else {
                jar.add(policy.persistent(TOKEN_COOKIE, token))
            }
        }
        None => drop_cookie(jar, TOKEN_COOKIE),
    };

    jar = if session.is_session_flagged() {
        jar.add(policy.build(SESSION_COOKIE, "1".to_string()))
    } else {
        drop_cookie(jar, SESSION_COOKIE)
    };

    match session.last_update() {
        Some(millis) => jar.add(policy.build(LAST_UPDATE_COOKIE, millis.to_string())),
        None => drop_cookie(jar, LAST_UPDATE_COOKIE),
    }
}

/// Read the pending notice, if any.
pub fn peek_notice(jar: &CookieJar) -> Option<Notice> {
    jar.get(NOTICE_COOKIE).and_then(|c| Notice::decode(c.value()))
}

/// Queue `notice` for the next rendered page.
pub fn put_notice(jar: CookieJar, notice: &Notice, policy: &CookiePolicy) -> CookieJar {
    jar.add(policy.build(NOTICE_COOKIE, notice.encode()))
}

/// Mark the pending notice as shown.
pub fn clear_notice(jar: CookieJar, policy: &CookiePolicy) -> CookieJar {
    if jar.get(NOTICE_COOKIE).is_some() {
        jar.add(policy.removal(NOTICE_COOKIE))
    } else {
        jar
    }
}

/// Per-request session context, extracted from the cookies of every page
/// request.
pub struct SessionContext {
    pub state: Arc<AppState>,
    pub session: Session,
    pub jar: CookieJar,
    pub policy: CookiePolicy,
}

impl FromRequestParts<Arc<AppState>> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = load_session(&jar);
        Ok(Self {
            state: state.clone(),
            session,
            jar,
            policy: CookiePolicy::from_config(&state.config),
        })
    }
}
