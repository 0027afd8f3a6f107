// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role resolver: capability checks and redirect targets derived from the
//! session. Every operation here is total and fails closed.

use super::claims::{decode_token, Claims, ClientType, TokenError};
use crate::session::Session;

/// Path of the login page, the target for every logged-out visitor.
pub const LOGIN_PATH: &str = "/login";

/// Who may see a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No session required
    Public,
    /// Exactly this role
    Only(ClientType),
    /// Any signed-in role except this one
    Except(ClientType),
}

/// Outcome of the mount-time check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(&'static str),
}

/// Read-only view over a [`Session`] answering authorization questions.
#[derive(Debug, Clone, Copy)]
pub struct RoleResolver<'a> {
    session: &'a Session,
}

impl<'a> RoleResolver<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// True when this browser session is flagged or a token is persisted.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_session_flagged() || self.session.has_token()
    }

    /// Claims of the current session; only available once the session is flagged.
    pub fn claims(&self) -> Result<Claims, TokenError> {
        if !self.session.is_session_flagged() {
            return Err(TokenError::Missing);
        }
        let token = self.session.token().ok_or(TokenError::Missing)?;
        decode_token(&token)
    }

    /// Role of the current session, `None` when unflagged or undecodable.
    pub fn client_type(&self) -> Option<ClientType> {
        self.claims().ok().map(|c| c.client_type)
    }

    fn has_role(&self, role: ClientType) -> bool {
        match self.claims() {
            Ok(claims) => claims.client_type == role,
            Err(TokenError::Missing) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Token could not be decoded, denying access");
                false
            }
        }
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ClientType::Administrator)
    }

    pub fn is_company(&self) -> bool {
        self.has_role(ClientType::Company)
    }

    pub fn is_customer(&self) -> bool {
        self.has_role(ClientType::Customer)
    }

    /// Where to send a visitor who may not see the current page.
    pub fn unauthorized_redirect_target(&self) -> &'static str {
        self.client_type()
            .map(ClientType::home_path)
            .unwrap_or(LOGIN_PATH)
    }

    /// Whether the current session satisfies `access`.
    pub fn permits(&self, access: Access) -> bool {
        match access {
            Access::Public => true,
            Access::Only(role) => self.has_role(role),
            Access::Except(role) => self
                .client_type()
                .is_some_and(|current| current != role),
        }
    }

    /// The two-step check every guarded page runs on mount: logged-out
    /// visitors go to the login page, signed-in visitors without the right
    /// role go to their own home.
    pub fn check(&self, access: Access) -> Guard {
        if access == Access::Public {
            return Guard::Allow;
        }
        if !self.is_logged_in() {
            return Guard::Redirect(LOGIN_PATH);
        }
        if self.permits(access) {
            Guard::Allow
        } else {
            Guard::Redirect(self.unauthorized_redirect_target())
        }
    }
}
