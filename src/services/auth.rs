// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, logout and signup against the coupon API.

use super::transport::Transport;
use crate::auth::{decode_token, Claims, ClientType};
use crate::error::{AppError, Result};
use crate::models::Customer;

/// Authentication calls for one session.
#[derive(Clone)]
pub struct AuthService {
    transport: Transport,
}

impl AuthService {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Exchange credentials for a token and start the session.
    ///
    /// The session is only touched once the token is known to decode, so a
    /// flagged session always holds a readable token.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client_type: ClientType,
    ) -> Result<Claims> {
        let path = format!(
            "/login/{}/{}/{}",
            urlencoding::encode(email),
            urlencoding::encode(password),
            client_type
        );
        let token = self.transport.post_empty(&path).await?;

        let claims = decode_token(&token).map_err(|e| {
            tracing::warn!(error = %e, "Login returned an unreadable token");
            AppError::InvalidToken
        })?;

        self.transport.session().set_session(token);
        tracing::info!(client_type = %claims.client_type, "Signed in");
        Ok(claims)
    }

    /// Invalidate the token server-side (best effort) and clear the session.
    ///
    /// The session is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let session = self.transport.session();
        let result = match session.token() {
            Some(token) => self
                .transport
                .post_empty(&format!("/logout/{}", urlencoding::encode(&token)))
                .await
                .map(|_| ()),
            None => Ok(()),
        };
        session.clear_session();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Server-side logout failed, session cleared locally");
        }
        result
    }

    /// Register a new customer account.
    pub async fn sign_up(&self, customer: &Customer) -> Result<Customer> {
        let created: Customer = self.transport.post_json("/signup", customer).await?;
        tracing::info!(customer_id = created.id, "Customer signed up");
        Ok(created)
    }
}
