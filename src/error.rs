// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the services and the page handlers.

use crate::auth::TokenError;

/// Application error type.
///
/// Page handlers never render these directly: authentication failures become
/// redirects and everything else goes through the defensive-logout recovery.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Coupon API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Coupon API unreachable: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error means the credential itself was rejected or unusable.
    pub fn is_auth_error(&self) -> bool {
        match self {
            AppError::Unauthorized | AppError::InvalidToken => true,
            AppError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Text suitable for a user-visible notification.
    ///
    /// API errors carry the server's own message; authentication errors are
    /// never shown raw.
    pub fn user_message(&self) -> String {
        if self.is_auth_error() {
            return "Please log in!".to_string();
        }
        match self {
            AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Api { status, .. } => format!("Request failed ({})", status),
            AppError::NotFound(what) => format!("{} was not found", what),
            AppError::Transport(_) => "The coupon service is unavailable.".to_string(),
            _ => "An unexpected error occurred.".to_string(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => AppError::Unauthorized,
            _ => AppError::InvalidToken,
        }
    }
}

/// Result type alias for services and handlers
pub type Result<T> = std::result::Result<T, AppError>;
