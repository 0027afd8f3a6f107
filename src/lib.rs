// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coupon storefront: a server-rendered web front for the coupon REST API.
//!
//! Administrators manage companies and customers, companies publish coupons
//! and customers browse and buy them. Every page checks the signed-in role
//! before it fetches anything.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod views;

use config::Config;
use services::{
    AdminService, ApiClient, AuthService, CompanyService, CustomerService, SessionCaches,
};
use session::Session;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    /// Entity caches of each signed-in session
    pub caches: SessionCaches,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        Self {
            config,
            api,
            caches: SessionCaches::default(),
        }
    }

    pub fn auth_service(&self, session: &Session) -> AuthService {
        AuthService::new(self.api.transport(session))
    }

    pub fn admin_service(&self, session: &Session) -> AdminService {
        AdminService::new(self.api.transport(session), self.caches.for_session(session))
    }

    pub fn company_service(&self, session: &Session) -> CompanyService {
        CompanyService::new(self.api.transport(session))
    }

    pub fn customer_service(&self, session: &Session) -> CustomerService {
        CustomerService::new(self.api.transport(session))
    }
}
