// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - calls to the coupon REST API.

pub mod admin;
pub mod auth;
pub mod company;
pub mod customer;
pub mod transport;

pub use admin::{AdminService, Caches, SessionCaches};
pub use auth::AuthService;
pub use company::CompanyService;
pub use customer::CustomerService;
pub use transport::{ApiClient, Transport, LAST_UPDATE_HEADER};
