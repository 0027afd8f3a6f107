// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token claims and role-based access decisions.

pub mod claims;
pub mod resolver;

pub use claims::{decode_token, Claims, ClientType, TokenError};
pub use resolver::{Access, Guard, RoleResolver, LOGIN_PATH};
