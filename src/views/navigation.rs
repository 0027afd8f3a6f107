// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-dependent navigation menu.

use crate::auth::{ClientType, RoleResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
}

const fn item(label: &'static str, path: &'static str) -> MenuItem {
    MenuItem { label, path }
}

/// Pages on the left, account settings on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub pages: Vec<MenuItem>,
    pub settings: Vec<MenuItem>,
}

/// Settings entries posting to `/logout` are rendered as a form button.
pub const LOGOUT_PATH: &str = "/logout";

impl Menu {
    /// Menu for a visitor with `role`, or the logged-out menu for `None`.
    pub fn for_role(role: Option<ClientType>) -> Self {
        let (pages, settings) = match role {
            Some(ClientType::Administrator) => (
                vec![item("Companies", "/companies"), item("Customers", "/customers")],
                vec![item("Init", "/init"), item("Logout", LOGOUT_PATH)],
            ),
            Some(ClientType::Company) => (
                vec![item("Our coupons", "/our_coupons")],
                vec![item("Profile", "/profile"), item("Logout", LOGOUT_PATH)],
            ),
            Some(ClientType::Customer) => (
                vec![item("Coupons", "/coupons"), item("About us", "/about_us")],
                vec![
                    item("Profile", "/profile"),
                    item("Dashboard", "/dashboard"),
                    item("Logout", LOGOUT_PATH),
                ],
            ),
            None => (
                vec![
                    item("Sign up", "/signup"),
                    item("About us", "/about_us"),
                    item("Login", "/login"),
                ],
                Vec::new(),
            ),
        };
        Self { pages, settings }
    }

    pub fn for_resolver(resolver: &RoleResolver<'_>) -> Self {
        Self::for_role(resolver.client_type())
    }
}
