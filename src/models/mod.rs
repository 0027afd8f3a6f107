// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod category;
pub mod company;
pub mod coupon;
pub mod customer;
pub mod forms;

pub use category::Category;
pub use company::Company;
pub use coupon::{Coupon, CouponFilter};
pub use customer::Customer;
pub use forms::{CompanyForm, CouponForm, CustomerForm, FieldErrors, InitForm, InitSelection, LoginForm};
