// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form inputs submitted by the browser.
//!
//! Every field arrives as text so that bad input can be reported next to
//! the field instead of being rejected by the extractor. Nothing here
//! reaches the network until it validates.

use super::{Category, Company, Coupon, Customer};
use crate::auth::ClientType;
use chrono::NaiveDate;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// First message per invalid field, keyed by form field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field));
                map.insert(field.to_string(), message);
            }
        }
        Self(map)
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.to_string(), message.into());
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn check(form: &impl Validate) -> Result<(), FieldErrors> {
    form.validate()
        .map_err(|errors| FieldErrors::from_validation(&errors))
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_amount(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(amount) if amount >= 0 => Ok(()),
        Ok(_) => Err(invalid("min", "Amount can't be below 0!")),
        Err(_) => Err(invalid("amount", "Please enter a whole number")),
    }
}

/// Digits with an optional decimal part, which also rules out negatives.
fn validate_price(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if value.starts_with('-') {
        return Err(invalid("min", "Price can't be below 0!"));
    }
    if digits(whole) && fraction.map_or(true, digits) {
        Ok(())
    } else {
        Err(invalid("pattern", "Please enter a valid price"))
    }
}

fn validate_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| invalid("date", "Please enter a date (YYYY-MM-DD)"))
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Category>()
        .map(|_| ())
        .map_err(|_| invalid("category", "Invalid category selected!"))
}

fn validate_client_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ClientType>()
        .map(|_| ())
        .map_err(|_| invalid("client_type", "Please choose a client type"))
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "You must enter an email!"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "You must enter a password!"))]
    #[serde(default)]
    pub password: String,
    #[validate(custom(function = "validate_client_type"))]
    #[serde(default)]
    pub client_type: String,
}

impl LoginForm {
    pub fn credentials(&self) -> Result<(String, String, ClientType), FieldErrors> {
        check(self)?;
        let client_type = self
            .client_type
            .parse()
            .map_err(|_| FieldErrors::single("client_type", "Please choose a client type"))?;
        Ok((self.email.trim().to_string(), self.password.clone(), client_type))
    }
}

/// Company add/edit form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CompanyForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters!"))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "You must enter an email!"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "You must enter a password!"))]
    #[serde(default)]
    pub password: String,
}

impl CompanyForm {
    pub fn to_company(&self, id: u64) -> Result<Company, FieldErrors> {
        check(self)?;
        Ok(Company {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: Some(self.password.clone()),
        })
    }
}

impl From<&Company> for CompanyForm {
    /// Prefill for editing. The password is never echoed back.
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            email: company.email.clone(),
            password: String::new(),
        }
    }
}

/// Customer add/edit form, also used for self-service signup.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 2, message = "First name must be at least 2 characters!"))]
    #[serde(default)]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters!"))]
    #[serde(default)]
    pub last_name: String,
    #[validate(length(min = 1, message = "You must enter an email!"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1, message = "You must enter a password!"))]
    #[serde(default)]
    pub password: String,
}

impl CustomerForm {
    pub fn to_customer(&self, id: u64, coupons: Vec<Coupon>) -> Result<Customer, FieldErrors> {
        check(self)?;
        Ok(Customer {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: Some(self.password.clone()),
            coupons,
        })
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            password: String::new(),
        }
    }
}

/// Coupon add/edit form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CouponForm {
    #[validate(length(min = 1, message = "You must enter a title!"))]
    #[serde(default)]
    pub title: String,
    #[validate(length(max = 120, message = "Description max length is 120 characters!"))]
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_amount"))]
    #[serde(default)]
    pub amount: String,
    #[validate(custom(function = "validate_price"))]
    #[serde(default)]
    pub price: String,
    #[validate(custom(function = "validate_date"))]
    #[serde(default)]
    pub start_date: String,
    #[validate(custom(function = "validate_date"))]
    #[serde(default)]
    pub end_date: String,
    #[validate(custom(function = "validate_category"))]
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
}

impl CouponForm {
    /// Field checks only, before the owning company is known.
    pub fn check_fields(&self) -> Result<(), FieldErrors> {
        check(self)
    }

    /// Validate and build the coupon owned by `company`.
    pub fn to_coupon(&self, id: u64, company: Company) -> Result<Coupon, FieldErrors> {
        check(self)?;
        let amount = self
            .amount
            .trim()
            .parse()
            .map_err(|_| FieldErrors::single("amount", "Please enter a whole number"))?;
        let price = self
            .price
            .trim()
            .parse()
            .map_err(|_| FieldErrors::single("price", "Please enter a valid price"))?;
        let start_date = NaiveDate::parse_from_str(self.start_date.trim(), DATE_FORMAT)
            .map_err(|_| FieldErrors::single("start_date", "Please enter a date (YYYY-MM-DD)"))?;
        let end_date = NaiveDate::parse_from_str(self.end_date.trim(), DATE_FORMAT)
            .map_err(|_| FieldErrors::single("end_date", "Please enter a date (YYYY-MM-DD)"))?;
        let category = self
            .category
            .parse()
            .map_err(|_| FieldErrors::single("category", "Invalid category selected!"))?;

        Ok(Coupon {
            id,
            company,
            category,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date,
            end_date,
            amount,
            price,
            image: self.image.trim().to_string(),
        })
    }
}

impl From<&Coupon> for CouponForm {
    fn from(coupon: &Coupon) -> Self {
        Self {
            title: coupon.title.clone(),
            description: coupon.description.clone(),
            amount: coupon.amount.to_string(),
            price: coupon.price.to_string(),
            start_date: coupon.start_date.format(DATE_FORMAT).to_string(),
            end_date: coupon.end_date.format(DATE_FORMAT).to_string(),
            category: coupon.category.name().to_string(),
            image: coupon.image.clone(),
        }
    }
}

/// Database seeding form: unchecked boxes are simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitForm {
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub companies: Option<String>,
    #[serde(default)]
    pub customers: Option<String>,
    #[serde(default)]
    pub coupons: Option<String>,
}

/// Which tables the seed call resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSelection {
    pub categories: bool,
    pub companies: bool,
    pub customers: bool,
    pub coupons: bool,
}

impl From<&InitForm> for InitSelection {
    fn from(form: &InitForm) -> Self {
        Self {
            categories: form.categories.is_some(),
            companies: form.companies.is_some(),
            customers: form.customers.is_some(),
            coupons: form.coupons.is_some(),
        }
    }
}
