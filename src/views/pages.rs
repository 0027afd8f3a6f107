// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page bodies. Each function renders the content inside the layout.

use super::html::{escape, field, loadable, post_button, select};
use super::mount::Loadable;
use crate::auth::ClientType;
use crate::models::{
    Category, Company, CompanyForm, Coupon, CouponFilter, CouponForm, Customer, CustomerForm,
    FieldErrors, LoginForm,
};
use std::fmt::Write;

fn category_options() -> Vec<(&'static str, &'static str)> {
    Category::ALL.iter().map(|c| (c.name(), c.name())).collect()
}

fn submit(label: &str) -> String {
    format!(r#"<button type="submit">{}</button>"#, escape(label))
}

fn coupon_card(coupon: &Coupon, badges: &[&str], actions: &str) -> String {
    let mut badge_html = String::new();
    for badge in badges {
        let _ = write!(badge_html, r#"<span class="badge">{}</span>"#, escape(badge));
    }
    format!(
        concat!(
            r#"<article class="coupon"><img src="{img}" alt="">"#,
            r#"<h2><a href="/coupon/{id}">{title}</a></h2>{badges}"#,
            r#"<p>{category} &middot; {price:.2} &middot; {amount} left</p>"#,
            r#"<p>{start} to {end}</p>{actions}</article>"#
        ),
        img = escape(coupon.image_url()),
        id = coupon.id,
        title = escape(&coupon.title),
        badges = badge_html,
        category = coupon.category,
        price = coupon.price,
        amount = coupon.amount,
        start = coupon.start_date,
        end = coupon.end_date,
        actions = actions,
    )
}

// Public pages

pub fn login(form: &LoginForm, errors: &FieldErrors) -> String {
    let types: Vec<(&str, &str)> = ClientType::ALL
        .iter()
        .map(|t| (t.as_str(), t.as_str()))
        .collect();
    format!(
        r#"<form method="post" action="/login">{}{}{}{}</form><p>No account? <a href="/signup">Sign up</a></p>"#,
        field("Email", "email", "email", &form.email, errors),
        field("Password", "password", "password", "", errors),
        select("Client type", "client_type", &types, &form.client_type, errors),
        submit("Login"),
    )
}

pub fn signup(form: &CustomerForm, errors: &FieldErrors) -> String {
    format!(
        r#"<form method="post" action="/signup">{}{}{}{}{}</form>"#,
        field("First name", "first_name", "text", &form.first_name, errors),
        field("Last name", "last_name", "text", &form.last_name, errors),
        field("Email", "email", "email", &form.email, errors),
        field("Password", "password", "password", "", errors),
        submit("Sign up"),
    )
}

pub fn about_us() -> String {
    concat!(
        "<p>We bring local businesses and their customers together through ",
        "discount coupons. Companies publish offers, customers collect them.</p>"
    )
    .to_string()
}

/// `home` is where the "back" link points for this visitor.
pub fn not_found(home: &str) -> String {
    format!(
        r#"<p>The page you are looking for does not exist.</p><p><a href="{}">Back home</a></p>"#,
        escape(home)
    )
}

// Administrator pages

pub fn companies(list: &Loadable<Vec<Company>>) -> String {
    let body = loadable(list, |companies| {
        if companies.is_empty() {
            return "<p>No companies yet.</p>".to_string();
        }
        let mut rows = String::new();
        for company in companies {
            let _ = write!(
                rows,
                r#"<tr><td><a href="/company/{id}">{name}</a></td><td>{email}</td><td><a href="/company/edit/{id}">Edit</a></td></tr>"#,
                id = company.id,
                name = escape(&company.name),
                email = escape(&company.email),
            );
        }
        format!("<table><tr><th>Name</th><th>Email</th><th></th></tr>{}</table>", rows)
    });
    format!(r#"<p><a href="/company/add">Add company</a></p>{}"#, body)
}

pub fn company_details(company: &Loadable<Company>) -> String {
    loadable(company, |c| {
        format!(
            r#"<dl><dt>Name</dt><dd>{name}</dd><dt>Email</dt><dd>{email}</dd></dl><p><a href="/company/edit/{id}">Edit</a></p>{delete}"#,
            name = escape(&c.name),
            email = escape(&c.email),
            id = c.id,
            delete = post_button(&format!("/company/{}/delete", c.id), "Delete"),
        )
    })
}

/// Add or edit form; `action` is the POST target.
pub fn company_form(action: &str, form: &CompanyForm, errors: &FieldErrors, editing: bool) -> String {
    let hint = if editing {
        "<p class=\"hint\">Leave the password empty to keep the current one.</p>"
    } else {
        ""
    };
    format!(
        r#"<form method="post" action="{}">{}{}{}{}{}</form>"#,
        escape(action),
        field("Name", "name", "text", &form.name, errors),
        field("Email", "email", "email", &form.email, errors),
        field("Password", "password", "password", "", errors),
        hint,
        submit(if editing { "Update" } else { "Add" }),
    )
}

pub fn customers(list: &Loadable<Vec<Customer>>) -> String {
    let body = loadable(list, |customers| {
        if customers.is_empty() {
            return "<p>No customers yet.</p>".to_string();
        }
        let mut rows = String::new();
        for customer in customers {
            let _ = write!(
                rows,
                r#"<tr><td><a href="/customer/{id}">{name}</a></td><td>{email}</td><td>{count}</td><td><a href="/customer/edit/{id}">Edit</a></td></tr>"#,
                id = customer.id,
                name = escape(&customer.full_name()),
                email = escape(&customer.email),
                count = customer.coupons.len(),
            );
        }
        format!(
            "<table><tr><th>Name</th><th>Email</th><th>Coupons</th><th></th></tr>{}</table>",
            rows
        )
    });
    format!(r#"<p><a href="/customer/add">Add customer</a></p>{}"#, body)
}

pub fn customer_details(customer: &Loadable<Customer>) -> String {
    loadable(customer, |c| {
        let mut owned = String::new();
        for coupon in &c.coupons {
            let _ = write!(owned, "<li>{}</li>", escape(&coupon.title));
        }
        format!(
            r#"<dl><dt>Name</dt><dd>{name}</dd><dt>Email</dt><dd>{email}</dd></dl><h2>Coupons</h2><ul>{owned}</ul><p><a href="/customer/edit/{id}">Edit</a></p>{delete}"#,
            name = escape(&c.full_name()),
            email = escape(&c.email),
            owned = owned,
            id = c.id,
            delete = post_button(&format!("/customer/{}/delete", c.id), "Delete"),
        )
    })
}

pub fn customer_form(
    action: &str,
    form: &CustomerForm,
    errors: &FieldErrors,
    editing: bool,
) -> String {
    let hint = if editing {
        "<p class=\"hint\">Leave the password empty to keep the current one.</p>"
    } else {
        ""
    };
    format!(
        r#"<form method="post" action="{}">{}{}{}{}{}{}</form>"#,
        escape(action),
        field("First name", "first_name", "text", &form.first_name, errors),
        field("Last name", "last_name", "text", &form.last_name, errors),
        field("Email", "email", "email", &form.email, errors),
        field("Password", "password", "password", "", errors),
        hint,
        submit(if editing { "Update" } else { "Add" }),
    )
}

pub fn init() -> String {
    let mut boxes = String::new();
    for name in ["categories", "companies", "customers", "coupons"] {
        let _ = write!(
            boxes,
            r#"<label><input type="checkbox" name="{name}" value="on"> {name}</label>"#,
            name = name
        );
    }
    format!(
        r#"<p>Reset and reseed the selected tables.</p><form method="post" action="/init">{}{}</form>"#,
        boxes,
        submit("Initialize")
    )
}

// Company pages

pub fn our_coupons(list: &Loadable<Vec<Coupon>>) -> String {
    let body = loadable(list, |coupons| {
        if coupons.is_empty() {
            return "<p>You have not published any coupons.</p>".to_string();
        }
        coupons
            .iter()
            .map(|c| {
                let actions = format!(
                    r#"<a href="/coupon/edit/{}">Edit</a>{}"#,
                    c.id,
                    post_button(&format!("/coupon/{}/delete", c.id), "Delete")
                );
                coupon_card(c, &[], &actions)
            })
            .collect()
    });
    format!(r#"<p><a href="/coupon/add">Add coupon</a></p>{}"#, body)
}

pub fn coupon_form(action: &str, form: &CouponForm, errors: &FieldErrors, editing: bool) -> String {
    let description_error = errors
        .get("description")
        .map(|m| format!(r#"<span class="field-error">{}</span>"#, escape(m)))
        .unwrap_or_default();
    format!(
        r#"<form method="post" action="{}">{}<label>Description <textarea name="description" maxlength="120">{}</textarea></label>{}{}{}{}{}{}{}{}</form>"#,
        escape(action),
        field("Title", "title", "text", &form.title, errors),
        escape(&form.description),
        description_error,
        field("Amount", "amount", "number", &form.amount, errors),
        field("Price", "price", "text", &form.price, errors),
        field("Start date", "start_date", "date", &form.start_date, errors),
        field("End date", "end_date", "date", &form.end_date, errors),
        select("Category", "category", &category_options(), &form.category, errors),
        field("Image URL", "image", "url", &form.image, errors),
        submit(if editing { "Update" } else { "Add" }),
    )
}

// Customer pages

fn filter_form(filter: &CouponFilter) -> String {
    let mut options = vec![("", "All")];
    options.extend(category_options());
    let selected = filter.category.map(|c| c.name()).unwrap_or("");
    format!(
        r#"<form method="get" action="/coupons" class="filter"><label>Max price <input type="number" min="0" step="any" name="max_price" value="{}"></label>{}{}</form>"#,
        filter.max_price,
        select("Category", "category", &options, selected, &FieldErrors::default()),
        submit("Filter"),
    )
}

/// Catalog with the customer's owned coupons marked.
pub fn coupon_catalog(
    coupons: &Loadable<Vec<Coupon>>,
    owned: &Loadable<Vec<Coupon>>,
    filter: &CouponFilter,
) -> String {
    let owned_ids: Vec<u64> = owned
        .as_ref()
        .ready()
        .map(|list| list.iter().map(|c| c.id).collect())
        .unwrap_or_default();
    let body = loadable(coupons, |all| {
        let visible = filter.apply(all);
        if visible.is_empty() {
            return "<p>No coupons match your filter.</p>".to_string();
        }
        visible
            .into_iter()
            .map(|c| {
                let mut badges = Vec::new();
                if owned_ids.contains(&c.id) {
                    badges.push("Owned");
                }
                if !c.in_stock() {
                    badges.push("Out of stock");
                }
                coupon_card(c, &badges, "")
            })
            .collect()
    });
    format!("{}{}", filter_form(filter), body)
}

/// Coupon details. `owned` is only present for customers; the purchase
/// button needs it resolved, not owning the coupon, and stock left.
pub fn coupon_details(coupon: &Loadable<Coupon>, owned: Option<&Loadable<Vec<Coupon>>>) -> String {
    loadable(coupon, |c| {
        let purchase = match owned {
            None => String::new(),
            Some(owned) => loadable(owned, |list| {
                if list.iter().any(|o| o.id == c.id) {
                    r#"<p class="badge">You own this coupon</p>"#.to_string()
                } else if !c.in_stock() {
                    r#"<p class="badge">Out of stock</p>"#.to_string()
                } else {
                    post_button(&format!("/coupon/{}/purchase", c.id), "Purchase")
                }
            }),
        };
        format!(
            r#"<img src="{img}" alt=""><dl><dt>Title</dt><dd>{title}</dd><dt>Description</dt><dd>{description}</dd><dt>Company</dt><dd>{company}</dd><dt>Category</dt><dd>{category}</dd><dt>Valid</dt><dd>{start} to {end}</dd><dt>Price</dt><dd>{price:.2}</dd><dt>Remaining</dt><dd>{amount}</dd></dl>{purchase}"#,
            img = escape(c.image_url()),
            title = escape(&c.title),
            description = escape(&c.description),
            company = escape(&c.company.name),
            category = c.category,
            start = c.start_date,
            end = c.end_date,
            price = c.price,
            amount = c.amount,
            purchase = purchase,
        )
    })
}

pub fn dashboard(owned: &Loadable<Vec<Coupon>>) -> String {
    loadable(owned, |coupons| {
        if coupons.is_empty() {
            return r#"<p>You have no coupons yet. <a href="/coupons">Browse coupons</a></p>"#
                .to_string();
        }
        let total: f64 = coupons.iter().map(|c| c.price).sum();
        let cards: String = coupons.iter().map(|c| coupon_card(c, &[], "")).collect();
        format!(
            "<p>{} coupons, {:.2} spent.</p>{}",
            coupons.len(),
            total,
            cards
        )
    })
}

pub fn company_profile(company: &Loadable<Company>) -> String {
    loadable(company, |c| {
        format!(
            "<dl><dt>Name</dt><dd>{}</dd><dt>Email</dt><dd>{}</dd></dl>",
            escape(&c.name),
            escape(&c.email)
        )
    })
}

pub fn customer_profile(customer: &Loadable<Customer>) -> String {
    loadable(customer, |c| {
        format!(
            "<dl><dt>Name</dt><dd>{}</dd><dt>Email</dt><dd>{}</dd><dt>Coupons</dt><dd>{}</dd></dl>",
            escape(&c.full_name()),
            escape(&c.email),
            c.coupons.len()
        )
    })
}
