// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrator pages: companies, customers and database seeding.

use axum::{
    extract::Path,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use std::sync::Arc;

use crate::auth::{Access, ClientType};
use crate::middleware::SessionContext;
use crate::models::{CompanyForm, CustomerForm, FieldErrors, InitForm, InitSelection};
use crate::views::{pages, Notice};
use crate::AppState;

const ADMIN: Access = Access::Only(ClientType::Administrator);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(companies))
        .route("/company/add", get(add_company_page).post(add_company))
        .route("/company/edit/{id}", get(edit_company_page).post(edit_company))
        .route("/company/{id}", get(company_details))
        .route("/company/{id}/delete", post(delete_company))
        .route("/customers", get(customers))
        .route("/customer/add", get(add_customer_page).post(add_customer))
        .route("/customer/edit/{id}", get(edit_customer_page).post(edit_customer))
        .route("/customer/{id}", get(customer_details))
        .route("/customer/{id}/delete", post(delete_customer))
        .route("/init", get(init_page).post(init))
}

/// Server text when there is some, otherwise `fallback`.
fn message_or(message: String, fallback: String) -> String {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}

// Companies

async fn companies(ctx: SessionContext) -> Response {
    let mount = match ctx.mount(ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let list = mount.slot();
    let admin = ctx.state.admin_service(&ctx.session);
    if let Err(e) = list.fill(admin.get_all_companies()).await {
        return ctx.fail(e).await;
    }
    ctx.render("Companies", pages::companies(&list.get()))
}

async fn company_details(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    let mount = match ctx.mount(ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let company = mount.slot();
    let admin = ctx.state.admin_service(&ctx.session);
    if let Err(e) = company.fill(admin.get_one_company(id)).await {
        return ctx.fail(e).await;
    }
    ctx.render("Company", pages::company_details(&company.get()))
}

async fn add_company_page(ctx: SessionContext) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let body = pages::company_form(
        "/company/add",
        &CompanyForm::default(),
        &FieldErrors::default(),
        false,
    );
    ctx.render("Add company", body)
}

async fn add_company(ctx: SessionContext, Form(form): Form<CompanyForm>) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let company = match form.to_company(0) {
        Ok(company) => company,
        Err(errors) => {
            let body = pages::company_form("/company/add", &form, &errors, false);
            return ctx.render("Add company", body);
        }
    };

    match ctx.state.admin_service(&ctx.session).add_company(&company).await {
        Ok(created) => ctx.redirect_with(
            "/companies",
            Notice::success(format!("Company {} added successfully", created.name)),
        ),
        Err(e) => ctx.fail(e).await,
    }
}

async fn edit_company_page(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    let mount = match ctx.mount(ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let company = mount.slot();
    let admin = ctx.state.admin_service(&ctx.session);
    if let Err(e) = company.fill(admin.get_one_company(id)).await {
        return ctx.fail(e).await;
    }
    let form = company
        .get()
        .ready()
        .map(|c| CompanyForm::from(&c))
        .unwrap_or_default();
    let body = pages::company_form(
        &format!("/company/edit/{}", id),
        &form,
        &FieldErrors::default(),
        true,
    );
    ctx.render("Edit company", body)
}

async fn edit_company(
    ctx: SessionContext,
    Path(id): Path<u64>,
    Form(mut form): Form<CompanyForm>,
) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let admin = ctx.state.admin_service(&ctx.session);

    // An empty password keeps the current one, if the server ever sent it.
    if form.password.is_empty() {
        match admin.get_one_company(id).await {
            Ok(existing) => form.password = existing.password.unwrap_or_default(),
            Err(e) => return ctx.fail(e).await,
        }
    }

    let company = match form.to_company(id) {
        Ok(company) => company,
        Err(errors) => {
            form.password.clear();
            let body = pages::company_form(&format!("/company/edit/{}", id), &form, &errors, true);
            return ctx.render("Edit company", body);
        }
    };

    match admin.update_company(&company).await {
        Ok(message) => {
            let text = message_or(message, format!("Company {} updated", company.name));
            ctx.redirect_with("/companies", Notice::success(text))
        }
        Err(e) => ctx.fail(e).await,
    }
}

async fn delete_company(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    match ctx.state.admin_service(&ctx.session).delete_company(id).await {
        Ok(message) => {
            let text = message_or(message, "Company deleted".to_string());
            ctx.redirect_with("/companies", Notice::success(text))
        }
        Err(e) => ctx.fail(e).await,
    }
}

// Customers

async fn customers(ctx: SessionContext) -> Response {
    let mount = match ctx.mount(ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let list = mount.slot();
    let admin = ctx.state.admin_service(&ctx.session);
    if let Err(e) = list.fill(admin.get_all_customers()).await {
        return ctx.fail(e).await;
    }
    ctx.render("Customers", pages::customers(&list.get()))
}

async fn customer_details(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    let mount = match ctx.mount(ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let customer = mount.slot();
    let admin = ctx.state.admin_service(&ctx.session);
    if let Err(e) = customer.fill(admin.get_one_customer(id)).await {
        return ctx.fail(e).await;
    }
    ctx.render("Customer", pages::customer_details(&customer.get()))
}

async fn add_customer_page(ctx: SessionContext) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let body = pages::customer_form(
        "/customer/add",
        &CustomerForm::default(),
        &FieldErrors::default(),
        false,
    );
    ctx.render("Add customer", body)
}

async fn add_customer(ctx: SessionContext, Form(form): Form<CustomerForm>) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let customer = match form.to_customer(0, Vec::new()) {
        Ok(customer) => customer,
        Err(errors) => {
            let body = pages::customer_form("/customer/add", &form, &errors, false);
            return ctx.render("Add customer", body);
        }
    };

    match ctx.state.admin_service(&ctx.session).add_customer(&customer).await {
        Ok(created) => ctx.redirect_with(
            "/customers",
            Notice::success(format!("Customer {} added successfully", created.full_name())),
        ),
        Err(e) => ctx.fail(e).await,
    }
}

async fn edit_customer_page(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    let mount = match ctx.mount(ADMIN) {
        Ok(mount) => mount,
        Err(redirect) => return redirect,
    };
    let customer = mount.slot();
    let admin = ctx.state.admin_service(&ctx.session);
    if let Err(e) = customer.fill(admin.get_one_customer(id)).await {
        return ctx.fail(e).await;
    }
    let form = customer
        .get()
        .ready()
        .map(|c| CustomerForm::from(&c))
        .unwrap_or_default();
    let body = pages::customer_form(
        &format!("/customer/edit/{}", id),
        &form,
        &FieldErrors::default(),
        true,
    );
    ctx.render("Edit customer", body)
}

async fn edit_customer(
    ctx: SessionContext,
    Path(id): Path<u64>,
    Form(mut form): Form<CustomerForm>,
) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let admin = ctx.state.admin_service(&ctx.session);

    // Owned coupons are not editable here; carry them over unchanged.
    let existing = match admin.get_one_customer(id).await {
        Ok(existing) => existing,
        Err(e) => return ctx.fail(e).await,
    };
    if form.password.is_empty() {
        form.password = existing.password.clone().unwrap_or_default();
    }

    let customer = match form.to_customer(id, existing.coupons) {
        Ok(customer) => customer,
        Err(errors) => {
            form.password.clear();
            let body =
                pages::customer_form(&format!("/customer/edit/{}", id), &form, &errors, true);
            return ctx.render("Edit customer", body);
        }
    };

    match admin.update_customer(&customer).await {
        Ok(message) => {
            let text = message_or(message, format!("Customer {} updated", customer.full_name()));
            ctx.redirect_with("/customers", Notice::success(text))
        }
        Err(e) => ctx.fail(e).await,
    }
}

async fn delete_customer(ctx: SessionContext, Path(id): Path<u64>) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    match ctx.state.admin_service(&ctx.session).delete_customer(id).await {
        Ok(message) => {
            let text = message_or(message, "Customer deleted".to_string());
            ctx.redirect_with("/customers", Notice::success(text))
        }
        Err(e) => ctx.fail(e).await,
    }
}

// Database seeding

async fn init_page(ctx: SessionContext) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    ctx.render("Initialize database", pages::init())
}

/// Seeding failures are reported on the form; only a rejected credential
/// ends the session.
async fn init(ctx: SessionContext, Form(form): Form<InitForm>) -> Response {
    if let Err(redirect) = ctx.mount(ADMIN) {
        return redirect;
    }
    let selection = InitSelection::from(&form);
    match ctx.state.admin_service(&ctx.session).initialize(selection).await {
        Ok(message) => {
            let text = message_or(message, "Database initialized".to_string());
            ctx.redirect_with("/init", Notice::success(text))
        }
        Err(e) if e.is_auth_error() => ctx.recover(e).await,
        Err(e) => {
            tracing::warn!(error = %e, "Database initialization failed");
            ctx.redirect_with("/init", Notice::error("Something went wrong!"))
        }
    }
}
