// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity cache behavior as seen through the administrator service.
//!
//! These tests run the service against the in-process mock API and count
//! the requests that actually reach it.

use axum::http::StatusCode;
use coupon_storefront::error::AppError;
use coupon_storefront::models::{Company, InitSelection};
use coupon_storefront::services::{AdminService, Caches};
use coupon_storefront::session::Session;
use coupon_storefront::AppState;
use std::sync::Arc;

mod common;
use common::{sample_company, sample_customer, MockApi};

async fn admin_setup() -> (MockApi, Arc<AppState>, AdminService) {
    let mock = common::spawn_mock_api().await;
    let (_, state) = common::create_test_app(&mock.base_url);
    let session = Session::new();
    session.set_session(common::mint_token("Administrator", 0));
    let service = state.admin_service(&session);
    (mock, state, service)
}

/// Caches of the session `admin_setup` signs in with.
fn admin_caches(state: &AppState) -> Arc<Caches> {
    state
        .caches
        .get(&common::mint_token("Administrator", 0))
        .expect("admin session has caches")
}

fn names(companies: &[Company]) -> Vec<String> {
    companies.iter().map(|c| c.name.clone()).collect()
}

#[tokio::test]
async fn test_full_list_is_fetched_once() {
    let (mock, _state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1), sample_company(2)]);

    let first = admin.get_all_companies().await.unwrap();
    let second = admin.get_all_companies().await.unwrap();

    assert_eq!(names(&first), names(&second));
    assert_eq!(first.len(), 2);
    assert_eq!(mock.hits("GET /admin/allcomp"), 1);
}

#[tokio::test]
async fn test_add_appends_without_refetch() {
    let (mock, _state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1), sample_company(2)]);
    admin.get_all_companies().await.unwrap();

    let new_company = Company {
        id: 0,
        name: "Fresh Bakery".to_string(),
        email: "bakery@example.com".to_string(),
        password: Some("flour".to_string()),
    };
    let created = admin.add_company(&new_company).await.unwrap();
    assert_eq!(created.id, 3);

    let all = admin.get_all_companies().await.unwrap();
    assert_eq!(names(&all), ["Company 1", "Company 2", "Fresh Bakery"]);
    assert_eq!(mock.hits("GET /admin/allcomp"), 1);
    assert_eq!(mock.hits("POST /admin/addcomp"), 1);
}

#[tokio::test]
async fn test_delete_keeps_order_of_the_rest() {
    let (mock, _state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1), sample_company(2), sample_company(3)]);
    admin.get_all_companies().await.unwrap();

    admin.delete_company(2).await.unwrap();

    let all = admin.get_all_companies().await.unwrap();
    assert_eq!(names(&all), ["Company 1", "Company 3"]);
    assert_eq!(mock.hits("GET /admin/allcomp"), 1);
    assert!(matches!(
        admin.get_one_company(2).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_keeps_position() {
    let (mock, _state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1), sample_company(2), sample_company(3)]);
    admin.get_all_companies().await.unwrap();

    let renamed = Company {
        name: "Renamed".to_string(),
        ..sample_company(2)
    };
    let message = admin.update_company(&renamed).await.unwrap();
    assert_eq!(message, "Company updated");

    let all = admin.get_all_companies().await.unwrap();
    assert_eq!(names(&all), ["Company 1", "Renamed", "Company 3"]);
    assert_eq!(admin.get_one_company(2).await.unwrap().name, "Renamed");
    assert_eq!(mock.hits("GET /admin/comp/2"), 0);
}

#[tokio::test]
async fn test_single_lookup_on_empty_cache_does_not_populate() {
    let (mock, state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(42)]);

    let company = admin.get_one_company(42).await.unwrap();
    assert_eq!(company.name, "Company 42");
    assert_eq!(mock.hits("GET /admin/comp/42"), 1);
    assert!(!admin_caches(&state).companies.is_populated());

    admin.get_all_companies().await.unwrap();
    assert_eq!(mock.hits("GET /admin/allcomp"), 1);
}

#[tokio::test]
async fn test_failed_mutation_leaves_cache_untouched() {
    let (mock, _state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1), sample_company(2)]);
    admin.get_all_companies().await.unwrap();

    mock.fail("DELETE /admin/dcomp/1", StatusCode::BAD_REQUEST, "Company has coupons");
    let err = admin.delete_company(1).await.unwrap_err();
    assert_eq!(err.user_message(), "Company has coupons");

    mock.fail("PUT /admin/updatecomp", StatusCode::BAD_REQUEST, "Name taken");
    let renamed = Company {
        name: "Renamed".to_string(),
        ..sample_company(2)
    };
    assert!(admin.update_company(&renamed).await.is_err());

    let all = admin.get_all_companies().await.unwrap();
    assert_eq!(names(&all), ["Company 1", "Company 2"]);
}

#[tokio::test]
async fn test_failed_fetch_leaves_cache_empty() {
    let (mock, state, admin) = admin_setup().await;
    mock.fail("GET /admin/allcust", StatusCode::INTERNAL_SERVER_ERROR, "boom");

    assert!(admin.get_all_customers().await.is_err());
    assert!(!admin_caches(&state).customers.is_populated());
}

#[tokio::test]
async fn test_customer_cache_is_independent() {
    let (mock, state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1)]);
    mock.seed_customers(vec![sample_customer(5), sample_customer(6)]);

    admin.get_all_companies().await.unwrap();
    assert!(admin_caches(&state).companies.is_populated());
    assert!(!admin_caches(&state).customers.is_populated());

    let customers = admin.get_all_customers().await.unwrap();
    assert_eq!(customers.len(), 2);
    admin.delete_customer(5).await.unwrap();
    let customers = admin.get_all_customers().await.unwrap();
    assert_eq!(customers[0].id, 6);
    assert_eq!(mock.hits("GET /admin/allcust"), 1);
}

#[tokio::test]
async fn test_each_token_has_its_own_cache() {
    let (mock, state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1)]);
    admin.get_all_companies().await.unwrap();

    // Same token, e.g. a second tab: served from the cache.
    let tab = Session::new();
    tab.set_session(common::mint_token("Administrator", 0));
    state.admin_service(&tab).get_all_companies().await.unwrap();
    assert_eq!(mock.hits("GET /admin/allcomp"), 1);

    // Another token must earn its own list from the API.
    let other = Session::new();
    other.set_session(common::mint_token("Administrator", 7));
    state.admin_service(&other).get_all_companies().await.unwrap();
    assert_eq!(mock.hits("GET /admin/allcomp"), 2);
    assert_eq!(state.caches.len(), 2);
}

#[tokio::test]
async fn test_initialize_drops_cached_lists() {
    let (mock, state, admin) = admin_setup().await;
    mock.seed_companies(vec![sample_company(1)]);
    admin.get_all_companies().await.unwrap();

    let selection = InitSelection {
        categories: true,
        companies: true,
        customers: false,
        coupons: false,
    };
    let message = admin.initialize(selection).await.unwrap();
    assert_eq!(message, "Database initialized");
    assert_eq!(mock.hits("GET /admin/init"), 1);
    assert!(!admin_caches(&state).companies.is_populated());
}
