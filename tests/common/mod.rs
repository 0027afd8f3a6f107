// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process coupon API and storefront builders.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use coupon_storefront::config::Config;
use coupon_storefront::models::{Category, Company, Coupon, Customer};
use coupon_storefront::routes::create_router;
use coupon_storefront::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mint a token the way the coupon API does. The storefront never checks the
/// signature, so any key works.
#[allow(dead_code)]
pub fn mint_token(client_type: &str, id: u64) -> String {
    encode(
        &Header::new(Algorithm::HS512),
        &serde_json::json!({
            "email": format!("{}@example.com", client_type.to_lowercase()),
            "type": client_type,
            "id": id,
            "iat": 1_700_000_000i64,
            "iss": "coupon-system",
            "exp": 4_102_444_800i64,
        }),
        &EncodingKey::from_secret(b"mock-api-secret"),
    )
    .expect("Failed to mint token")
}

/// Cookie header of a signed-in browser session.
#[allow(dead_code)]
pub fn session_cookie(token: &str) -> String {
    format!("storefront_token={}; storefront_session=1", token)
}

#[allow(dead_code)]
pub fn sample_company(id: u64) -> Company {
    Company {
        id,
        name: format!("Company {}", id),
        email: format!("company{}@example.com", id),
        password: Some("secret".to_string()),
    }
}

#[allow(dead_code)]
pub fn sample_customer(id: u64) -> Customer {
    Customer {
        id,
        first_name: format!("First{}", id),
        last_name: format!("Last{}", id),
        email: format!("customer{}@example.com", id),
        password: Some("secret".to_string()),
        coupons: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn sample_coupon(id: u64, amount: i32) -> Coupon {
    Coupon {
        id,
        company: Company {
            password: None,
            ..sample_company(1)
        },
        category: Category::Food,
        title: format!("Coupon {}", id),
        description: "Two for one".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        amount,
        price: 20.0,
        image: String::new(),
    }
}

/// Data and bookkeeping of the mock coupon API.
#[derive(Default)]
pub struct MockData {
    pub companies: Vec<Company>,
    pub customers: Vec<Customer>,
    pub coupons: Vec<Coupon>,
    /// Coupons owned by the signed-in customer
    pub owned: Vec<Coupon>,
    next_id: u64,
    /// Requests seen, keyed by "METHOD /path"
    hits: HashMap<String, usize>,
    /// Headers of every request, in arrival order
    requests: Vec<(String, HeaderMap)>,
    /// Forced failures, keyed by "METHOD /path"
    failures: HashMap<String, (StatusCode, String)>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    pub base_url: String,
    data: Arc<Mutex<MockData>>,
}

#[allow(dead_code)]
impl MockApi {
    pub fn with<R>(&self, f: impl FnOnce(&mut MockData) -> R) -> R {
        f(&mut self.data.lock().unwrap())
    }

    /// How many times `key` ("METHOD /path") was requested.
    pub fn hits(&self, key: &str) -> usize {
        self.with(|d| d.hits.get(key).copied().unwrap_or(0))
    }

    pub fn total_hits(&self) -> usize {
        self.with(|d| d.hits.values().sum())
    }

    /// Headers of the most recent request to `key`.
    pub fn last_headers(&self, key: &str) -> Option<HeaderMap> {
        self.with(|d| {
            d.requests
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, h)| h.clone())
        })
    }

    /// Make `key` answer with `status` and a JSON `message` body.
    pub fn fail(&self, key: &str, status: StatusCode, message: &str) {
        self.with(|d| {
            d.failures
                .insert(key.to_string(), (status, message.to_string()))
        });
    }

    pub fn seed_companies(&self, companies: Vec<Company>) {
        self.with(|d| {
            d.next_id = d.next_id.max(companies.iter().map(|c| c.id).max().unwrap_or(0));
            d.companies = companies;
        });
    }

    pub fn seed_customers(&self, customers: Vec<Customer>) {
        self.with(|d| {
            d.next_id = d.next_id.max(customers.iter().map(|c| c.id).max().unwrap_or(0));
            d.customers = customers;
        });
    }

    pub fn seed_coupons(&self, coupons: Vec<Coupon>) {
        self.with(|d| d.coupons = coupons);
    }
}

fn next_id(data: &mut MockData) -> u64 {
    data.next_id += 1;
    data.next_id
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not found" })),
    )
        .into_response()
}

async fn record(State(mock): State<MockApi>, req: Request<Body>, next: Next) -> Response {
    let key = format!("{} {}", req.method(), req.uri().path());
    let failure = mock.with(|d| {
        *d.hits.entry(key.clone()).or_default() += 1;
        d.requests.push((key.clone(), req.headers().clone()));
        d.failures.get(&key).cloned()
    });
    if let Some((status, message)) = failure {
        return (status, Json(serde_json::json!({ "message": message }))).into_response();
    }
    next.run(req).await
}

async fn login(Path((_email, password, client_type)): Path<(String, String, String)>) -> Response {
    if password == "wrong" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Wrong email or password" })),
        )
            .into_response();
    }
    let id = if client_type == "Administrator" { 0 } else { 1 };
    mint_token(&client_type, id).into_response()
}

async fn logout() -> &'static str {
    "Logged out"
}

async fn signup(State(mock): State<MockApi>, Json(mut customer): Json<Customer>) -> Json<Customer> {
    mock.with(|d| {
        customer.id = next_id(d);
        customer.password = None;
        d.customers.push(customer.clone());
    });
    Json(customer)
}

async fn all_companies(State(mock): State<MockApi>) -> Json<Vec<Company>> {
    Json(mock.with(|d| d.companies.clone()))
}

async fn one_company(State(mock): State<MockApi>, Path(id): Path<u64>) -> Response {
    match mock.with(|d| d.companies.iter().find(|c| c.id == id).cloned()) {
        Some(company) => Json(company).into_response(),
        None => not_found(),
    }
}

async fn add_company(State(mock): State<MockApi>, Json(mut company): Json<Company>) -> Json<Company> {
    mock.with(|d| {
        company.id = next_id(d);
        d.companies.push(company.clone());
    });
    Json(company)
}

async fn update_company(State(mock): State<MockApi>, Json(company): Json<Company>) -> Response {
    let updated = mock.with(|d| match d.companies.iter_mut().find(|c| c.id == company.id) {
        Some(slot) => {
            *slot = company;
            true
        }
        None => false,
    });
    if updated {
        "Company updated".into_response()
    } else {
        not_found()
    }
}

async fn delete_company(State(mock): State<MockApi>, Path(id): Path<u64>) -> &'static str {
    mock.with(|d| d.companies.retain(|c| c.id != id));
    "Company deleted"
}

async fn all_customers(State(mock): State<MockApi>) -> Json<Vec<Customer>> {
    Json(mock.with(|d| d.customers.clone()))
}

async fn one_customer(State(mock): State<MockApi>, Path(id): Path<u64>) -> Response {
    match mock.with(|d| d.customers.iter().find(|c| c.id == id).cloned()) {
        Some(customer) => Json(customer).into_response(),
        None => not_found(),
    }
}

async fn add_customer(
    State(mock): State<MockApi>,
    Json(mut customer): Json<Customer>,
) -> Json<Customer> {
    mock.with(|d| {
        customer.id = next_id(d);
        d.customers.push(customer.clone());
    });
    Json(customer)
}

async fn update_customer(State(mock): State<MockApi>, Json(customer): Json<Customer>) -> Response {
    let updated = mock.with(|d| match d.customers.iter_mut().find(|c| c.id == customer.id) {
        Some(slot) => {
            *slot = customer;
            true
        }
        None => false,
    });
    if updated {
        "Customer updated".into_response()
    } else {
        not_found()
    }
}

async fn delete_customer(State(mock): State<MockApi>, Path(id): Path<u64>) -> &'static str {
    mock.with(|d| d.customers.retain(|c| c.id != id));
    "Customer deleted"
}

async fn init() -> &'static str {
    "Database initialized"
}

async fn all_coupons(State(mock): State<MockApi>) -> Json<Vec<Coupon>> {
    Json(mock.with(|d| d.coupons.clone()))
}

async fn company_coupons(State(mock): State<MockApi>) -> Json<Vec<Coupon>> {
    Json(mock.with(|d| d.coupons.iter().filter(|c| c.company.id == 1).cloned().collect()))
}

async fn company_details(Path(id): Path<u64>) -> Json<Company> {
    Json(Company {
        password: None,
        ..sample_company(id)
    })
}

async fn one_coupon(State(mock): State<MockApi>, Path(id): Path<u64>) -> Response {
    match mock.with(|d| d.coupons.iter().find(|c| c.id == id).cloned()) {
        Some(coupon) => Json(coupon).into_response(),
        None => not_found(),
    }
}

async fn add_coupon(State(mock): State<MockApi>, Json(mut coupon): Json<Coupon>) -> Json<Coupon> {
    mock.with(|d| {
        coupon.id = next_id(d);
        d.coupons.push(coupon.clone());
    });
    Json(coupon)
}

async fn update_coupon(State(mock): State<MockApi>, Json(coupon): Json<Coupon>) -> &'static str {
    mock.with(|d| {
        if let Some(slot) = d.coupons.iter_mut().find(|c| c.id == coupon.id) {
            *slot = coupon;
        }
    });
    "Coupon updated"
}

async fn delete_coupon(State(mock): State<MockApi>, Path(id): Path<u64>) -> &'static str {
    mock.with(|d| d.coupons.retain(|c| c.id != id));
    "Coupon deleted"
}

async fn purchase(State(mock): State<MockApi>, Json(coupon): Json<Coupon>) -> Response {
    let bought = mock.with(|d| {
        if d.owned.iter().any(|c| c.id == coupon.id) {
            return false;
        }
        match d.coupons.iter_mut().find(|c| c.id == coupon.id) {
            Some(stock) if stock.amount > 0 => {
                stock.amount -= 1;
                d.owned.push(coupon);
                true
            }
            _ => false,
        }
    });
    if bought {
        "Coupon purchased".into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": "Coupon out of stock" })),
        )
            .into_response()
    }
}

async fn customer_details(State(mock): State<MockApi>) -> Json<Customer> {
    let owned = mock.with(|d| d.owned.clone());
    Json(Customer {
        password: None,
        coupons: owned,
        ..sample_customer(1)
    })
}

async fn customer_coupons(State(mock): State<MockApi>) -> Json<Vec<Coupon>> {
    Json(mock.with(|d| d.owned.clone()))
}

/// Start the mock coupon API on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_mock_api() -> MockApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().expect("No local address");
    let mock = MockApi {
        base_url: format!("http://{}", addr),
        data: Arc::default(),
    };

    let router = Router::new()
        .route("/login/{email}/{password}/{client_type}", post(login))
        .route("/logout/{token}", post(logout))
        .route("/signup", post(signup))
        .route("/admin/allcomp", get(all_companies))
        .route("/admin/comp/{id}", get(one_company))
        .route("/admin/addcomp", post(add_company))
        .route("/admin/updatecomp", put(update_company))
        .route("/admin/dcomp/{id}", delete(delete_company))
        .route("/admin/allcust", get(all_customers))
        .route("/admin/cust/{id}", get(one_customer))
        .route("/admin/addcust", post(add_customer))
        .route("/admin/updatecust", put(update_customer))
        .route("/admin/dcust/{id}", delete(delete_customer))
        .route("/admin/init", get(init))
        .route("/customer/allcoup", get(all_coupons))
        .route("/company/allcompanycoup", get(company_coupons))
        .route("/company/compdetails/{id}", get(company_details))
        .route("/company/addcoup", post(add_coupon))
        .route("/company/updatecoup", put(update_coupon))
        .route("/company/dcoup/{id}", delete(delete_coupon))
        .route("/company/coup/{id}", get(one_coupon))
        .route("/customer/purchcoup", post(purchase))
        .route("/customer/custdetails", get(customer_details))
        .route("/customer/custcoupons", get(customer_coupons))
        .route("/customer/coup/{id}", get(one_coupon))
        .layer(axum::middleware::from_fn_with_state(mock.clone(), record))
        .with_state(mock.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    mock
}

/// Storefront wired to `api_base_url`. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(api_base_url: &str) -> (Router, Arc<AppState>) {
    let config = Config {
        api_base_url: api_base_url.to_string(),
        ..Config::test_default()
    };
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Storefront whose API is unreachable; for flows that must not touch it.
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    create_test_app(&Config::test_default().api_base_url)
}

#[allow(dead_code)]
pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
