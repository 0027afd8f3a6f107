// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrator calls: company and customer management through the
//! signed-in session's entity caches, plus database seeding.

use super::transport::Transport;
use crate::auth::decode_token;
use crate::cache::{EntityCache, Keyed};
use crate::error::{AppError, Result};
use crate::models::{Company, Customer, InitSelection};
use crate::session::Session;
use chrono::Utc;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// The entity caches of one signed-in session.
#[derive(Debug, Default)]
pub struct Caches {
    pub companies: EntityCache<Company>,
    pub customers: EntityCache<Customer>,
}

impl Caches {
    /// Back to Empty for every entity type.
    pub fn clear(&self) {
        self.companies.clear();
        self.customers.clear();
    }
}

/// Entity caches keyed by bearer token.
///
/// A session only ever sees lists fetched with its own token, so a cached
/// list is never served to a token the API has not accepted. Entries go away
/// on logout (explicit or defensive); entries of expired tokens are pruned
/// whenever a new session shows up.
#[derive(Debug, Default)]
pub struct SessionCaches {
    by_token: DashMap<String, Arc<Caches>>,
}

impl SessionCaches {
    /// Caches of `session`, created on first use. A session without a token
    /// gets throwaway caches that nothing else can see.
    pub fn for_session(&self, session: &Session) -> Arc<Caches> {
        let Some(token) = session.token() else {
            return Arc::default();
        };
        if let Some(existing) = self.by_token.get(&token) {
            return existing.clone();
        }
        self.prune_expired();
        self.by_token.entry(token).or_default().clone()
    }

    /// Caches of `token`, if that session has any.
    pub fn get(&self, token: &str) -> Option<Arc<Caches>> {
        self.by_token.get(token).map(|entry| entry.clone())
    }

    /// Forget the caches of `session`.
    pub fn discard(&self, session: &Session) {
        if let Some(token) = session.token() {
            if self.by_token.remove(&token).is_some() {
                tracing::debug!("Session caches discarded");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    fn prune_expired(&self) {
        let now = Utc::now().timestamp();
        self.by_token.retain(|token, _| {
            decode_token(token)
                .map(|claims| claims.exp > now)
                .unwrap_or(false)
        });
    }
}

/// Endpoint set of one cached entity type.
struct Endpoints {
    kind: &'static str,
    all: &'static str,
    one: &'static str,
    add: &'static str,
    update: &'static str,
    delete: &'static str,
}

const COMPANY_ENDPOINTS: Endpoints = Endpoints {
    kind: "company",
    all: "/admin/allcomp",
    one: "/admin/comp",
    add: "/admin/addcomp",
    update: "/admin/updatecomp",
    delete: "/admin/dcomp",
};

const CUSTOMER_ENDPOINTS: Endpoints = Endpoints {
    kind: "customer",
    all: "/admin/allcust",
    one: "/admin/cust",
    add: "/admin/addcust",
    update: "/admin/updatecust",
    delete: "/admin/dcust",
};

/// Read-through, confirm-then-update access to one cached entity type.
struct CachedResource<'a, T> {
    transport: &'a Transport,
    cache: &'a EntityCache<T>,
    endpoints: &'static Endpoints,
}

impl<T> CachedResource<'_, T>
where
    T: Keyed + Clone + Serialize + DeserializeOwned,
{
    async fn get_all(&self) -> Result<Vec<T>> {
        if let Some(items) = self.cache.snapshot() {
            tracing::debug!(kind = self.endpoints.kind, "Cache hit");
            return Ok(items);
        }

        tracing::debug!(kind = self.endpoints.kind, "Cache miss, fetching full list");
        let generation = self.cache.generation();
        let items: Vec<T> = self.transport.get_json(self.endpoints.all).await?;
        if !self.cache.populate_if_current(items.clone(), generation) {
            tracing::debug!(kind = self.endpoints.kind, "Cache changed during fetch, not populating");
            return Ok(items);
        }
        // Re-read so duplicate ids from the server collapse the same way the cache does.
        Ok(self.cache.snapshot().unwrap_or_default())
    }

    async fn get_one(&self, id: u64) -> Result<T> {
        if self.cache.is_populated() {
            return self.cache.get(id).ok_or_else(|| {
                AppError::NotFound(format!("{} {}", self.endpoints.kind, id))
            });
        }
        self.transport
            .get_json(&format!("{}/{}", self.endpoints.one, id))
            .await
    }

    async fn add(&self, item: &T) -> Result<T> {
        let created: T = self.transport.post_json(self.endpoints.add, item).await?;
        tracing::info!(kind = self.endpoints.kind, id = created.key(), "Created");
        self.cache.insert(created.clone());
        Ok(created)
    }

    async fn update(&self, item: &T) -> Result<String> {
        let message = self.transport.put_json(self.endpoints.update, item).await?;
        tracing::info!(kind = self.endpoints.kind, id = item.key(), "Updated");
        self.cache.replace(item.clone());
        Ok(message)
    }

    async fn delete(&self, id: u64) -> Result<String> {
        let message = self
            .transport
            .delete(&format!("{}/{}", self.endpoints.delete, id))
            .await?;
        tracing::info!(kind = self.endpoints.kind, id, "Deleted");
        self.cache.remove(id);
        Ok(message)
    }
}

/// Administrator service for one session.
#[derive(Clone)]
pub struct AdminService {
    transport: Transport,
    caches: Arc<Caches>,
}

impl AdminService {
    pub fn new(transport: Transport, caches: Arc<Caches>) -> Self {
        Self { transport, caches }
    }

    fn companies(&self) -> CachedResource<'_, Company> {
        CachedResource {
            transport: &self.transport,
            cache: &self.caches.companies,
            endpoints: &COMPANY_ENDPOINTS,
        }
    }

    fn customers(&self) -> CachedResource<'_, Customer> {
        CachedResource {
            transport: &self.transport,
            cache: &self.caches.customers,
            endpoints: &CUSTOMER_ENDPOINTS,
        }
    }

    pub async fn get_all_companies(&self) -> Result<Vec<Company>> {
        self.companies().get_all().await
    }

    pub async fn get_one_company(&self, id: u64) -> Result<Company> {
        self.companies().get_one(id).await
    }

    pub async fn add_company(&self, company: &Company) -> Result<Company> {
        self.companies().add(company).await
    }

    pub async fn update_company(&self, company: &Company) -> Result<String> {
        self.companies().update(company).await
    }

    pub async fn delete_company(&self, id: u64) -> Result<String> {
        self.companies().delete(id).await
    }

    pub async fn get_all_customers(&self) -> Result<Vec<Customer>> {
        self.customers().get_all().await
    }

    pub async fn get_one_customer(&self, id: u64) -> Result<Customer> {
        self.customers().get_one(id).await
    }

    pub async fn add_customer(&self, customer: &Customer) -> Result<Customer> {
        self.customers().add(customer).await
    }

    pub async fn update_customer(&self, customer: &Customer) -> Result<String> {
        self.customers().update(customer).await
    }

    pub async fn delete_customer(&self, id: u64) -> Result<String> {
        self.customers().delete(id).await
    }

    /// Reset the selected tables on the server and reseed them.
    ///
    /// Cached lists are dropped afterwards since the server data changed
    /// wholesale.
    pub async fn initialize(&self, selection: InitSelection) -> Result<String> {
        let query = [
            ("categories", selection.categories),
            ("companies", selection.companies),
            ("customers", selection.customers),
            ("coupons", selection.coupons),
        ];
        let message = self
            .transport
            .get_text_with_query("/admin/init", &query)
            .await?;
        tracing::info!(?selection, "Database initialized");
        self.caches.clear();
        Ok(message)
    }
}
