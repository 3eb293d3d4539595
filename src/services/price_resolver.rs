//! Session-scoped memoization of product price and name lookups.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::{Mutex, OnceCell};

use crate::domain::product::PriceName;
use crate::domain::types::ProductId;
use crate::repository::ProductReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Clone, Debug)]
enum CachedPrice {
    Found(PriceName),
    /// The API confirmed the product does not exist.
    NotFound,
}

/// Where the value of a [`Resolution`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Looked up by this call.
    Fetched,
    /// Served from the cache, possibly after waiting on another caller's lookup.
    Cached,
    /// The product does not exist; the placeholder is cached.
    NotFound,
    /// The lookup failed; the placeholder is returned but not cached.
    Unavailable,
}

/// Value returned by [`PriceNameCache::resolve`]. Never an error: failures
/// collapse to the zero placeholder and are flagged through `source`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resolution {
    pub value: PriceName,
    pub source: ResolutionSource,
}

impl Resolution {
    fn placeholder(source: ResolutionSource) -> Self {
        Self {
            value: PriceName::placeholder(),
            source,
        }
    }

    fn from_entry(entry: &CachedPrice, source: ResolutionSource) -> Self {
        match entry {
            CachedPrice::Found(value) => Self {
                value: value.clone(),
                source,
            },
            CachedPrice::NotFound => Self::placeholder(ResolutionSource::NotFound),
        }
    }

    /// `true` when `value` is the zero placeholder rather than real data.
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self.source,
            ResolutionSource::NotFound | ResolutionSource::Unavailable
        )
    }
}

/// Memoizes `{price, name}` per product for the lifetime of the cache.
///
/// Entries are never invalidated by changes made elsewhere; drop the cache
/// or call [`clear`](Self::clear) to end the session. Concurrent lookups of
/// the same uncached product share a single request.
#[derive(Debug, Default)]
pub struct PriceNameCache {
    entries: Mutex<HashMap<ProductId, Arc<OnceCell<CachedPrice>>>>,
}

async fn fetch<R>(repo: &R, product_id: &ProductId) -> RepositoryResult<CachedPrice>
where
    R: ProductReader + ?Sized,
{
    match repo.get_product_price_name(product_id).await {
        Ok(value) => Ok(CachedPrice::Found(value)),
        Err(RepositoryError::NotFound) => {
            log::warn!("Product {product_id} not found, caching zero placeholder");
            Ok(CachedPrice::NotFound)
        }
        Err(err) => Err(err),
    }
}

impl PriceNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, product_id: &ProductId) -> Arc<OnceCell<CachedPrice>> {
        let mut entries = self.entries.lock().await;
        entries.entry(product_id.clone()).or_default().clone()
    }

    /// Drops the slot of a failed lookup unless another caller has since
    /// filled or replaced it.
    async fn discard_empty_slot(&self, product_id: &ProductId, slot: &Arc<OnceCell<CachedPrice>>) {
        let mut entries = self.entries.lock().await;
        let empty = entries
            .get(product_id)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if empty {
            entries.remove(product_id);
        }
    }

    /// Resolves the price and name of `product_id`, consulting `repo` at most
    /// once per product unless the previous attempt failed transiently.
    pub async fn resolve<R>(&self, repo: &R, product_id: &ProductId) -> Resolution
    where
        R: ProductReader + ?Sized,
    {
        let slot = self.slot(product_id).await;

        if let Some(entry) = slot.get() {
            log::debug!("Price cache hit for product {product_id}");
            return Resolution::from_entry(entry, ResolutionSource::Cached);
        }

        let fetched = AtomicBool::new(false);
        let outcome = slot
            .get_or_try_init(|| {
                fetched.store(true, Ordering::Relaxed);
                fetch(repo, product_id)
            })
            .await;

        match outcome {
            Ok(entry) => {
                let source = if fetched.load(Ordering::Relaxed) {
                    ResolutionSource::Fetched
                } else {
                    ResolutionSource::Cached
                };
                Resolution::from_entry(entry, source)
            }
            Err(err) if err.is_transient() => {
                self.discard_empty_slot(product_id, &slot).await;
                log::warn!("Price lookup for product {product_id} failed, will retry: {err}");
                Resolution::placeholder(ResolutionSource::Unavailable)
            }
            Err(err) => {
                self.discard_empty_slot(product_id, &slot).await;
                log::error!("Price lookup for product {product_id} rejected: {err}");
                Resolution::placeholder(ResolutionSource::Unavailable)
            }
        }
    }

    /// Number of products with a settled cache entry.
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Forgets every cached entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
