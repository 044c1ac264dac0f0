//! In-memory product store: identity, review histories and rating aggregation.

use std::cmp::Ordering;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use shelfrate_core::{DomainError, DomainResult, Entity, ProductId};

use crate::presentation::{LocaleFormatter, Presenter};
use crate::product::{Product, ProductKind};
use crate::rating::Rating;
use crate::review::{self, Review};

#[derive(Debug, Clone)]
struct StoreEntry {
    product: Product,
    reviews: Vec<Review>,
}

/// Catalog of products keyed by [`Entity::id`], each with its review history.
///
/// All state sits behind one lock: a review holds the write lock across
/// remove, recompute and reinsert, so readers never see the entry missing.
pub struct ProductStore {
    entries: RwLock<HashMap<ProductId, StoreEntry>>,
    presenter: RwLock<Arc<dyn Presenter>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::with_presenter(Arc::new(LocaleFormatter::default()))
    }

    pub fn with_presenter(presenter: Arc<dyn Presenter>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            presenter: RwLock::new(presenter),
        }
    }

    /// Store rendering through the built-in table for `tag` (falls back to `en-US`).
    pub fn for_locale(tag: &str) -> Self {
        Self::with_presenter(Arc::new(LocaleFormatter::for_tag(tag)))
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<ProductId, StoreEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<ProductId, StoreEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Active presentation adapter.
    pub fn presenter(&self) -> Arc<dyn Presenter> {
        Arc::clone(&self.presenter.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap the active presentation adapter.
    pub fn set_presenter(&self, presenter: Arc<dyn Presenter>) {
        *self.presenter.write().unwrap_or_else(PoisonError::into_inner) = presenter;
    }

    /// Swap to the built-in formatter for `tag` (falls back to `en-US`).
    pub fn change_locale(&self, tag: &str) {
        let formatter = LocaleFormatter::for_tag(tag);
        info!(requested = tag, active = formatter.tag(), "locale changed");
        self.set_presenter(Arc::new(formatter));
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Build a product and register it with an empty review history.
    ///
    /// If the id is already present the existing entry (and its reviews) is kept;
    /// the freshly built value is returned either way.
    pub fn create_product(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        kind: ProductKind,
    ) -> Product {
        let product = Product::new(id, name, price, rating, kind);

        match self.write_entries().entry(product.id()) {
            MapEntry::Vacant(slot) => {
                debug!(product_id = %id, name = product.name(), "product created");
                slot.insert(StoreEntry {
                    product: product.clone(),
                    reviews: Vec::new(),
                });
            }
            MapEntry::Occupied(_) => {
                debug!(product_id = %id, "product id already registered; keeping existing entry");
            }
        }

        product
    }

    pub fn create_beverage(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
    ) -> Product {
        self.create_product(id, name, price, rating, ProductKind::Beverage)
    }

    pub fn create_perishable(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Product {
        self.create_product(id, name, price, rating, ProductKind::Perishable { best_before })
    }

    /// Look up the current value for `id`.
    pub fn find_product(&self, id: ProductId) -> DomainResult<Product> {
        self.read_entries()
            .get(&id)
            .map(|entry| entry.product.clone())
            .ok_or_else(|| {
                warn!(product_id = %id, "product not found");
                DomainError::not_found(id)
            })
    }

    /// Record a review for `id` and recompute its rating.
    ///
    /// Returns the product as it was before the rating update.
    pub fn review_product(
        &self,
        id: ProductId,
        rating: Rating,
        comment: impl Into<String>,
    ) -> DomainResult<Product> {
        self.record_review(id, Review::new(rating, comment))
    }

    /// Record a review for `product` (resolved by id) and recompute its rating.
    ///
    /// Returns `product` unchanged; look it up again to see the new rating.
    pub fn review(
        &self,
        product: &Product,
        rating: Rating,
        comment: impl Into<String>,
    ) -> DomainResult<Product> {
        self.record_review(product.id(), Review::new(rating, comment))?;
        Ok(product.clone())
    }

    fn record_review(&self, id: ProductId, review: Review) -> DomainResult<Product> {
        let mut entries = self.write_entries();

        let Some(mut entry) = entries.remove(&id) else {
            warn!(product_id = %id, "review for unknown product");
            return Err(DomainError::not_found(id));
        };

        let previous = entry.product.clone();
        entry.reviews.push(review);
        let rating = review::aggregate_rating(&entry.reviews);
        entry.product = previous.with_rating(rating);

        debug!(
            product_id = %id,
            reviews = entry.reviews.len(),
            rating = rating.ordinal(),
            "review recorded"
        );

        entries.insert(entry.product.id(), entry);
        Ok(previous)
    }

    /// Reviews for `id` in display order (highest rating first, stable).
    ///
    /// Sorting works on a copy; the stored history keeps submission order.
    pub fn printable_reviews(&self, id: ProductId) -> DomainResult<Vec<Review>> {
        self.review_history(id)
            .map(|reviews| review::sorted_for_display(&reviews))
    }

    /// Reviews for `id` in submission order.
    pub fn review_history(&self, id: ProductId) -> DomainResult<Vec<Review>> {
        self.read_entries()
            .get(&id)
            .map(|entry| entry.reviews.clone())
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// Snapshot of all products, ordered by `sorter`.
    pub fn list_products<S>(&self, sorter: S) -> std::vec::IntoIter<Product>
    where
        S: FnMut(&Product, &Product) -> Ordering,
    {
        let mut products: Vec<Product> = self
            .read_entries()
            .values()
            .map(|entry| entry.product.clone())
            .collect();
        products.sort_by(sorter);
        products.into_iter()
    }

    /// Like [`ProductStore::list_products`], yielding only products matching `filter`.
    pub fn list_products_filtered<F, S>(
        &self,
        filter: F,
        sorter: S,
    ) -> std::iter::Filter<std::vec::IntoIter<Product>, F>
    where
        F: FnMut(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        self.list_products(sorter).filter(filter)
    }

    /// Total discount on `today` per rating tier present in the catalog.
    ///
    /// Tiers without products are absent. The tier label is [`Rating::stars`].
    pub fn discount_by_rating_tier(&self, today: NaiveDate) -> BTreeMap<Rating, Decimal> {
        let mut tiers = BTreeMap::new();
        for entry in self.read_entries().values() {
            *tiers.entry(entry.product.rating()).or_insert(Decimal::ZERO) +=
                entry.product.discount(today);
        }
        tiers
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductStore")
            .field("entries", &*self.read_entries())
            .finish_non_exhaustive()
    }
}
