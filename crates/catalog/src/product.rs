use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use shelfrate_core::{Entity, ProductId};

use crate::rating::Rating;

/// Variant-specific product data and discount policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Food with a best-before date; discounted only on that exact day.
    Perishable { best_before: NaiveDate },
    /// Always eligible for its rating tier's discount.
    Beverage,
}

/// Catalog product.
///
/// Immutable: a rating change produces a new value via [`Product::with_rating`].
/// Equality and hashing look at the id only, so the old and the re-rated value
/// are the same entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    rating: Rating,
    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        kind: ProductKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            rating,
            kind,
        }
    }

    pub fn beverage(id: ProductId, name: impl Into<String>, price: Decimal, rating: Rating) -> Self {
        Self::new(id, name, price, rating, ProductKind::Beverage)
    }

    pub fn perishable(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Self {
        Self::new(id, name, price, rating, ProductKind::Perishable { best_before })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn best_before(&self) -> Option<NaiveDate> {
        match self.kind {
            ProductKind::Perishable { best_before } => Some(best_before),
            ProductKind::Beverage => None,
        }
    }

    /// Discount amount on `today`, rounded to cents.
    pub fn discount(&self, today: NaiveDate) -> Decimal {
        let eligible = match self.kind {
            ProductKind::Perishable { best_before } => best_before == today,
            ProductKind::Beverage => true,
        };
        if !eligible {
            return Decimal::ZERO;
        }
        (self.price * self.rating.discount_rate())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Same product with `rating` replaced. Never mutates `self`.
    pub fn with_rating(&self, rating: Rating) -> Self {
        Self {
            rating,
            ..self.clone()
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl core::hash::Hash for Product {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
