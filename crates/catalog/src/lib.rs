//! Catalog domain module.
//!
//! Products, their review histories and the aggregate rating derived from
//! them, implemented as deterministic in-memory domain logic (no IO, no
//! persistence). Rendering goes through the [`Presenter`] seam; the store
//! itself never formats text.

pub mod presentation;
pub mod product;
pub mod rating;
pub mod report;
pub mod review;
pub mod store;

pub use presentation::{LocaleConfig, LocaleError, LocaleFormatter, Presenter, supported_locales};
pub use product::{Product, ProductKind};
pub use rating::Rating;
pub use review::Review;
pub use store::ProductStore;
