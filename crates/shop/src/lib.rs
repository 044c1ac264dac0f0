//! Demo shop: drives the catalog through a fixed sequence of products and reviews.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use shelfrate_catalog::{Product, ProductStore, Rating};
use shelfrate_core::{DomainResult, ProductId};

/// Environment variable selecting the report locale.
pub const LOCALE_ENV: &str = "SHELFRATE_LOCALE";

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub locale: String,
}

impl ShopConfig {
    pub fn from_env() -> Self {
        let locale = std::env::var(LOCALE_ENV).unwrap_or_else(|_| {
            info!("{LOCALE_ENV} not set; using en-US");
            "en-US".to_string()
        });
        Self { locale }
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
        }
    }
}

/// Highest rating first.
pub fn by_rating(a: &Product, b: &Product) -> Ordering {
    b.rating().cmp(&a.rating())
}

/// Most expensive first.
pub fn by_price(a: &Product, b: &Product) -> Ordering {
    b.price().cmp(&a.price())
}

/// Highest rating first, cheapest first within a tier.
pub fn by_rating_then_cheapest(a: &Product, b: &Product) -> Ordering {
    by_rating(a, b).then_with(|| by_price(a, b).reverse())
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn days_after(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// Populates `store` with the demo catalog and returns every rendered section in order.
pub fn run_demo(store: &ProductStore, today: NaiveDate) -> DomainResult<Vec<String>> {
    let mut out = Vec::new();

    let tea = ProductId::new(101);
    store.create_beverage(tea, "Tea", cents(199), Rating::NotRated);
    out.push(store.product_report(tea)?);
    for (rating, comment) in [
        (Rating::FourStar, "Nice hot cup of tea"),
        (Rating::TwoStar, "Rather weak tea"),
        (Rating::FourStar, "Fine tea"),
        (Rating::FourStar, "Good tea"),
        (Rating::FiveStar, "Perfect tea"),
        (Rating::ThreeStar, "Just add some lemon"),
    ] {
        store.review_product(tea, rating, comment)?;
    }
    out.push(store.product_report(tea)?);

    let coffee = ProductId::new(102);
    store.create_beverage(coffee, "Coffee", cents(199), Rating::NotRated);
    for (rating, comment) in [
        (Rating::ThreeStar, "Coffee was ok"),
        (Rating::OneStar, "Where is the milk!?"),
        (Rating::FiveStar, "It's perfect with ten spoons of sugar!"),
    ] {
        store.review_product(coffee, rating, comment)?;
    }
    out.push(store.product_report(coffee)?);

    let cake = ProductId::new(103);
    store.create_perishable(cake, "Cake", cents(399), Rating::NotRated, days_after(today, 2));
    for (rating, comment) in [
        (Rating::FiveStar, "Very nice cake"),
        (Rating::FourStar, "It good, but I've expected more chocolate"),
        (Rating::FiveStar, "This cake is perfect"),
    ] {
        store.review_product(cake, rating, comment)?;
    }
    out.push(store.product_report(cake)?);

    let cookie = ProductId::new(104);
    store.create_perishable(cookie, "Cookie", cents(399), Rating::NotRated, today);
    for (rating, comment) in [
        (Rating::ThreeStar, "Just another cookie"),
        (Rating::ThreeStar, "Ok"),
    ] {
        store.review_product(cookie, rating, comment)?;
    }
    out.push(store.product_report(cookie)?);

    let hot_chocolate = ProductId::new(105);
    store.create_beverage(hot_chocolate, "Hot Chocolate", cents(250), Rating::NotRated);
    for (rating, comment) in [
        (Rating::FourStar, "Tasty!"),
        (Rating::FourStar, "Not bad at all!"),
    ] {
        store.review_product(hot_chocolate, rating, comment)?;
    }
    out.push(store.product_report(hot_chocolate)?);

    let chocolate = ProductId::new(106);
    store.create_perishable(
        chocolate,
        "Chocolate",
        cents(250),
        Rating::NotRated,
        days_after(today, 3),
    );
    for (rating, comment) in [
        (Rating::TwoStar, "Too sweet"),
        (Rating::ThreeStar, "Better than cookie"),
        (Rating::TwoStar, "Too bitter"),
        (Rating::OneStar, "I don't get it"),
    ] {
        store.review_product(chocolate, rating, comment)?;
    }
    out.push(store.product_report(chocolate)?);

    out.push(store.products_report(by_rating));
    out.push(store.products_report(by_price));
    out.push(store.products_report(by_rating_then_cheapest));
    out.push(store.products_report_filtered(|p| p.price() < cents(200), by_rating_then_cheapest));

    let discounts = store
        .discount_report(today)
        .into_iter()
        .map(|(tier, total)| format!("{tier} {total}\n"))
        .collect::<String>();
    out.push(discounts);

    info!(products = store.len(), sections = out.len(), "demo complete");
    Ok(out)
}
