//! Text reports rendered through the store's active [`Presenter`].

use std::cmp::Ordering;

use chrono::NaiveDate;

use shelfrate_core::{DomainResult, ProductId};

use crate::presentation::NO_REVIEWS;
use crate::product::Product;
use crate::store::ProductStore;

impl ProductStore {
    /// Product line followed by its reviews in display order.
    ///
    /// A product without reviews gets the locale's "no reviews" line instead.
    pub fn product_report(&self, id: ProductId) -> DomainResult<String> {
        let product = self.find_product(id)?;
        let reviews = self.printable_reviews(id)?;
        let presenter = self.presenter();

        let mut txt = presenter.format_product(&product);
        txt.push('\n');
        if reviews.is_empty() {
            txt.push_str(&presenter.text_for(NO_REVIEWS));
            txt.push('\n');
        } else {
            for review in &reviews {
                txt.push_str(&presenter.format_review(review));
                txt.push('\n');
            }
        }
        Ok(txt)
    }

    /// One product line per product, ordered by `sorter`.
    pub fn products_report<S>(&self, sorter: S) -> String
    where
        S: FnMut(&Product, &Product) -> Ordering,
    {
        self.render_lines(self.list_products(sorter))
    }

    /// One product line per product matching `filter`, ordered by `sorter`.
    pub fn products_report_filtered<F, S>(&self, filter: F, sorter: S) -> String
    where
        F: FnMut(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        self.render_lines(self.list_products_filtered(filter, sorter))
    }

    /// `(tier label, formatted total)` for each rating tier present, lowest tier first.
    pub fn discount_report(&self, today: NaiveDate) -> Vec<(String, String)> {
        let presenter = self.presenter();
        self.discount_by_rating_tier(today)
            .into_iter()
            .map(|(rating, total)| (rating.stars().to_string(), presenter.format_money(total)))
            .collect()
    }

    fn render_lines(&self, products: impl Iterator<Item = Product>) -> String {
        let presenter = self.presenter();
        products.fold(String::new(), |mut txt, product| {
            txt.push_str(&presenter.format_product(&product));
            txt.push('\n');
            txt
        })
    }
}
