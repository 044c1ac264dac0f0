//! Presentation adapter: locale-specific rendering of catalog values.
//!
//! The store depends only on the [`Presenter`] trait. [`LocaleFormatter`] is the
//! table-driven implementation, built from an explicit [`LocaleConfig`]; there is
//! no process-wide registry of formatters.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;
use crate::review::Review;

/// Text key for the product line template.
pub const PRODUCT_TEMPLATE: &str = "product";
/// Text key for the review line template.
pub const REVIEW_TEMPLATE: &str = "review";
/// Placeholder shown when a product has no reviews.
pub const NO_REVIEWS: &str = "no.reviews";
/// Placeholder shown instead of a best-before date for non-perishables.
pub const NO_BEST_BEFORE: &str = "no.best.before";

/// Locale used when a requested tag is not supported.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Rendering capability consumed by report generation.
pub trait Presenter: Send + Sync {
    fn format_product(&self, product: &Product) -> String;
    fn format_review(&self, review: &Review) -> String;
    /// Locale-specific literal for `key`; unknown keys render as the key.
    fn text_for(&self, key: &str) -> String;
    fn format_money(&self, amount: Decimal) -> String;
}

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to parse locale config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid date pattern {0:?}")]
    InvalidDatePattern(String),

    #[error("locale {tag} is missing text {key:?}")]
    MissingText { tag: String, key: String },
}

/// Locale formatting table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// BCP 47 language tag, e.g. `en-GB`.
    pub tag: String,
    /// Money template; `{amount}` is replaced with the grouped amount.
    pub money_pattern: String,
    pub decimal_separator: String,
    pub group_separator: String,
    /// chrono strftime pattern for dates.
    pub date_pattern: String,
    pub texts: BTreeMap<String, String>,
}

impl LocaleConfig {
    pub fn from_json(json: &str) -> Result<Self, LocaleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Built-in table for `tag`, if supported.
    pub fn builtin(tag: &str) -> Option<Self> {
        let (money, decimal, group, date, texts): (&str, &str, &str, &str, [&str; 4]) = match tag {
            "en-US" => (
                "${amount}",
                ".",
                ",",
                "%-m/%-d/%y",
                [
                    "{name}, Price: {price}, Rating: {rating}, Best Before: {best_before}",
                    "Review: {rating}\t{comment}",
                    "Not reviewed",
                    "n/a",
                ],
            ),
            "en-GB" => (
                "£{amount}",
                ".",
                ",",
                "%d/%m/%Y",
                [
                    "{name}, Price: {price}, Rating: {rating}, Best Before: {best_before}",
                    "Review: {rating}\t{comment}",
                    "Not reviewed",
                    "n/a",
                ],
            ),
            "fr-FR" => (
                "{amount}\u{a0}€",
                ",",
                "\u{202f}",
                "%d/%m/%Y",
                [
                    "{name}, Prix : {price}, Note : {rating}, À consommer avant : {best_before}",
                    "Avis : {rating}\t{comment}",
                    "Pas d'avis",
                    "s.o.",
                ],
            ),
            "zh-CN" => (
                "¥{amount}",
                ".",
                ",",
                "%Y/%-m/%-d",
                [
                    "{name}，价格：{price}，评分：{rating}，最佳食用日期：{best_before}",
                    "评论：{rating}\t{comment}",
                    "暂无评论",
                    "无",
                ],
            ),
            "ru-RU" => (
                "{amount}\u{a0}₽",
                ",",
                "\u{a0}",
                "%d.%m.%Y",
                [
                    "{name}, Цена: {price}, Рейтинг: {rating}, Годен до: {best_before}",
                    "Отзыв: {rating}\t{comment}",
                    "Нет отзывов",
                    "нет",
                ],
            ),
            _ => return None,
        };

        let keys = [PRODUCT_TEMPLATE, REVIEW_TEMPLATE, NO_REVIEWS, NO_BEST_BEFORE];
        Some(Self {
            tag: tag.to_string(),
            money_pattern: money.to_string(),
            decimal_separator: decimal.to_string(),
            group_separator: group.to_string(),
            date_pattern: date.to_string(),
            texts: keys
                .iter()
                .zip(texts)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

/// Tags with a built-in [`LocaleConfig`].
pub fn supported_locales() -> Vec<&'static str> {
    vec!["en-GB", "en-US", "fr-FR", "ru-RU", "zh-CN"]
}

/// Table-driven [`Presenter`].
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    config: LocaleConfig,
}

impl LocaleFormatter {
    /// Validates `config` and builds a formatter from it.
    pub fn new(config: LocaleConfig) -> Result<Self, LocaleError> {
        let bad_pattern = StrftimeItems::new(&config.date_pattern).any(|i| matches!(i, Item::Error));
        if bad_pattern {
            return Err(LocaleError::InvalidDatePattern(config.date_pattern));
        }
        for key in [PRODUCT_TEMPLATE, REVIEW_TEMPLATE] {
            if !config.texts.contains_key(key) {
                return Err(LocaleError::MissingText {
                    tag: config.tag,
                    key: key.to_string(),
                });
            }
        }
        Ok(Self { config })
    }

    /// Formatter for a supported tag, falling back to [`DEFAULT_LOCALE`].
    pub fn for_tag(tag: &str) -> Self {
        let config = LocaleConfig::builtin(tag)
            .or_else(|| LocaleConfig::builtin(DEFAULT_LOCALE))
            .unwrap_or_else(|| LocaleConfig {
                tag: DEFAULT_LOCALE.to_string(),
                money_pattern: "{amount}".to_string(),
                decimal_separator: ".".to_string(),
                group_separator: String::new(),
                date_pattern: "%Y-%m-%d".to_string(),
                texts: BTreeMap::new(),
            });
        Self { config }
    }

    pub fn tag(&self) -> &str {
        &self.config.tag
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.config.date_pattern)).is_err() {
            out = date.format("%Y-%m-%d").to_string();
        }
        out
    }

    fn template<'a>(&'a self, key: &'a str) -> &'a str {
        self.config.texts.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::for_tag(DEFAULT_LOCALE)
    }
}

impl Presenter for LocaleFormatter {
    fn format_product(&self, product: &Product) -> String {
        let best_before = match product.best_before() {
            Some(date) => self.format_date(date),
            None => self.text_for(NO_BEST_BEFORE),
        };
        render(
            self.template(PRODUCT_TEMPLATE),
            &[
                ("name", product.name()),
                ("price", self.format_money(product.price()).as_str()),
                ("rating", product.rating().stars()),
                ("best_before", best_before.as_str()),
            ],
        )
    }

    fn format_review(&self, review: &Review) -> String {
        render(
            self.template(REVIEW_TEMPLATE),
            &[("rating", review.rating().stars()), ("comment", review.comment())],
        )
    }

    fn text_for(&self, key: &str) -> String {
        self.template(key).to_string()
    }

    fn format_money(&self, amount: Decimal) -> String {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);

        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::new();
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push_str(&self.config.group_separator);
            }
            grouped.push(ch);
        }
        grouped.push_str(&self.config.decimal_separator);
        grouped.push_str(fraction);

        let money = self.config.money_pattern.replace("{amount}", &grouped);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{money}")
        } else {
            money
        }
    }
}

/// Substitutes `{key}` placeholders in a single pass.
fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        match tail.find('}') {
            Some(end) => {
                let key = &tail[..end];
                match args.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Rating;
    use rust_decimal_macros::dec;
    use shelfrate_core::ProductId;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn every_supported_locale_has_a_builtin_table() {
        for tag in supported_locales() {
            let config = LocaleConfig::builtin(tag).unwrap();
            assert_eq!(config.tag, tag);
            assert!(LocaleFormatter::new(config).is_ok(), "{tag} failed validation");
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_us() {
        assert_eq!(LocaleFormatter::for_tag("xx-YY").tag(), "en-US");
        assert_eq!(LocaleFormatter::for_tag("fr-FR").tag(), "fr-FR");
    }

    #[test]
    fn money_is_grouped_and_rounded() {
        let us = LocaleFormatter::for_tag("en-US");
        assert_eq!(us.format_money(dec!(1.99)), "$1.99");
        assert_eq!(us.format_money(dec!(1234567.005)), "$1,234,567.01");
        assert_eq!(us.format_money(dec!(0.5)), "$0.50");
        assert_eq!(us.format_money(dec!(-12)), "-$12.00");
        assert_eq!(us.format_money(Decimal::ZERO), "$0.00");

        let fr = LocaleFormatter::for_tag("fr-FR");
        assert_eq!(fr.format_money(dec!(1234.5)), "1\u{202f}234,50\u{a0}€");
    }

    #[test]
    fn product_line_for_each_variant() {
        let us = LocaleFormatter::for_tag("en-US");
        let cake = Product::perishable(ProductId::new(1), "Cake", dec!(3.99), Rating::FiveStar, date());
        assert_eq!(
            us.format_product(&cake),
            "Cake, Price: $3.99, Rating: ★★★★★, Best Before: 3/5/24"
        );

        let tea = Product::beverage(ProductId::new(2), "Tea", dec!(1.99), Rating::NotRated);
        assert_eq!(
            us.format_product(&tea),
            "Tea, Price: $1.99, Rating: ☆☆☆☆☆, Best Before: n/a"
        );

        let gb = LocaleFormatter::for_tag("en-GB");
        assert!(gb.format_product(&cake).ends_with("Best Before: 05/03/2024"));
    }

    #[test]
    fn review_line_and_texts() {
        let ru = LocaleFormatter::for_tag("ru-RU");
        let review = Review::new(Rating::TwoStar, "Too sweet");
        assert_eq!(ru.format_review(&review), "Отзыв: ★★☆☆☆\tToo sweet");
        assert_eq!(ru.text_for(NO_REVIEWS), "Нет отзывов");
        assert_eq!(ru.text_for("missing.key"), "missing.key");
    }

    #[test]
    fn config_loads_from_json_and_is_validated() {
        let json = r#"{
            "tag": "de-DE",
            "money_pattern": "{amount} €",
            "decimal_separator": ",",
            "group_separator": ".",
            "date_pattern": "%d.%m.%Y",
            "texts": { "product": "{name} ({price})", "review": "{rating} {comment}" }
        }"#;
        let formatter = LocaleFormatter::new(LocaleConfig::from_json(json).unwrap()).unwrap();
        let tea = Product::beverage(ProductId::new(2), "Tee", dec!(1999.9), Rating::NotRated);
        assert_eq!(formatter.format_product(&tea), "Tee (1.999,90 €)");
        assert_eq!(formatter.format_date(date()), "05.03.2024");

        let mut bad = LocaleConfig::builtin("en-US").unwrap();
        bad.date_pattern = "%Q".to_string();
        assert!(matches!(LocaleFormatter::new(bad), Err(LocaleError::InvalidDatePattern(_))));

        let mut missing = LocaleConfig::builtin("en-US").unwrap();
        missing.texts.remove(REVIEW_TEMPLATE);
        assert!(matches!(LocaleFormatter::new(missing), Err(LocaleError::MissingText { .. })));

        assert!(matches!(LocaleConfig::from_json("{"), Err(LocaleError::Parse(_))));
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        assert_eq!(render("{a}-{b}-{", &[("a", "1")]), "1-{b}-{");
    }
}
