//! Rating scale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shelfrate_core::{DomainError, ValueObject};

/// Fixed, totally ordered rating scale.
///
/// The ordinal (declaration order, `NotRated` = 0) is used arithmetically when
/// averaging reviews and when looking up the discount tier.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    #[default]
    NotRated,
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

/// Base discount percentage per rating tier, indexed by ordinal.
pub const DISCOUNT_PERCENT: [u32; 6] = [0, 4, 8, 12, 16, 20];

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::NotRated,
        Rating::OneStar,
        Rating::TwoStar,
        Rating::ThreeStar,
        Rating::FourStar,
        Rating::FiveStar,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Display glyph, also used as the tier label.
    pub const fn stars(self) -> &'static str {
        match self {
            Rating::NotRated => "☆☆☆☆☆",
            Rating::OneStar => "★☆☆☆☆",
            Rating::TwoStar => "★★☆☆☆",
            Rating::ThreeStar => "★★★☆☆",
            Rating::FourStar => "★★★★☆",
            Rating::FiveStar => "★★★★★",
        }
    }

    /// Base discount rate for this tier as a fraction (`0.20` for five stars).
    pub fn discount_rate(self) -> Decimal {
        Decimal::new(i64::from(DISCOUNT_PERCENT[usize::from(self.ordinal())]), 2)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value).ok_or_else(|| DomainError::invalid_rating(value))
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.stars())
    }
}

impl ValueObject for Rating {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (i, rating) in Rating::ALL.iter().enumerate() {
            assert_eq!(usize::from(rating.ordinal()), i);
            assert_eq!(Rating::from_ordinal(rating.ordinal()), Some(*rating));
        }
        assert!(Rating::NotRated < Rating::OneStar);
        assert!(Rating::FourStar < Rating::FiveStar);
    }

    #[test]
    fn not_rated_is_the_lowest_tier() {
        assert_eq!(Rating::ALL.iter().min(), Some(&Rating::NotRated));
        assert_eq!(Rating::default(), Rating::NotRated);
    }

    #[test]
    fn out_of_range_ordinal_is_rejected() {
        assert_eq!(Rating::from_ordinal(6), None);
        assert_eq!(Rating::try_from(6), Err(DomainError::InvalidRating(6)));
        assert_eq!(Rating::try_from(3), Ok(Rating::ThreeStar));
    }

    #[test]
    fn glyphs_are_distinct() {
        let glyphs: std::collections::HashSet<_> = Rating::ALL.iter().map(|r| r.stars()).collect();
        assert_eq!(glyphs.len(), Rating::ALL.len());
        assert_eq!(Rating::FourStar.to_string(), "★★★★☆");
    }

    #[test]
    fn discount_rate_table() {
        assert_eq!(Rating::NotRated.discount_rate(), Decimal::ZERO);
        assert_eq!(Rating::ThreeStar.discount_rate(), dec!(0.12));
        assert_eq!(Rating::FiveStar.discount_rate(), dec!(0.20));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Rating::FourStar).unwrap();
        assert_eq!(json, "\"four_star\"");
        let back: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rating::FourStar);
    }
}
