//! Customer reviews.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use shelfrate_core::ValueObject;

use crate::rating::Rating;

/// A single (rating, comment) review. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    rating: Rating,
    comment: String,
}

impl Review {
    pub fn new(rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Display ordering: higher ratings first.
    ///
    /// Equal ratings compare equal, so a stable sort keeps arrival order.
    pub fn display_order(&self, other: &Self) -> Ordering {
        other.rating.cmp(&self.rating)
    }
}

impl ValueObject for Review {}

/// Returns a copy of `reviews` in display order, leaving the input untouched.
pub fn sorted_for_display(reviews: &[Review]) -> Vec<Review> {
    let mut sorted = reviews.to_vec();
    // `sort_by` is stable.
    sorted.sort_by(Review::display_order);
    sorted
}

/// Aggregate rating: mean ordinal of `reviews`, rounded half up.
///
/// An empty history is [`Rating::NotRated`].
pub fn aggregate_rating(reviews: &[Review]) -> Rating {
    let count = reviews.len() as u64;
    if count == 0 {
        return Rating::NotRated;
    }
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating.ordinal())).sum();
    // floor((sum / count) + 1/2) in integer arithmetic
    let rounded = (2 * sum + count) / (2 * count);
    u8::try_from(rounded)
        .ok()
        .and_then(Rating::from_ordinal)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_rating_sorts_first_and_ties_keep_arrival_order() {
        let reviews = vec![
            Review::new(Rating::ThreeStar, "a"),
            Review::new(Rating::FiveStar, "b"),
            Review::new(Rating::ThreeStar, "c"),
        ];

        let sorted = sorted_for_display(&reviews);
        let comments: Vec<_> = sorted.iter().map(Review::comment).collect();
        assert_eq!(comments, vec!["b", "a", "c"]);

        // input order is preserved
        assert_eq!(reviews[0].comment(), "a");
        assert_eq!(reviews[1].comment(), "b");
    }

    #[test]
    fn aggregate_is_rounded_mean() {
        let reviews = |ordinals: &[u8]| -> Vec<Review> {
            ordinals
                .iter()
                .map(|o| Review::new(Rating::from_ordinal(*o).unwrap(), ""))
                .collect()
        };

        assert_eq!(aggregate_rating(&[]), Rating::NotRated);
        assert_eq!(aggregate_rating(&reviews(&[4, 2])), Rating::ThreeStar);
        // 3.5 rounds up
        assert_eq!(aggregate_rating(&reviews(&[4, 2, 4, 4])), Rating::FourStar);
        // 3.33 rounds down
        assert_eq!(aggregate_rating(&reviews(&[4, 2, 4])), Rating::ThreeStar);
        assert_eq!(aggregate_rating(&reviews(&[5, 5, 5])), Rating::FiveStar);
        assert_eq!(aggregate_rating(&reviews(&[0, 1])), Rating::OneStar);
    }

    #[test]
    fn empty_history_sorts_to_empty() {
        assert!(sorted_for_display(&[]).is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: display order is non-increasing and stable within a tier.
            #[test]
            fn display_order_is_descending_and_stable(ordinals in prop::collection::vec(0u8..=5, 0..40)) {
                let reviews: Vec<Review> = ordinals
                    .iter()
                    .enumerate()
                    .map(|(i, o)| Review::new(Rating::from_ordinal(*o).unwrap(), i.to_string()))
                    .collect();

                let sorted = sorted_for_display(&reviews);
                prop_assert_eq!(sorted.len(), reviews.len());

                for pair in sorted.windows(2) {
                    prop_assert!(pair[0].rating() >= pair[1].rating());
                    if pair[0].rating() == pair[1].rating() {
                        let a: usize = pair[0].comment().parse().unwrap();
                        let b: usize = pair[1].comment().parse().unwrap();
                        prop_assert!(a < b);
                    }
                }
            }
        }
    }
}
